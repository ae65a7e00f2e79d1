//! Usage: Theme related commands.

use crate::app::app_state::UiState;
use crate::theme::{ThemeOption, ThemeSnapshot, ThemeVariant};

pub fn theme_get(state: &UiState) -> ThemeSnapshot {
    state.theme().snapshot()
}

/// Unknown ids leave the active theme untouched; the returned snapshot is always the active one.
pub fn theme_set(state: &UiState, theme: &str) -> ThemeSnapshot {
    state.theme().set_theme_by_name(theme.trim());
    state.theme().snapshot()
}

pub fn theme_options_list() -> Vec<ThemeOption> {
    ThemeVariant::ALL.iter().copied().map(ThemeOption::from).collect()
}
