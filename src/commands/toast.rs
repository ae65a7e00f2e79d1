//! Usage: Toast related commands.

use crate::app::app_state::UiState;
use crate::app::options::MAX_TOAST_DURATION_MS;
use crate::toast::{ToastId, ToastItem, ToastKind};
use std::time::Duration;

/// `duration_ms`: `None` = queue default; `Some(0)` = until dismissed. Returns the toast id.
pub fn toast_show(
    state: &UiState,
    kind: ToastKind,
    message: String,
    duration_ms: Option<u64>,
) -> String {
    let toasts = state.toasts();
    let id = match duration_ms {
        None => toasts.push(kind, message),
        Some(ms) => toasts.push_with_duration(
            kind,
            message,
            Duration::from_millis(ms.min(MAX_TOAST_DURATION_MS)),
        ),
    };
    id.to_string()
}

/// Returns whether a toast was removed. Malformed ids are treated as unknown.
pub fn toast_hide(state: &UiState, id: &str) -> bool {
    match id.parse::<ToastId>() {
        Ok(id) => state.toasts().dismiss(id),
        Err(err) => {
            tracing::debug!("toast_hide 忽略无效 id: {}", err);
            false
        }
    }
}

pub fn toasts_list(state: &UiState) -> Vec<ToastItem> {
    state.toasts().items()
}
