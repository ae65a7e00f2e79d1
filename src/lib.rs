//! Usage: UI-state core for the desktop shell: the active color theme (persisted, pushed to the
//! style surface) and the transient toast queue, plus the command surface the presentation layer
//! calls into.
//!
//! Hosts start a [`UiState`] inside a tokio runtime, hand it a [`ConfigStore`], a [`Scheduler`]
//! and a [`StyleSurface`], and call [`cleanup_before_exit`] before quitting.

mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use domain::{theme, toast, updates};
pub(crate) use infra::settings;
pub(crate) use shared::blocking;

pub use app::app_state::UiState;
pub use app::cleanup::cleanup_before_exit;
pub use app::events::EventSink;
pub use app::logging::{init as init_logging, LOG_FILTER_ENV};
pub use app::options::{
    UiStateOptions, DEFAULT_FLUSH_TIMEOUT_MS, DEFAULT_TOAST_DURATION_MS, MAX_TOAST_DURATION_MS,
};
pub use commands::{
    app_restart, app_version_get, theme_get, theme_options_list, theme_set, toast_hide,
    toast_show, toasts_list, update_apply, update_check,
};
pub use domain::theme::{
    validate_palettes, LatestStyleBindings, Palette, StyleBindings, StyleSurface, ThemeManager,
    ThemeMode, ThemeOption, ThemeSnapshot, ThemeVariant, THEME_EVENT_NAME,
};
pub use domain::toast::{
    ToastId, ToastItem, ToastKind, ToastQueue, DEFAULT_TOAST_DURATION, TOAST_EVENT_NAME,
};
pub use domain::updates::{
    UpdateInfo, UpdateProgress, UpdateStatus, UpdateToastBridge, Updater,
    UPDATE_PROGRESS_EVENT_NAME,
};
pub use infra::settings::{
    Config, ConfigStore, JsonFileConfigStore, MemoryConfigStore, PersistenceError,
    PersistenceErrorKind, DEFAULT_CONFIG_FILE_NAME, THEME_KEY,
};
pub use shared::subscribers::{Listener, SubscriptionId};
pub use shared::timer::{ManualScheduler, ScheduledTask, Scheduler, TokioScheduler};
