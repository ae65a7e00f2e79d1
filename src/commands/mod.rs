//! Usage: Command surface exposed to the presentation layer (theme, toasts, updates).

pub(crate) mod theme;
pub(crate) mod toast;
pub(crate) mod updates;

pub use theme::{theme_get, theme_options_list, theme_set};
pub use toast::{toast_hide, toast_show, toasts_list};
pub use updates::{app_restart, app_version_get, update_apply, update_check};
