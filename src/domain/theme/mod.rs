//! Usage: Theme selection state (variant enum, palette table, style bindings, persisted manager).

mod bindings;
mod manager;
mod palette;
mod variant;

pub use bindings::{LatestStyleBindings, StyleBindings, StyleSurface, ThemeMode};
pub use manager::{ThemeManager, ThemeSnapshot, THEME_EVENT_NAME};
pub use palette::{validate_all as validate_palettes, Palette};
pub use variant::{ThemeOption, ThemeVariant};
