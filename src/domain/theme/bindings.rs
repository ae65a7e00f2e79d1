use super::palette::Palette;
use super::variant::ThemeVariant;
use crate::shared::mutex_ext::MutexExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// One complete projection of a palette onto named style variables. Always built whole from a
/// single palette; surfaces receive it in a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBindings {
    /// `data-theme` attribute value.
    pub theme: ThemeVariant,
    /// `data-theme-mode` attribute value.
    pub mode: ThemeMode,
    pub vars: BTreeMap<&'static str, &'static str>,
}

impl StyleBindings {
    pub const THEME_ATTRIBUTE: &'static str = "data-theme";
    pub const MODE_ATTRIBUTE: &'static str = "data-theme-mode";

    pub fn for_variant(theme: ThemeVariant) -> Self {
        Self::from_palette(theme, theme.palette())
    }

    fn from_palette(theme: ThemeVariant, palette: &Palette) -> Self {
        let vars = BTreeMap::from([
            ("--bg-0", palette.bg0),
            ("--bg-1", palette.bg1),
            ("--panel", palette.panel),
            ("--panel-strong", palette.panel_strong),
            ("--panel-soft", palette.panel_soft),
            ("--stroke", palette.stroke),
            ("--stroke-strong", palette.stroke_strong),
            ("--text-0", palette.text0),
            ("--text-1", palette.text1),
            ("--text-2", palette.text2),
            ("--accent", palette.accent),
            ("--accent-2", palette.accent2),
            ("--shadow", palette.shadow),
            ("--shadow-strong", palette.shadow_strong),
            ("--is-dark", if palette.is_dark { "1" } else { "0" }),
        ]);

        Self {
            theme,
            mode: if palette.is_dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            },
            vars,
        }
    }

    pub fn var(&self, name: &str) -> Option<&'static str> {
        self.vars.get(name).copied()
    }

    pub fn attributes(&self) -> [(&'static str, &'static str); 2] {
        [
            (Self::THEME_ATTRIBUTE, self.theme.as_str()),
            (Self::MODE_ATTRIBUTE, self.mode.as_str()),
        ]
    }
}

/// Style binding surface of the presentation layer.
///
/// `apply` is called while the theme manager holds its state lock, so implementations must not
/// call back into the manager.
pub trait StyleSurface: Send + Sync {
    fn apply(&self, bindings: &StyleBindings);
}

/// Default surface: keeps the latest bindings behind one pointer swap, so a reader sees either
/// the old snapshot or the new one, never a mix.
#[derive(Debug)]
pub struct LatestStyleBindings {
    current: Mutex<Arc<StyleBindings>>,
}

impl LatestStyleBindings {
    pub fn new(initial: ThemeVariant) -> Self {
        Self {
            current: Mutex::new(Arc::new(StyleBindings::for_variant(initial))),
        }
    }

    pub fn current(&self) -> Arc<StyleBindings> {
        self.current.lock_or_recover().clone()
    }
}

impl Default for LatestStyleBindings {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl StyleSurface for LatestStyleBindings {
    fn apply(&self, bindings: &StyleBindings) {
        let next = Arc::new(bindings.clone());
        *self.current.lock_or_recover() = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_cover_every_palette_field_plus_dark_flag() {
        for variant in ThemeVariant::ALL {
            let bindings = StyleBindings::for_variant(variant);
            assert_eq!(bindings.vars.len(), 15, "{variant}");

            let palette = variant.palette();
            let mut from_palette: Vec<&str> =
                palette.color_fields().iter().map(|(_, v)| *v).collect();
            let mut from_vars: Vec<&str> = bindings
                .vars
                .iter()
                .filter(|(k, _)| **k != "--is-dark")
                .map(|(_, v)| *v)
                .collect();
            from_palette.sort_unstable();
            from_vars.sort_unstable();
            assert_eq!(from_palette, from_vars, "{variant}");
        }
    }

    #[test]
    fn bindings_expose_mode_attributes() {
        let dark = StyleBindings::for_variant(ThemeVariant::Ocean);
        assert_eq!(dark.var("--is-dark"), Some("1"));
        assert_eq!(
            dark.attributes(),
            [("data-theme", "ocean"), ("data-theme-mode", "dark")]
        );

        let light = StyleBindings::for_variant(ThemeVariant::LightGreen);
        assert_eq!(light.var("--is-dark"), Some("0"));
        assert_eq!(light.var("--accent"), Some("#22c55e"));
        assert_eq!(light.mode, ThemeMode::Light);
    }

    #[test]
    fn latest_bindings_swaps_whole_snapshot() {
        let surface = LatestStyleBindings::default();
        let before = surface.current();
        surface.apply(&StyleBindings::for_variant(ThemeVariant::LightRose));
        let after = surface.current();

        assert_eq!(before.theme, ThemeVariant::Military);
        assert_eq!(before.var("--bg-0"), Some("#080d08"));
        assert_eq!(after.theme, ThemeVariant::LightRose);
        assert_eq!(after.var("--bg-0"), Some("#fff1f2"));
    }
}
