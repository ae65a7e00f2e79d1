use super::variant::ThemeVariant;
use serde::Serialize;

/// Full color set for one theme variant. Every field is required, so a variant without a
/// complete palette does not compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub name: &'static str,
    pub is_dark: bool,
    pub bg0: &'static str,
    pub bg1: &'static str,
    pub panel: &'static str,
    pub panel_strong: &'static str,
    pub panel_soft: &'static str,
    pub stroke: &'static str,
    pub stroke_strong: &'static str,
    pub text0: &'static str,
    pub text1: &'static str,
    pub text2: &'static str,
    pub accent: &'static str,
    pub accent2: &'static str,
    pub shadow: &'static str,
    pub shadow_strong: &'static str,
}

impl Palette {
    /// `(field, value)` pairs for every color slot, in style-variable order.
    pub fn color_fields(&self) -> [(&'static str, &'static str); 14] {
        [
            ("bg0", self.bg0),
            ("bg1", self.bg1),
            ("panel", self.panel),
            ("panelStrong", self.panel_strong),
            ("panelSoft", self.panel_soft),
            ("stroke", self.stroke),
            ("strokeStrong", self.stroke_strong),
            ("text0", self.text0),
            ("text1", self.text1),
            ("text2", self.text2),
            ("accent", self.accent),
            ("accent2", self.accent2),
            ("shadow", self.shadow),
            ("shadowStrong", self.shadow_strong),
        ]
    }
}

const DARK_SHADOW: &str = "rgba(0, 0, 0, 0.35)";
const DARK_SHADOW_STRONG: &str = "rgba(0, 0, 0, 0.5)";
const LIGHT_PANEL: &str = "rgba(255, 255, 255, 0.85)";
const LIGHT_PANEL_STRONG: &str = "rgba(255, 255, 255, 0.95)";

static MILITARY: Palette = Palette {
    name: "韭菜绿",
    is_dark: true,
    bg0: "#080d08",
    bg1: "#0e1610",
    panel: "rgba(14, 22, 16, 0.75)",
    panel_strong: "rgba(14, 22, 16, 0.92)",
    panel_soft: "rgba(14, 22, 16, 0.56)",
    stroke: "rgba(58, 95, 50, 0.22)",
    stroke_strong: "rgba(58, 95, 50, 0.32)",
    text0: "#d8e0d6",
    text1: "#7a8a72",
    text2: "#4a5a42",
    accent: "#3a5f32",
    accent2: "#5a8a4a",
    shadow: DARK_SHADOW,
    shadow_strong: DARK_SHADOW_STRONG,
};

static OCEAN: Palette = Palette {
    name: "海洋蓝",
    is_dark: true,
    bg0: "#0a0f1a",
    bg1: "#0f1629",
    panel: "rgba(15, 22, 41, 0.72)",
    panel_strong: "rgba(15, 22, 41, 0.92)",
    panel_soft: "rgba(15, 22, 41, 0.56)",
    stroke: "rgba(56, 189, 248, 0.18)",
    stroke_strong: "rgba(56, 189, 248, 0.28)",
    text0: "#e2e8f0",
    text1: "#94a3b8",
    text2: "#64748b",
    accent: "#38bdf8",
    accent2: "#22d3ee",
    shadow: DARK_SHADOW,
    shadow_strong: DARK_SHADOW_STRONG,
};

static PURPLE: Palette = Palette {
    name: "星空紫",
    is_dark: true,
    bg0: "#0f0a1a",
    bg1: "#1a1025",
    panel: "rgba(26, 16, 37, 0.72)",
    panel_strong: "rgba(26, 16, 37, 0.92)",
    panel_soft: "rgba(26, 16, 37, 0.56)",
    stroke: "rgba(168, 85, 247, 0.18)",
    stroke_strong: "rgba(168, 85, 247, 0.28)",
    text0: "#f0e8f5",
    text1: "#a89bb8",
    text2: "#786888",
    accent: "#a855f7",
    accent2: "#c084fc",
    shadow: DARK_SHADOW,
    shadow_strong: DARK_SHADOW_STRONG,
};

static ORANGE: Palette = Palette {
    name: "暖橙",
    is_dark: true,
    bg0: "#120d08",
    bg1: "#1f1610",
    panel: "rgba(31, 22, 16, 0.72)",
    panel_strong: "rgba(31, 22, 16, 0.92)",
    panel_soft: "rgba(31, 22, 16, 0.56)",
    stroke: "rgba(251, 146, 60, 0.18)",
    stroke_strong: "rgba(251, 146, 60, 0.28)",
    text0: "#f5ebe0",
    text1: "#b8a08b",
    text2: "#88705b",
    accent: "#fb923c",
    accent2: "#fdba74",
    shadow: DARK_SHADOW,
    shadow_strong: DARK_SHADOW_STRONG,
};

static DARK: Palette = Palette {
    name: "暗夜黑",
    is_dark: true,
    bg0: "#09090b",
    bg1: "#18181b",
    panel: "rgba(24, 24, 27, 0.72)",
    panel_strong: "rgba(24, 24, 27, 0.92)",
    panel_soft: "rgba(24, 24, 27, 0.56)",
    stroke: "rgba(161, 161, 170, 0.18)",
    stroke_strong: "rgba(161, 161, 170, 0.28)",
    text0: "#fafafa",
    text1: "#a1a1aa",
    text2: "#71717a",
    accent: "#a1a1aa",
    accent2: "#d4d4d8",
    shadow: DARK_SHADOW,
    shadow_strong: DARK_SHADOW_STRONG,
};

static LIGHT: Palette = Palette {
    name: "经典白",
    is_dark: false,
    bg0: "#f8fafc",
    bg1: "#f1f5f9",
    panel: LIGHT_PANEL,
    panel_strong: LIGHT_PANEL_STRONG,
    panel_soft: "rgba(255, 255, 255, 0.65)",
    stroke: "rgba(148, 163, 184, 0.3)",
    stroke_strong: "rgba(148, 163, 184, 0.5)",
    text0: "#1e293b",
    text1: "#64748b",
    text2: "#94a3b8",
    accent: "#475569",
    accent2: "#334155",
    shadow: "rgba(100, 116, 139, 0.12)",
    shadow_strong: "rgba(100, 116, 139, 0.2)",
};

static LIGHT_BLUE: Palette = Palette {
    name: "天空蓝",
    is_dark: false,
    bg0: "#f0f9ff",
    bg1: "#e0f2fe",
    panel: LIGHT_PANEL,
    panel_strong: LIGHT_PANEL_STRONG,
    panel_soft: "rgba(240, 249, 255, 0.65)",
    stroke: "rgba(14, 165, 233, 0.25)",
    stroke_strong: "rgba(14, 165, 233, 0.4)",
    text0: "#0c4a6e",
    text1: "#0369a1",
    text2: "#0ea5e9",
    accent: "#0ea5e9",
    accent2: "#0284c7",
    shadow: "rgba(14, 165, 233, 0.1)",
    shadow_strong: "rgba(14, 165, 233, 0.18)",
};

static LIGHT_GREEN: Palette = Palette {
    name: "薄荷绿",
    is_dark: false,
    bg0: "#f0fdf4",
    bg1: "#dcfce7",
    panel: LIGHT_PANEL,
    panel_strong: LIGHT_PANEL_STRONG,
    panel_soft: "rgba(240, 253, 244, 0.65)",
    stroke: "rgba(34, 197, 94, 0.25)",
    stroke_strong: "rgba(34, 197, 94, 0.4)",
    text0: "#14532d",
    text1: "#166534",
    text2: "#22c55e",
    accent: "#22c55e",
    accent2: "#16a34a",
    shadow: "rgba(34, 197, 94, 0.1)",
    shadow_strong: "rgba(34, 197, 94, 0.18)",
};

static LIGHT_ROSE: Palette = Palette {
    name: "樱花粉",
    is_dark: false,
    bg0: "#fff1f2",
    bg1: "#ffe4e6",
    panel: LIGHT_PANEL,
    panel_strong: LIGHT_PANEL_STRONG,
    panel_soft: "rgba(255, 241, 242, 0.65)",
    stroke: "rgba(244, 63, 94, 0.2)",
    stroke_strong: "rgba(244, 63, 94, 0.35)",
    text0: "#881337",
    text1: "#be123c",
    text2: "#f43f5e",
    accent: "#f43f5e",
    accent2: "#e11d48",
    shadow: "rgba(244, 63, 94, 0.1)",
    shadow_strong: "rgba(244, 63, 94, 0.18)",
};

pub(super) fn for_variant(variant: ThemeVariant) -> &'static Palette {
    match variant {
        ThemeVariant::Military => &MILITARY,
        ThemeVariant::Ocean => &OCEAN,
        ThemeVariant::Purple => &PURPLE,
        ThemeVariant::Orange => &ORANGE,
        ThemeVariant::Dark => &DARK,
        ThemeVariant::Light => &LIGHT,
        ThemeVariant::LightBlue => &LIGHT_BLUE,
        ThemeVariant::LightGreen => &LIGHT_GREEN,
        ThemeVariant::LightRose => &LIGHT_ROSE,
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_rgba_color(value: &str) -> bool {
    let Some(inner) = value
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return false;
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [r, g, b, a] = parts.as_slice() else {
        return false;
    };

    let channel_ok = |v: &str| v.parse::<u8>().is_ok();
    let alpha_ok = a
        .parse::<f32>()
        .map(|v| (0.0..=1.0).contains(&v))
        .unwrap_or(false);

    channel_ok(*r) && channel_ok(*g) && channel_ok(*b) && alpha_ok
}

/// Startup check over the whole table: names present, every color a `#rrggbb` or `rgba(...)`
/// literal. Returns every problem found, not just the first.
pub fn validate_all() -> Result<(), String> {
    let mut problems = Vec::new();

    for variant in ThemeVariant::ALL {
        let palette = for_variant(variant);
        if palette.name.trim().is_empty() {
            problems.push(format!("{variant}.name is empty"));
        }
        for (field, value) in palette.color_fields() {
            if !is_hex_color(value) && !is_rgba_color(value) {
                problems.push(format!("{variant}.{field}={value:?}"));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(format!("THEME_PALETTE_INVALID: {}", problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_table_is_complete_and_well_formed() {
        assert_eq!(validate_all(), Ok(()));
    }

    #[test]
    fn dark_flag_matches_variant_family() {
        for variant in ThemeVariant::ALL {
            let light_family = variant.as_str().starts_with("light");
            assert_eq!(for_variant(variant).is_dark, !light_family, "{variant}");
        }
    }

    #[test]
    fn color_syntax_checks() {
        assert!(is_hex_color("#0a0f1a"));
        assert!(!is_hex_color("#0a0f1"));
        assert!(!is_hex_color("0a0f1a"));
        assert!(is_rgba_color("rgba(14, 22, 16, 0.75)"));
        assert!(!is_rgba_color("rgba(256, 22, 16, 0.75)"));
        assert!(!is_rgba_color("rgba(14, 22, 16)"));
        assert!(!is_rgba_color("rgba(14, 22, 16, 1.5)"));
    }
}
