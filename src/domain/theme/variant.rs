use super::palette::{self, Palette};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeVariant {
    Military,
    Ocean,
    Purple,
    Orange,
    Dark,
    Light,
    LightBlue,
    LightGreen,
    LightRose,
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Military
    }
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 9] = [
        Self::Military,
        Self::Ocean,
        Self::Purple,
        Self::Orange,
        Self::Dark,
        Self::Light,
        Self::LightBlue,
        Self::LightGreen,
        Self::LightRose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Military => "military",
            Self::Ocean => "ocean",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::LightBlue => "light-blue",
            Self::LightGreen => "light-green",
            Self::LightRose => "light-rose",
        }
    }

    pub fn palette(self) -> &'static Palette {
        palette::for_variant(self)
    }

    pub fn is_dark(self) -> bool {
        self.palette().is_dark
    }

    pub fn dark_variants() -> impl Iterator<Item = ThemeVariant> {
        Self::ALL.into_iter().filter(|v| v.is_dark())
    }

    pub fn light_variants() -> impl Iterator<Item = ThemeVariant> {
        Self::ALL.into_iter().filter(|v| !v.is_dark())
    }
}

impl std::fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == trimmed)
            .ok_or_else(|| format!("SEC_INVALID_INPUT: unknown theme={s}"))
    }
}

/// Menu entry for a theme picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOption {
    pub id: ThemeVariant,
    pub name: &'static str,
    pub is_dark: bool,
    pub accent: &'static str,
}

impl From<ThemeVariant> for ThemeOption {
    fn from(id: ThemeVariant) -> Self {
        let palette = id.palette();
        Self {
            id,
            name: palette.name,
            is_dark: palette.is_dark,
            accent: palette.accent,
        }
    }
}
