//! Usage: Host-provided knobs for the UI state core (schema + sanitize helpers).

use crate::theme::ThemeVariant;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOAST_DURATION_MS: u64 = 2000;
pub const MAX_TOAST_DURATION_MS: u64 = 10 * 60 * 1000;
pub const DEFAULT_FLUSH_TIMEOUT_MS: u64 = 3000;
const MIN_FLUSH_TIMEOUT_MS: u64 = 100;
const MAX_FLUSH_TIMEOUT_MS: u64 = 30 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiStateOptions {
    // Used until (and unless) a persisted theme loads.
    pub default_theme: ThemeVariant,
    // 0 = toasts stay until dismissed.
    pub toast_default_duration_ms: u64,
    pub flush_timeout_ms: u64,
}

impl Default for UiStateOptions {
    fn default() -> Self {
        Self {
            default_theme: ThemeVariant::default(),
            toast_default_duration_ms: DEFAULT_TOAST_DURATION_MS,
            flush_timeout_ms: DEFAULT_FLUSH_TIMEOUT_MS,
        }
    }
}

fn sanitize_toast_duration(options: &mut UiStateOptions) -> bool {
    if options.toast_default_duration_ms > MAX_TOAST_DURATION_MS {
        options.toast_default_duration_ms = MAX_TOAST_DURATION_MS;
        return true;
    }
    false
}

fn sanitize_flush_timeout(options: &mut UiStateOptions) -> bool {
    let clamped = options
        .flush_timeout_ms
        .clamp(MIN_FLUSH_TIMEOUT_MS, MAX_FLUSH_TIMEOUT_MS);
    if clamped != options.flush_timeout_ms {
        options.flush_timeout_ms = clamped;
        return true;
    }
    false
}

impl UiStateOptions {
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        let mut options: Self = serde_json::from_str(content)
            .map_err(|e| format!("failed to parse ui options: {e}"))?;
        options.sanitize();
        Ok(options)
    }

    /// Clamps out-of-range values in place; returns whether anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        changed |= sanitize_toast_duration(self);
        changed |= sanitize_flush_timeout(self);
        if changed {
            tracing::warn!(
                toast_default_duration_ms = self.toast_default_duration_ms,
                flush_timeout_ms = self.flush_timeout_ms,
                "ui 配置超出范围，已修正"
            );
        }
        changed
    }
}
