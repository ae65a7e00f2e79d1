use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

const TOAST_ID_PREFIX: &str = "toast-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Loading,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Loading => "loading",
        }
    }

    /// Loading toasts stay until dismissed explicitly.
    pub fn auto_dismisses(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Queue-scoped toast id. Allocated from a monotonic counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(super) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{TOAST_ID_PREFIX}{}", self.0)
    }
}

impl std::str::FromStr for ToastId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(TOAST_ID_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| format!("SEC_INVALID_INPUT: invalid toast id={s}"))
    }
}

impl Serialize for ToastId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastItem {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub created_at_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_dismiss_after_ms: Option<u64>,
}
