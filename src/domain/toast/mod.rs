//! Usage: Transient operation-status toasts (ordered queue with per-item auto-dismiss).

mod queue;
mod types;

pub use queue::{ToastQueue, TOAST_EVENT_NAME};
pub use types::{ToastId, ToastItem, ToastKind, DEFAULT_TOAST_DURATION};
