//! Usage: Forward UI state changes to the host event channel.
//!
//! - `theme:changed` carries a `ThemeSnapshot`
//! - `toast:queue` carries the full toast list after every mutation
//! - `update:progress` carries an `UpdateProgress`

use crate::theme::{ThemeManager, ThemeSnapshot, THEME_EVENT_NAME};
use crate::toast::{ToastItem, ToastQueue, TOAST_EVENT_NAME};
use serde::Serialize;
use std::sync::Arc;

/// Host-side emitter, e.g. a webview `emit(event, payload)`.
pub type EventSink = Arc<dyn Fn(&'static str, serde_json::Value) + Send + Sync + 'static>;

pub(crate) fn emit<T: Serialize>(sink: &EventSink, event: &'static str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => sink(event, value),
        Err(err) => tracing::warn!(event, "事件序列化失败: {}", err),
    }
}

pub(crate) fn forward_state_changes(
    theme: &ThemeManager,
    toasts: &ToastQueue,
    sink: &EventSink,
) {
    let theme_sink = sink.clone();
    theme.subscribe(Arc::new(move |snapshot: &ThemeSnapshot| {
        emit(&theme_sink, THEME_EVENT_NAME, snapshot)
    }));

    let toast_sink = sink.clone();
    toasts.subscribe(Arc::new(move |items: &Vec<ToastItem>| {
        emit(&toast_sink, TOAST_EVENT_NAME, items)
    }));
}
