//! Usage: UI state container wired at startup (theme manager, toast queue, update bridge).

use super::events::{self, EventSink};
use super::options::UiStateOptions;
use crate::settings::{ConfigStore, JsonFileConfigStore};
use crate::shared::timer::{Scheduler, TokioScheduler};
use crate::theme::{self, LatestStyleBindings, StyleSurface, ThemeManager};
use crate::toast::ToastQueue;
use crate::updates::{UpdateProgress, UpdateToastBridge, Updater, UPDATE_PROGRESS_EVENT_NAME};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

pub struct UiState {
    options: UiStateOptions,
    theme: ThemeManager,
    toasts: ToastQueue,
    updater: Option<Arc<dyn Updater>>,
    update_toasts: UpdateToastBridge,
    event_sink: Option<EventSink>,
    pub(crate) cleanup_started: AtomicBool,
}

impl std::fmt::Debug for UiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiState")
            .field("options", &self.options)
            .field("theme", &self.theme)
            .field("toasts", &self.toasts)
            .field("updater", &self.updater.is_some())
            .field("event_sink", &self.event_sink.is_some())
            .finish()
    }
}

impl UiState {
    /// Must be called from within a tokio runtime (the theme writer runs on its blocking pool).
    pub fn start(
        mut options: UiStateOptions,
        store: Arc<dyn ConfigStore>,
        scheduler: Arc<dyn Scheduler>,
        surface: Arc<dyn StyleSurface>,
    ) -> Result<Self, String> {
        options.sanitize();

        if let Err(err) = theme::validate_palettes() {
            tracing::error!("主题色板校验失败: {}", err);
        }

        let theme = ThemeManager::start(store, surface, options.default_theme)?;
        let toasts = ToastQueue::with_default_duration(
            scheduler,
            Duration::from_millis(options.toast_default_duration_ms),
        );
        let update_toasts = UpdateToastBridge::new(toasts.clone());

        tracing::info!(default_theme = %options.default_theme, "ui 状态已初始化");

        Ok(Self {
            options,
            theme,
            toasts,
            updater: None,
            update_toasts,
            event_sink: None,
            cleanup_started: AtomicBool::new(false),
        })
    }

    /// Production wiring: `<config_dir>/config.json`, tokio timers, and an in-process style surface
    /// that the presentation layer reads from.
    pub fn start_in_dir(
        options: UiStateOptions,
        config_dir: &Path,
    ) -> Result<(Self, Arc<LatestStyleBindings>), String> {
        let store = Arc::new(JsonFileConfigStore::in_dir(config_dir));
        let scheduler = Arc::new(TokioScheduler::current()?);
        let surface = Arc::new(LatestStyleBindings::new(options.default_theme));
        let state = Self::start(options, store, scheduler, surface.clone())?;
        Ok((state, surface))
    }

    pub fn with_updater(mut self, updater: Arc<dyn Updater>) -> Self {
        self.updater = Some(updater);
        self
    }

    /// Emits theme, toast and update-progress changes to `sink` from now on.
    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        events::forward_state_changes(&self.theme, &self.toasts, &sink);
        self.event_sink = Some(sink);
        self
    }

    /// Entry point for update progress pushed by the host updater: drives the progress toast and
    /// emits `update:progress`.
    pub fn report_update_progress(&self, progress: &UpdateProgress) {
        self.update_toasts.on_progress(progress);
        if let Some(sink) = &self.event_sink {
            events::emit(sink, UPDATE_PROGRESS_EVENT_NAME, progress);
        }
    }

    pub fn options(&self) -> &UiStateOptions {
        &self.options
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn updater(&self) -> Option<Arc<dyn Updater>> {
        self.updater.clone()
    }

    pub fn update_toasts(&self) -> &UpdateToastBridge {
        &self.update_toasts
    }
}

impl Drop for UiState {
    fn drop(&mut self) {
        self.theme.shutdown();
    }
}
