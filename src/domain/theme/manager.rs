use super::bindings::{StyleBindings, StyleSurface};
use super::palette::Palette;
use super::variant::ThemeVariant;
use crate::settings::{ConfigStore, PersistenceError};
use crate::shared::mutex_ext::MutexExt;
use crate::shared::subscribers::{Listener, SubscriptionId, Subscribers};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

pub const THEME_EVENT_NAME: &str = "theme:changed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub theme: ThemeVariant,
    pub colors: &'static Palette,
}

impl ThemeSnapshot {
    pub fn of(theme: ThemeVariant) -> Self {
        Self {
            theme,
            colors: theme.palette(),
        }
    }
}

enum PersistCommand {
    Save(ThemeVariant),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

struct ThemeState {
    active: ThemeVariant,
    // Set by the first explicit selection; a persisted value that loads later must not override it.
    explicitly_set: bool,
}

struct ThemeShared {
    state: Mutex<ThemeState>,
    surface: Arc<dyn StyleSurface>,
    subscribers: Subscribers<ThemeSnapshot>,
}

/// Owns the active theme. Selection is applied in memory and on the style surface immediately;
/// persistence runs on a single writer task so saves land in call order.
#[derive(Clone)]
pub struct ThemeManager {
    shared: Arc<ThemeShared>,
    persist_tx: mpsc::UnboundedSender<PersistCommand>,
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("theme", &self.get_theme())
            .field("subscribers", &self.shared.subscribers.len())
            .finish()
    }
}

impl ThemeManager {
    /// Starts with `default_theme` applied, then loads the persisted choice in the background.
    /// Must be called from within a tokio runtime.
    pub fn start(
        store: Arc<dyn ConfigStore>,
        surface: Arc<dyn StyleSurface>,
        default_theme: ThemeVariant,
    ) -> Result<Self, String> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| format!("THEME_NO_RUNTIME: {e}"))?;

        surface.apply(&StyleBindings::for_variant(default_theme));

        let shared = Arc::new(ThemeShared {
            state: Mutex::new(ThemeState {
                active: default_theme,
                explicitly_set: false,
            }),
            surface,
            subscribers: Subscribers::default(),
        });

        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let writer_shared = shared.clone();
        runtime.spawn_blocking(move || writer_loop(store, writer_shared, persist_rx));

        Ok(Self { shared, persist_tx })
    }

    pub fn get_theme(&self) -> ThemeVariant {
        self.shared.state.lock_or_recover().active
    }

    pub fn palette(&self) -> &'static Palette {
        self.get_theme().palette()
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot::of(self.get_theme())
    }

    pub fn set_theme(&self, theme: ThemeVariant) {
        let snapshot = {
            let mut state = self.shared.state.lock_or_recover();
            let previous = state.active;
            state.active = theme;
            state.explicitly_set = true;
            // Under the lock so concurrent selections reach the surface in the same order as state.
            self.shared.surface.apply(&StyleBindings::for_variant(theme));
            tracing::debug!(from = %previous, to = %theme, "主题已切换");
            ThemeSnapshot::of(theme)
        };

        self.shared.subscribers.notify(&snapshot);

        if self.persist_tx.send(PersistCommand::Save(theme)).is_err() {
            tracing::warn!(theme = %theme, "主题持久化任务已停止，跳过保存");
        }
    }

    /// Unknown ids are rejected without touching state. Returns whether the theme was applied.
    pub fn set_theme_by_name(&self, name: &str) -> bool {
        match name.parse::<ThemeVariant>() {
            Ok(theme) => {
                self.set_theme(theme);
                true
            }
            Err(err) => {
                tracing::warn!(theme = %name, "忽略未知主题: {}", err);
                false
            }
        }
    }

    pub fn subscribe(&self, listener: Listener<ThemeSnapshot>) -> SubscriptionId {
        self.shared.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.unsubscribe(id)
    }

    /// Resolves once every save requested before this call has been attempted.
    /// Returns `false` if the writer task is gone.
    pub async fn flush(&self) -> bool {
        let (tx, rx) = oneshot::channel();
        if self.persist_tx.send(PersistCommand::Flush(tx)).is_err() {
            return false;
        }
        rx.await.is_ok()
    }

    /// Stops the writer task after it has handled everything queued so far, and drops all
    /// subscribers. Listeners may hold manager clones (and with them the writer's channel), so
    /// the task would otherwise never see the channel close. Later selections still apply in
    /// memory but are no longer persisted.
    pub fn shutdown(&self) {
        self.shared.subscribers.clear();
        if self.persist_tx.send(PersistCommand::Shutdown).is_err() {
            tracing::debug!("主题持久化任务已停止");
        }
    }
}

fn writer_loop(
    store: Arc<dyn ConfigStore>,
    shared: Arc<ThemeShared>,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
) {
    adopt_persisted_theme(store.as_ref(), &shared);

    let mut flush_waiters: Vec<oneshot::Sender<()>> = Vec::new();
    let mut late_waiters: Vec<oneshot::Sender<()>> = Vec::new();

    while let Some(command) = rx.blocking_recv() {
        let mut latest: Option<ThemeVariant> = None;
        let mut stop = false;
        let mut absorb = |command: PersistCommand| {
            // Anything queued behind a shutdown is ignored. Its flush waiters are released (as
            // false) only once the writer returns, after the pending save.
            if stop {
                if let PersistCommand::Flush(waiter) = command {
                    late_waiters.push(waiter);
                }
                return;
            }
            match command {
                PersistCommand::Save(theme) => latest = Some(theme),
                PersistCommand::Flush(waiter) => flush_waiters.push(waiter),
                PersistCommand::Shutdown => stop = true,
            }
        };

        absorb(command);
        // Coalesce whatever queued up meanwhile; only the newest selection needs to hit disk.
        while let Ok(next) = rx.try_recv() {
            absorb(next);
        }

        if let Some(theme) = latest {
            match persist_theme(store.as_ref(), theme) {
                Ok(()) => tracing::debug!(theme = %theme, "主题已保存"),
                Err(err) => tracing::error!(theme = %theme, error = %err, "保存主题失败"),
            }
        }

        for waiter in flush_waiters.drain(..) {
            let _ = waiter.send(());
        }

        if stop {
            tracing::debug!("主题持久化任务已退出");
            return;
        }
    }
}

fn adopt_persisted_theme(store: &dyn ConfigStore, shared: &ThemeShared) {
    let config = match store.load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "读取主题配置失败，使用默认主题");
            return;
        }
    };

    let Some(raw) = config.theme() else {
        tracing::debug!("配置中未设置主题，使用默认主题");
        return;
    };

    let theme = match raw.parse::<ThemeVariant>() {
        Ok(theme) => theme,
        Err(_) => {
            tracing::warn!(theme = %raw, "配置中的主题无法识别，使用默认主题");
            return;
        }
    };

    let snapshot = {
        let mut state = shared.state.lock_or_recover();
        if state.explicitly_set {
            tracing::debug!(persisted = %theme, active = %state.active, "已手动选择主题，忽略保存的主题");
            return;
        }
        if state.active == theme {
            return;
        }
        state.active = theme;
        shared.surface.apply(&StyleBindings::for_variant(theme));
        ThemeSnapshot::of(theme)
    };

    tracing::info!(theme = %theme, "已加载保存的主题");
    shared.subscribers.notify(&snapshot);
}

fn persist_theme(store: &dyn ConfigStore, theme: ThemeVariant) -> Result<(), PersistenceError> {
    // Read-modify-write: the record belongs to the host app, only `theme` is ours.
    let mut config = store.load()?;
    config.set_theme(theme.as_str());
    store.save(&config)
}
