//! Usage: Best-effort cleanup hooks for app lifecycle events (exit/restart).

use super::app_state::UiState;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Waits for pending theme writes to land, bounded by `flush_timeout_ms`, then stops the theme
/// writer. Runs once per state; later calls return immediately.
pub async fn cleanup_before_exit(state: &UiState) {
    if state.cleanup_started.swap(true, Ordering::SeqCst) {
        return;
    }

    let flush_timeout = Duration::from_millis(state.options().flush_timeout_ms);
    match tokio::time::timeout(flush_timeout, state.theme().flush()).await {
        Ok(true) => tracing::info!("退出清理：主题配置已落盘"),
        Ok(false) => tracing::warn!("退出清理：主题写入任务已停止，跳过等待"),
        Err(_) => tracing::warn!(
            timeout_ms = state.options().flush_timeout_ms,
            "退出清理：等待主题写入超时"
        ),
    }
    state.theme().shutdown();

    let pending_toasts = state.toasts().len();
    if pending_toasts > 0 {
        tracing::debug!(pending_toasts, "退出清理：丢弃未关闭的提示");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::options::UiStateOptions;
    use crate::settings::{Config, ConfigStore, MemoryConfigStore, PersistenceError};
    use crate::shared::timer::ManualScheduler;
    use crate::theme::{LatestStyleBindings, ThemeVariant};
    use std::sync::atomic::AtomicUsize;
    use std::sync::{mpsc, Arc, Mutex};

    fn start(store: Arc<dyn ConfigStore>) -> UiState {
        UiState::start(
            UiStateOptions::default(),
            store,
            Arc::new(ManualScheduler::new()),
            Arc::new(LatestStyleBindings::default()),
        )
        .expect("start")
    }

    #[tokio::test]
    async fn cleanup_flushes_latest_theme() {
        let store = Arc::new(MemoryConfigStore::new());
        let state = start(store.clone());

        state.theme().set_theme(ThemeVariant::Ocean);
        cleanup_before_exit(&state).await;

        assert_eq!(store.current().theme(), Some("ocean"));
        assert!(state.cleanup_started.load(Ordering::SeqCst));
        assert!(!state.theme().flush().await);
    }

    struct StuckStore {
        loads: AtomicUsize,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl ConfigStore for StuckStore {
        fn load(&self) -> Result<Config, PersistenceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let _ = self
                .release
                .lock()
                .map(|rx| rx.recv_timeout(Duration::from_secs(5)));
            Ok(Config::new())
        }

        fn save(&self, _config: &Config) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cleanup_gives_up_after_timeout_and_runs_once() {
        let (release_tx, release_rx) = mpsc::channel();
        let store = Arc::new(StuckStore {
            loads: AtomicUsize::new(0),
            release: Mutex::new(release_rx),
        });
        let options = UiStateOptions {
            flush_timeout_ms: 100,
            ..UiStateOptions::default()
        };
        let state = UiState::start(
            options,
            store,
            Arc::new(ManualScheduler::new()),
            Arc::new(LatestStyleBindings::default()),
        )
        .expect("start");

        let started = std::time::Instant::now();
        cleanup_before_exit(&state).await;
        assert!(started.elapsed() < Duration::from_secs(3));

        let again = std::time::Instant::now();
        cleanup_before_exit(&state).await;
        assert!(again.elapsed() < Duration::from_millis(50));

        let _ = release_tx.send(());
    }
}
