//! Usage: Update / lifecycle commands backed by the host `Updater`.

use crate::app::app_state::UiState;
use crate::blocking;
use crate::updates::{UpdateInfo, UpdateProgress, UpdateStatus, Updater};
use std::sync::Arc;

fn require_updater(state: &UiState) -> Result<Arc<dyn Updater>, String> {
    state
        .updater()
        .ok_or_else(|| "UPDATE_UNAVAILABLE: no updater configured".to_string())
}

fn progress(status: UpdateStatus, message: impl Into<String>, percent: u8) -> UpdateProgress {
    UpdateProgress {
        status,
        message: message.into(),
        percent,
    }
}

/// Checks for a newer release and reports the outcome as a toast.
pub async fn update_check(state: &UiState) -> Result<UpdateInfo, String> {
    let updater = require_updater(state)?;
    let info = blocking::run("update_check", move || Ok(updater.check_for_update())).await?;
    state.update_toasts().report_check(&info);
    Ok(info)
}

pub async fn update_apply(state: &UiState) -> Result<String, String> {
    let updater = require_updater(state)?;
    state.report_update_progress(&progress(UpdateStatus::Installing, "正在安装更新", 0));

    let result = blocking::run("update_apply", move || updater.apply_update()).await;
    let done = match &result {
        Ok(message) => progress(UpdateStatus::Completed, message.as_str(), 100),
        Err(err) => progress(UpdateStatus::Error, format!("更新失败: {err}"), 0),
    };
    state.report_update_progress(&done);
    result
}

/// Flushes pending UI state before handing control to the host restart.
pub async fn app_restart(state: &UiState) -> Result<String, String> {
    let updater = require_updater(state)?;
    crate::app::cleanup::cleanup_before_exit(state).await;
    blocking::run("app_restart", move || updater.restart()).await
}

pub fn app_version_get(state: &UiState) -> String {
    match state.updater() {
        Some(updater) => updater.current_version(),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::options::UiStateOptions;
    use crate::settings::MemoryConfigStore;
    use crate::shared::timer::ManualScheduler;
    use crate::theme::{LatestStyleBindings, ThemeVariant};
    use crate::toast::ToastKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeUpdater {
        fail_apply: bool,
        restarts: AtomicUsize,
    }

    impl Updater for FakeUpdater {
        fn check_for_update(&self) -> UpdateInfo {
            UpdateInfo {
                has_update: true,
                latest_version: "2.0.0".to_string(),
                current_version: self.current_version(),
                ..UpdateInfo::default()
            }
        }

        fn apply_update(&self) -> Result<String, String> {
            if self.fail_apply {
                return Err("UPDATE_DOWNLOAD_FAILED: timeout".to_string());
            }
            Ok("更新已安装，重启后生效".to_string())
        }

        fn restart(&self) -> Result<String, String> {
            self.restarts.fetch_add(1, Ordering::SeqCst);
            Ok("restarting".to_string())
        }

        fn current_version(&self) -> String {
            "1.9.0".to_string()
        }
    }

    fn start(store: Arc<MemoryConfigStore>) -> UiState {
        UiState::start(
            UiStateOptions::default(),
            store,
            Arc::new(ManualScheduler::new()),
            Arc::new(LatestStyleBindings::default()),
        )
        .expect("start")
    }

    #[tokio::test]
    async fn commands_without_updater_report_unavailable() {
        let state = start(Arc::new(MemoryConfigStore::new()));

        let err = update_check(&state).await.unwrap_err();
        assert!(err.starts_with("UPDATE_UNAVAILABLE:"), "{err}");
        assert!(app_restart(&state).await.is_err());
        assert_eq!(app_version_get(&state), env!("CARGO_PKG_VERSION"));
        assert!(state.toasts().is_empty());
    }

    #[tokio::test]
    async fn check_and_apply_surface_toasts() {
        let state = start(Arc::new(MemoryConfigStore::new()))
            .with_updater(Arc::new(FakeUpdater::default()));

        let info = update_check(&state).await.expect("check");
        assert!(info.has_update);
        assert_eq!(app_version_get(&state), "1.9.0");

        let message = update_apply(&state).await.expect("apply");
        assert_eq!(message, "更新已安装，重启后生效");

        let items = state.toasts().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].message, "发现新版本 v2.0.0");
        assert_eq!(items[1].kind, ToastKind::Success);
        assert_eq!(items[1].message, message);
        assert_eq!(state.update_toasts().active_toast(), None);
    }

    #[tokio::test]
    async fn failed_apply_leaves_error_toast() {
        let state = start(Arc::new(MemoryConfigStore::new())).with_updater(Arc::new(FakeUpdater {
            fail_apply: true,
            ..FakeUpdater::default()
        }));

        let err = update_apply(&state).await.unwrap_err();
        assert!(err.starts_with("UPDATE_DOWNLOAD_FAILED:"));

        let items = state.toasts().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ToastKind::Error);
        assert!(items[0].message.contains("timeout"));
    }

    #[tokio::test]
    async fn restart_flushes_theme_first() {
        let store = Arc::new(MemoryConfigStore::new());
        let updater = Arc::new(FakeUpdater::default());
        let state = start(store.clone()).with_updater(updater.clone());

        state.theme().set_theme(ThemeVariant::Orange);
        app_restart(&state).await.expect("restart");

        assert_eq!(store.current().theme(), Some("orange"));
        assert_eq!(updater.restarts.load(Ordering::SeqCst), 1);
    }
}
