//! Usage: Update-check collaborator contract (payload shapes + `Updater` trait) and the bridge that
//! renders update progress as toasts.

use crate::shared::mutex_ext::MutexExt;
use crate::toast::{ToastId, ToastKind, ToastQueue};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub const UPDATE_PROGRESS_EVENT_NAME: &str = "update:progress";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub has_update: bool,
    pub latest_version: String,
    pub current_version: String,
    pub release_url: String,
    pub release_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    Checking,
    Downloading,
    Installing,
    Completed,
    Error,
}

impl UpdateStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProgress {
    pub status: UpdateStatus,
    pub message: String,
    /// 0-100.
    pub percent: u8,
}

/// Host-provided update workflow. Calls may block (network, installer); callers run them off the
/// UI thread.
pub trait Updater: Send + Sync {
    fn check_for_update(&self) -> UpdateInfo;
    fn apply_update(&self) -> Result<String, String>;
    fn restart(&self) -> Result<String, String>;
    fn current_version(&self) -> String;
}

fn progress_text(progress: &UpdateProgress) -> String {
    if progress.status.is_terminal() || progress.percent == 0 {
        return progress.message.clone();
    }
    format!("{} ({}%)", progress.message, progress.percent.min(100))
}

/// Keeps at most one live progress toast: a loading toast while the update runs, turned into a
/// success/error toast (which then auto-dismisses) when it finishes.
#[derive(Debug)]
pub struct UpdateToastBridge {
    toasts: ToastQueue,
    active: Mutex<Option<ToastId>>,
}

impl UpdateToastBridge {
    pub fn new(toasts: ToastQueue) -> Self {
        Self {
            toasts,
            active: Mutex::new(None),
        }
    }

    pub fn active_toast(&self) -> Option<ToastId> {
        *self.active.lock_or_recover()
    }

    pub fn on_progress(&self, progress: &UpdateProgress) {
        let text = progress_text(progress);
        let kind = match progress.status {
            UpdateStatus::Completed => ToastKind::Success,
            UpdateStatus::Error => ToastKind::Error,
            UpdateStatus::Checking | UpdateStatus::Downloading | UpdateStatus::Installing => {
                ToastKind::Loading
            }
        };

        let mut active = self.active.lock_or_recover();
        let current = *active;
        let updated = current.is_some_and(|id| self.toasts.update(id, kind, text.clone()));

        *active = if progress.status.is_terminal() {
            if !updated {
                self.toasts.push(kind, text);
            }
            None
        } else if updated {
            current
        } else {
            Some(self.toasts.push(kind, text))
        };

        if progress.status == UpdateStatus::Error {
            tracing::warn!(message = %progress.message, "更新失败");
        } else {
            tracing::debug!(status = ?progress.status, percent = progress.percent, "更新进度");
        }
    }

    /// Shows the outcome of a manual update check.
    pub fn report_check(&self, info: &UpdateInfo) -> ToastId {
        let error = info.error.as_deref().filter(|e| !e.trim().is_empty());
        if let (Some(err), false) = (error, info.has_update) {
            return self
                .toasts
                .push(ToastKind::Error, format!("检查更新失败: {err}"));
        }

        if info.has_update {
            self.toasts.push(
                ToastKind::Success,
                format!("发现新版本 v{}", info.latest_version.trim_start_matches('v')),
            )
        } else {
            self.toasts.push(
                ToastKind::Success,
                format!(
                    "已是最新版本 v{}",
                    info.current_version.trim_start_matches('v')
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::timer::ManualScheduler;
    use std::sync::Arc;
    use std::time::Duration;

    fn progress(status: UpdateStatus, message: &str, percent: u8) -> UpdateProgress {
        UpdateProgress {
            status,
            message: message.to_string(),
            percent,
        }
    }

    fn bridge() -> (UpdateToastBridge, ToastQueue, Arc<ManualScheduler>) {
        let clock = Arc::new(ManualScheduler::new());
        let toasts = ToastQueue::new(clock.clone());
        (UpdateToastBridge::new(toasts.clone()), toasts, clock)
    }

    #[test]
    fn progress_reuses_a_single_loading_toast() {
        let (bridge, toasts, _clock) = bridge();

        bridge.on_progress(&progress(UpdateStatus::Checking, "正在检查更新", 0));
        bridge.on_progress(&progress(UpdateStatus::Downloading, "正在下载", 40));
        bridge.on_progress(&progress(UpdateStatus::Installing, "正在安装", 90));

        let items = toasts.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ToastKind::Loading);
        assert_eq!(items[0].message, "正在安装 (90%)");
        assert_eq!(bridge.active_toast(), Some(items[0].id));
    }

    #[test]
    fn completion_turns_loading_toast_into_expiring_success() {
        let (bridge, toasts, clock) = bridge();

        bridge.on_progress(&progress(UpdateStatus::Downloading, "正在下载", 10));
        bridge.on_progress(&progress(UpdateStatus::Completed, "更新完成，请重启", 100));

        let items = toasts.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ToastKind::Success);
        assert_eq!(items[0].message, "更新完成，请重启");
        assert_eq!(bridge.active_toast(), None);

        clock.advance(Duration::from_millis(2000));
        assert!(toasts.is_empty());
    }

    #[test]
    fn error_without_prior_progress_pushes_error_toast() {
        let (bridge, toasts, _clock) = bridge();
        bridge.on_progress(&progress(UpdateStatus::Error, "下载失败", 0));

        let items = toasts.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ToastKind::Error);
        assert_eq!(bridge.active_toast(), None);
    }

    #[test]
    fn dismissed_progress_toast_is_recreated() {
        let (bridge, toasts, _clock) = bridge();
        bridge.on_progress(&progress(UpdateStatus::Downloading, "正在下载", 10));
        let first = bridge.active_toast().expect("active");
        assert!(toasts.dismiss(first));

        bridge.on_progress(&progress(UpdateStatus::Downloading, "正在下载", 50));
        let second = bridge.active_toast().expect("active");
        assert_ne!(first, second);
        assert_eq!(toasts.items()[0].message, "正在下载 (50%)");
    }

    #[test]
    fn report_check_describes_outcome() {
        let (bridge, toasts, _clock) = bridge();

        let info = UpdateInfo {
            has_update: true,
            latest_version: "v1.2.0".to_string(),
            current_version: "1.1.0".to_string(),
            ..UpdateInfo::default()
        };
        bridge.report_check(&info);

        let info = UpdateInfo {
            current_version: "1.1.0".to_string(),
            error: Some("网络错误".to_string()),
            ..UpdateInfo::default()
        };
        bridge.report_check(&info);

        let messages: Vec<(ToastKind, String)> = toasts
            .items()
            .into_iter()
            .map(|t| (t.kind, t.message))
            .collect();
        assert_eq!(
            messages,
            vec![
                (ToastKind::Success, "发现新版本 v1.2.0".to_string()),
                (ToastKind::Error, "检查更新失败: 网络错误".to_string()),
            ]
        );
    }

    #[test]
    fn update_info_uses_camel_case_wire_names() {
        let info: UpdateInfo = serde_json::from_str(
            r#"{"hasUpdate":true,"latestVersion":"1.0.1","currentVersion":"1.0.0","releaseUrl":"u","releaseNotes":"n"}"#,
        )
        .expect("deserialize");
        assert!(info.has_update);
        assert_eq!(info.error, None);

        let progress: UpdateProgress =
            serde_json::from_str(r#"{"status":"downloading","message":"m","percent":42}"#)
                .expect("deserialize");
        assert_eq!(progress.status, UpdateStatus::Downloading);
    }
}
