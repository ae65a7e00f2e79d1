//! Usage: Tracing setup (console + optional daily rolling file, `log` records bridged in).

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILTER_ENV: &str = "SHELL_UI_LOG";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "shell-ui.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Returns the file writer guard (keep it alive for the process
/// lifetime) when `log_dir` is given. A second call is a no-op apart from a warning.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false))
        .with(file_layer);

    let log_bridge = tracing_log::LogTracer::init();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        tracing::warn!("日志已初始化，跳过重复初始化: {}", err);
        return guard;
    }

    if let Err(err) = log_bridge {
        tracing::debug!("log 桥接已存在: {}", err);
    }

    if let Some(dir) = log_dir {
        tracing::info!(dir = %dir.display(), "日志初始化完成");
    }
    guard
}
