//! Usage: Run synchronous collaborator calls on the tokio blocking pool with a labeled join error.

pub(crate) async fn run<T, F>(label: &'static str, f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(err) => Err(format!("TASK_JOIN: {label}: {err}")),
    }
}
