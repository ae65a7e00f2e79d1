//! Usage: Persisted user config (open JSON record) and the config store contract + adapters.
//!
//! The UI state core only owns the `theme` field; every other field is carried through
//! read-modify-write untouched.

use crate::shared::fs::{read_optional_to_string, replace_file_with_backup};
use crate::shared::mutex_ext::MutexExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const THEME_KEY: &str = "theme";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
    Load,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceError {
    kind: PersistenceErrorKind,
    message: String,
}

impl PersistenceError {
    pub fn load(message: impl Into<String>) -> Self {
        Self {
            kind: PersistenceErrorKind::Load,
            message: message.into(),
        }
    }

    pub fn save(message: impl Into<String>) -> Self {
        Self {
            kind: PersistenceErrorKind::Save,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> PersistenceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self.kind {
            PersistenceErrorKind::Load => "CONFIG_LOAD_ERROR",
            PersistenceErrorKind::Save => "CONFIG_SAVE_ERROR",
        };
        write!(f, "{code}: {}", self.message)
    }
}

impl std::error::Error for PersistenceError {}

/// Open key-value record persisted by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self, PersistenceError> {
        let raw: Value = serde_json::from_str(content)
            .map_err(|e| PersistenceError::load(format!("failed to parse config: {e}")))?;
        match raw {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PersistenceError::load(format!(
                "config root must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>, PersistenceError> {
        serde_json::to_vec_pretty(&self.0)
            .map_err(|e| PersistenceError::save(format!("failed to serialize config: {e}")))
    }

    /// Raw theme id; `None` when missing or not a string.
    pub fn theme(&self) -> Option<&str> {
        self.0.get(THEME_KEY).and_then(Value::as_str)
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.0
            .insert(THEME_KEY.to_string(), Value::String(theme.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Persistence service contract. Calls may block; the theme manager drives them from its own
/// writer task, never from the caller's thread.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<Config, PersistenceError>;
    fn save(&self, config: &Config) -> Result<(), PersistenceError>;
}

/// JSON file store. A missing file reads as an empty config.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn load(&self) -> Result<Config, PersistenceError> {
        match read_optional_to_string(&self.path).map_err(PersistenceError::load)? {
            Some(content) => Config::from_json_str(&content),
            None => Ok(Config::default()),
        }
    }

    fn save(&self, config: &Config) -> Result<(), PersistenceError> {
        let content = config.to_json_vec()?;
        replace_file_with_backup(&self.path, &content).map_err(PersistenceError::save)
    }
}

/// In-memory store with failure injection and a save history (tests, previews).
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    config: Mutex<Config>,
    saves: Mutex<Vec<Config>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config: Mutex::new(config),
            ..Self::default()
        }
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn current(&self) -> Config {
        self.config.lock_or_recover().clone()
    }

    pub fn saves(&self) -> Vec<Config> {
        self.saves.lock_or_recover().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Config, PersistenceError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(PersistenceError::load("injected load failure"));
        }
        Ok(self.current())
    }

    fn save(&self, config: &Config) -> Result<(), PersistenceError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(PersistenceError::save("injected save failure"));
        }
        *self.config.lock_or_recover() = config.clone();
        self.saves.lock_or_recover().push(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fs::test_support::unique_tmp_dir;
    use serde_json::json;

    #[test]
    fn config_theme_reads_only_string_values() {
        let cfg = Config::from_json_str(r#"{"theme":"ocean","lang":"zh"}"#).expect("parse");
        assert_eq!(cfg.theme(), Some("ocean"));

        let cfg = Config::from_json_str(r#"{"theme":42}"#).expect("parse");
        assert_eq!(cfg.theme(), None);

        assert_eq!(Config::default().theme(), None);
    }

    #[test]
    fn config_rejects_non_object_roots() {
        let err = Config::from_json_str("[1,2]").unwrap_err();
        assert_eq!(err.kind(), PersistenceErrorKind::Load);
        assert_eq!(
            err.to_string(),
            "CONFIG_LOAD_ERROR: config root must be an object, got array"
        );

        let err = Config::from_json_str("{not json").unwrap_err();
        assert_eq!(err.kind(), PersistenceErrorKind::Load);
    }

    #[test]
    fn set_theme_preserves_other_fields() {
        let mut cfg = Config::new();
        cfg.insert("language", json!("zh-CN"));
        cfg.insert("window", json!({"width": 1280}));
        cfg.set_theme("purple");

        assert_eq!(cfg.theme(), Some("purple"));
        assert_eq!(cfg.get("language"), Some(&json!("zh-CN")));
        assert_eq!(cfg.get("window"), Some(&json!({"width": 1280})));
        assert_eq!(cfg.len(), 3);
    }

    #[test]
    fn json_file_store_missing_file_loads_empty() {
        let dir = unique_tmp_dir("settings");
        let store = JsonFileConfigStore::in_dir(&dir);
        let cfg = store.load().expect("load");
        assert!(cfg.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_file_store_round_trips_unknown_fields() {
        let dir = unique_tmp_dir("settings");
        let store = JsonFileConfigStore::in_dir(&dir);
        std::fs::write(
            store.path(),
            r#"{"theme":"military","apiKey":"k","agents":[{"id":1}]}"#,
        )
        .expect("seed config");

        let mut cfg = store.load().expect("load");
        cfg.set_theme("light-rose");
        store.save(&cfg).expect("save");

        let reloaded = store.load().expect("reload");
        assert_eq!(reloaded.theme(), Some("light-rose"));
        assert_eq!(reloaded.get("apiKey"), Some(&json!("k")));
        assert_eq!(reloaded.get("agents"), Some(&json!([{"id": 1}])));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_file_store_corrupt_file_is_load_error() {
        let dir = unique_tmp_dir("settings");
        let store = JsonFileConfigStore::in_dir(&dir);
        std::fs::write(store.path(), "{{{").expect("seed corrupt config");

        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), PersistenceErrorKind::Load);
        assert!(err.to_string().starts_with("CONFIG_LOAD_ERROR:"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_store_injects_failures() {
        let store = MemoryConfigStore::new();
        store.set_fail_load(true);
        assert_eq!(
            store.load().unwrap_err().kind(),
            PersistenceErrorKind::Load
        );

        store.set_fail_save(true);
        let err = store.save(&Config::new()).unwrap_err();
        assert_eq!(err.kind(), PersistenceErrorKind::Save);
        assert!(store.saves().is_empty());
    }
}
