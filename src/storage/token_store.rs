//! 本地存储 - 保存登录 token
//!
//! 文件内容是一个扁平的 JSON 对象，登录流程写入 `token` 键

use crate::error::StorageError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// token 在存储中的键名
pub const TOKEN_KEY: &str = "token";

/// 读取登录 token 的能力
pub trait TokenStore: Send + Sync {
    /// 读取 token，不存在或为空返回 None
    fn token(&self) -> Result<Option<String>, StorageError>;
}

/// 基于 JSON 文件的本地存储
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入 token（供 login 命令使用）
    pub fn save_token(&self, token: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)
    }

    /// 删除 token，其它键保持不变
    pub fn clear_token(&self) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| StorageError::ReadFailed {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::Corrupted {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupted {
            path: self.path.display().to_string(),
            source: e,
        })?;

        std::fs::write(&self.path, content).map_err(|e| StorageError::WriteFailed {
            path: self.path.display().to_string(),
            source: e,
        })?;

        debug!("已写入本地存储: {}", self.path.display());
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Result<Option<String>, StorageError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }
}

/// 内存存储
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(str::to_string)),
        }
    }

    pub fn set(&self, token: Option<&str>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token.map(str::to_string);
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .token
            .lock()
            .ok()
            .and_then(|t| t.clone())
            .filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("storage.json"));
        assert_eq!(store.token().unwrap(), None);
    }

    #[test]
    fn test_save_and_clear_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.save_token("abc.def").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc.def"));

        store.clear_token().unwrap();
        assert_eq!(store.token().unwrap(), None);

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"token":""}"#).unwrap();
        assert_eq!(FileTokenStore::new(&path).token().unwrap(), None);
    }

    #[test]
    fn test_corrupted_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileTokenStore::new(&path).token(),
            Err(StorageError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new(None);
        assert_eq!(store.token().unwrap(), None);
        store.set(Some("t"));
        assert_eq!(store.token().unwrap().as_deref(), Some("t"));
    }
}
