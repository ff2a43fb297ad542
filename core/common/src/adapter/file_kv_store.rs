//! JSON ファイル 1 つに全キーを保存する KeyValueStore 実装
//!
//! ファイル形式は `{"<key>": "<value>", ...}`。書き込みは一時ファイルへ書いてから rename する。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, KeyValueStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// ファイルに永続化するキー・値ストア
pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    /// set の read-modify-write を直列化する
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// ファイル全体を読む。存在しなければ空のマップ。
    fn read_all(&self) -> Result<BTreeMap<String, String>, Error> {
        if !self.fs.exists(&self.path) {
            return Ok(BTreeMap::new());
        }
        let s = self.fs.read_to_string(&self.path)?;
        if s.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&s).map_err(|e| {
            Error::json(format!("{}: {}", self.path.display(), e))
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::io_msg("storage lock poisoned"))?;
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&all)?;

        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        self.fs.write(&tmp, &json)?;
        self.fs.rename(&tmp, &self.path)
    }
}
