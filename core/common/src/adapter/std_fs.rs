//! 標準ファイルシステム実装（std::fs を委譲）

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::path::Path;

/// 標準ライブラリの fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::io_msg(format!("Failed to read '{}': {}", path.display(), e))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(|e| {
            Error::io_msg(format!("Failed to write '{}': {}", path.display(), e))
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::rename(from, to).map_err(|e| {
            Error::io_msg(format!(
                "Failed to rename '{}' to '{}': {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::io_msg(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }


    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_write_read_and_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.txt");
        let fs = StdFileSystem;
        assert!(!fs.exists(&path));
        fs.write(&path, "hello").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_open_append_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("log.jsonl");
        let fs = StdFileSystem;
        for line in ["a\n", "b\n"] {
            let mut w = fs.open_append(&path).unwrap();
            w.write_all(line.as_bytes()).unwrap();
        }
        assert_eq!(fs.read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = StdFileSystem
            .read_to_string(&tmp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
