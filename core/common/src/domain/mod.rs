//! ドメイン型（Newtype）
//!
//! PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use std::path::PathBuf;

/// ホームディレクトリ（storage.json・logs を置く場所）のパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// キー・値ストアのファイル
    pub fn storage_file(&self) -> PathBuf {
        self.0.join("storage.json")
    }

    /// 構造化ログのファイル
    pub fn log_file(&self) -> PathBuf {
        self.0.join("logs").join("movie-history.jsonl")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
