//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。main で `exit_code()` に変換して終了する。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル・ストレージ I/O の失敗
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ／パース失敗
    #[error("invalid JSON: {0}")]
    Json(String),
    /// 環境変数・設定の解決失敗
    #[error("{0}")]
    Env(String),
    /// 引数不正
    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// sysexits.h に準じた終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::Io(_) => 74,
            Error::Env(_) => 70,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);

        let err = Error::io_msg("disk full");
        assert_eq!(err.exit_code(), 74);

        let err = Error::env("HOME is not set");
        assert_eq!(err.exit_code(), 70);
    }

    #[test]
    fn test_from_serde_json_error() {
        let e = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: Error = e.into();
        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.exit_code(), 65);
        assert!(err.to_string().starts_with("invalid JSON: "));
    }
}
