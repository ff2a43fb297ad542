//! キー・値ストア Outbound ポート
//!
//! ブラウザの localStorage 相当。文字列キーに文字列値を 1 つだけ持つ同期ストア。

use crate::error::Error;

/// 永続キー・値ストア（Outbound ポート）
///
/// 実装は `common::adapter::FileKeyValueStore`（JSON ファイル）や
/// `common::adapter::MemoryKeyValueStore`（テスト用）など。
pub trait KeyValueStore: Send + Sync {
    /// キーの値を返す。未設定なら Ok(None)。
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// キーに値を書き込む（既存値は上書き）。戻った時点で永続化済み。
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}
