//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリと保持期間を環境変数から解決する。
//! main / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// prune の既定保持日数
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. MOVIE_HISTORY_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/movie-history（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/movie-history
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// prune の既定保持日数（MOVIE_HISTORY_RETENTION_DAYS、未設定・不正なら 30）
    fn retention_days(&self) -> u32;
}
