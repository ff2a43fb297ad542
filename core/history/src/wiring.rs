//! 配線: 標準アダプタで HistoryStore を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, FileKeyValueStore, StdClock, StdEnvResolver, StdFileSystem};
use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::{Clock, EnvResolver, FileSystem, KeyValueStore, Log};

use crate::usecase::HistoryStore;

/// 配線で組み立てたアプリ（main の Command ディスパッチで利用）
pub struct App {
    pub home_dir: HomeDir,
    pub store: HistoryStore,
    /// 構造化ログ（ファイルへ JSONL）。エラー時のコンソール表示とは別。
    pub logger: Arc<dyn Log>,
    /// prune --days 省略時の保持日数
    pub retention_days: u32,
}

/// 配線: 標準アダプタで App を組み立てる。
///
/// home_override（-d/--home-dir）があれば環境変数より優先する。
pub fn wire_app(home_override: Option<&str>) -> Result<App, Error> {
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let home_dir = match home_override.filter(|s| !s.is_empty()) {
        Some(dir) => HomeDir::new(dir),
        None => env_resolver.resolve_home_dir()?,
    };
    Ok(wire_with_home(home_dir, env_resolver.retention_days(), Arc::new(StdClock)))
}

/// ホームディレクトリと時計を指定して App を組み立てる（テストから時計を差し替える）
pub fn wire_with_home(home_dir: HomeDir, retention_days: u32, clock: Arc<dyn Clock>) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let logger: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), home_dir.log_file()));
    let kv: Arc<dyn KeyValueStore> =
        Arc::new(FileKeyValueStore::new(Arc::clone(&fs), home_dir.storage_file()));
    let store = HistoryStore::new(kv, clock, Arc::clone(&logger));
    App {
        home_dir,
        store,
        logger,
        retention_days,
    }
}
