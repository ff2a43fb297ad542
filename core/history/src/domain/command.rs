//! movie-history コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の Runner で match してディスパッチする。

use super::movie::NewMovie;

/// movie-history のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ヘルプ表示
    Help,

    /// 履歴一覧（コマンド未指定時も一覧）
    List,

    /// 履歴に追加（add <id> [--title] [--year] [--poster] [--cover]）
    Add(NewMovie),

    /// 履歴から削除（remove <id>）
    Remove { id: String },

    /// 保持期間より古い記録を削除（prune [--days N]）。None なら設定の既定日数。
    Prune { days: Option<u32> },

    /// 全件削除
    Clear,
}

impl Command {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::List => "list",
            Command::Add(_) => "add",
            Command::Remove { .. } => "remove",
            Command::Prune { .. } => "prune",
            Command::Clear => "clear",
        }
    }
}
