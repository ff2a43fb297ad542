//! Inbound ポート: ドライバ（main）がアプリを呼び出すインターフェース

use crate::domain::Command;
use common::error::Error;

/// 解析済みの Command を実行して終了コードを返す
///
/// ストアを所有して変更するため &mut self を取る。
pub trait UseCaseRunner {
    fn run(&mut self, command: Command) -> Result<i32, Error>;
}
