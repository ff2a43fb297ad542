//! ドメイン型
//!
//! - movie: 1 件の閲覧記録と、その組み立て（既定値の適用）
//! - history: 記録の順序付き列と id 一意性の不変条件
//! - command: CLI から解析したサブコマンド

pub mod command;
pub mod history;
pub mod movie;

pub use command::Command;
pub use history::History;
pub use movie::{MovieRecord, NewMovie};
