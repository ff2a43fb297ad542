//! ユースケース層
//!
//! ポート（KeyValueStore / Clock / Log）を注入して組み立てる。

pub mod history_store;

pub use history_store::HistoryStore;
