//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（main）がアプリを呼び出すインターフェース
//! - outbound: common::ports::outbound をそのまま使う

pub mod inbound;
