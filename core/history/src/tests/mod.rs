//! HistoryStore と Runner のシナリオテスト（メモリストア・ファイルストア）

mod support;
