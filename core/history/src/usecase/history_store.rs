//! 閲覧履歴ストア（HistoryStore）
//!
//! メモリ上の History をキー・値ストアの 1 キーに JSON 配列として保存する。
//! 変更操作（add / remove / prune / clear）は毎回、結果に関わらず save まで行う。
//! シングルトンではなく、wiring で組み立てて main が所有する。

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::error::Error;
use common::ports::outbound::{Clock, KeyValueStore, Log, LogLevel, LogRecord};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{History, MovieRecord, NewMovie};

/// 履歴を保存するキー
pub const HISTORY_KEY: &str = "movie-history";

pub struct HistoryStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    key: String,
    history: History,
}

impl HistoryStore {
    /// 既定キー（[`HISTORY_KEY`]）で空のストアを作る。load するまでは空。
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self::with_key(kv, clock, log, HISTORY_KEY)
    }

    pub fn with_key(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            kv,
            clock,
            log,
            key: key.into(),
            history: History::new(),
        }
    }

    /// 現在の履歴（追加順）
    pub fn records(&self) -> &[MovieRecord] {
        self.history.records()
    }

    /// 保存済みの履歴でメモリ上の履歴を丸ごと差し替える。
    ///
    /// 値が無い（空文字を含む）場合は何もしない。JSON 配列でなければ Err を返し、
    /// メモリ上の履歴は変えない。配列の各要素は MovieRecord::from_stored で復元し、
    /// 復元できない要素と重複 id は warn ログを出して捨てる。
    pub fn load(&mut self) -> Result<(), Error> {
        let raw = match self.kv.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(()),
        };
        let items: Vec<Value> = serde_json::from_str(&raw).map_err(|e| {
            Error::json(format!("stored history under '{}': {}", self.key, e))
        })?;

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match MovieRecord::from_stored(item) {
                Ok(record) => records.push(record),
                Err(reason) => self.emit(
                    LogRecord::new(LogLevel::Warn, "history record dropped", "usecase", "history")
                        .field("index", index)
                        .field("reason", reason.to_string()),
                ),
            }
        }

        let duplicates = self.history.replace(records);
        if duplicates > 0 {
            self.emit(
                LogRecord::new(LogLevel::Warn, "duplicate history ids dropped", "usecase", "history")
                    .field("count", duplicates),
            );
        }
        self.emit(self.op_record("load"));
        Ok(())
    }

    /// メモリ上の履歴を JSON 配列にしてキーへ上書き保存する。
    pub fn save(&self) -> Result<(), Error> {
        let json = serde_json::to_string(self.history.records())?;
        self.kv.set(&self.key, &json)
    }

    /// 記録を組み立てて末尾に追加し、保存する。
    ///
    /// 同じ id が既にあれば履歴は変えない（addedAt も更新しない）が、保存は行う。
    /// id が空なら何もせず `Error::InvalidArgument`。
    pub fn add(&mut self, movie: NewMovie) -> Result<(), Error> {
        if movie.id.trim().is_empty() {
            return Err(Error::invalid_argument("movie id must not be empty"));
        }
        let record = MovieRecord::from_new(movie, self.now());
        let id = record.id.clone();
        let inserted = self.history.insert(record);
        self.emit(
            self.op_record("add")
                .field("id", id)
                .field("inserted", inserted),
        );
        self.save()
    }

    /// id の記録を取り除いて保存する（無ければ取り除かずに保存だけ）。
    pub fn remove(&mut self, id: &str) -> Result<(), Error> {
        let removed = self.history.remove(id);
        self.emit(
            self.op_record("remove")
                .field("id", id)
                .field("removed", removed),
        );
        self.save()
    }

    /// addedAt が「現在 − max_age_days 日」以前の記録を取り除いて保存する。
    pub fn prune_older_than(&mut self, max_age_days: u32) -> Result<(), Error> {
        let cutoff = self
            .now()
            .checked_sub_signed(Duration::days(i64::from(max_age_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let removed = self.history.retain_newer_than(cutoff);
        self.emit(
            self.op_record("prune")
                .field("max_age_days", max_age_days)
                .field("removed", removed),
        );
        self.save()
    }

    /// 全件を消して空の配列を保存する。
    pub fn clear(&mut self) -> Result<(), Error> {
        let removed = self.history.clear();
        self.emit(self.op_record("clear").field("removed", removed));
        self.save()
    }

    fn now(&self) -> DateTime<Utc> {
        let ms = i64::try_from(self.clock.now_ms()).unwrap_or(i64::MAX);
        Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
    }

    fn op_record(&self, op: &str) -> LogRecord {
        LogRecord::new(LogLevel::Info, format!("history {}", op), "usecase", "history")
            .field("key", self.key.as_str())
            .field("count", self.history.records().len())
    }

    /// ログの失敗は操作を失敗させない
    fn emit(&self, record: LogRecord) {
        let _ = self.log.log(&record);
    }
}
