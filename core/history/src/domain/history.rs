//! 閲覧履歴の列（History）
//!
//! 追加順を保つ。id は常に一意で、同じ id の 2 件目以降は捨てる（先勝ち）。
//! 永続化はここでは行わない（usecase::HistoryStore が担当）。

use chrono::{DateTime, Utc};

use super::movie::MovieRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MovieRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// 列を丸ごと差し替える。重複 id は先頭側を残し、捨てた件数を返す。
    pub fn replace(&mut self, records: Vec<MovieRecord>) -> usize {
        let total = records.len();
        self.records = Vec::with_capacity(total);
        for record in records {
            self.insert(record);
        }
        total - self.records.len()
    }

    /// 末尾に追加する。同じ id があれば何もせず false。
    pub fn insert(&mut self, record: MovieRecord) -> bool {
        if self.contains(&record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// id の記録を取り除く。取り除いたら true。
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// added_at が cutoff より新しい記録だけを残し、取り除いた件数を返す。
    /// cutoff ちょうどの記録は取り除く。
    pub fn retain_newer_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.added_at > cutoff);
        before - self.records.len()
    }

    /// 全件を消し、消した件数を返す。
    pub fn clear(&mut self) -> usize {
        let n = self.records.len();
        self.records.clear();
        n
    }
}
