//! テスト用のポート実装

use common::error::Error;
use common::ports::outbound::{Clock, KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// 2026-10-18T00:00:00Z
pub const T0_MS: u64 = 1_792_281_600_000;
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// 任意に進められる固定時計
#[derive(Debug)]
pub struct FixedClock(AtomicU64);

impl FixedClock {
    pub fn at(ms: u64) -> Self {
        Self(AtomicU64::new(ms))
    }

    pub fn set(&self, ms: u64) {
        self.0.store(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// 出力されたレコードを保持する Log
#[derive(Debug, Default)]
pub struct RecordingLog(Mutex<Vec<LogRecord>>);

impl RecordingLog {
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.0.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 書き込みが常に失敗するストア（容量超過など）
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::io_msg("quota exceeded"))
    }
}
