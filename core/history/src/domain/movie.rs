//! 閲覧履歴の 1 件（MovieRecord）と入力（NewMovie）
//!
//! 保存形式は camelCase の JSON オブジェクト:
//! `{"id","title","year","poster","addedAt"}`。addedAt は RFC3339（UTC・ミリ秒）。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// poster も cover も無いときのポスター画像パス
pub const PLACEHOLDER_POSTER: &str = "./src/assets/no-poster.gif";

/// add に渡す部分的な映画情報。id 以外は省略可。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMovie {
    pub id: String,
    pub title: Option<String>,
    pub year: Option<String>,
    pub poster: Option<String>,
    /// poster の代替（poster が無いときに使う）
    pub cover: Option<String>,
}

#[cfg(test)]
impl NewMovie {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    pub fn cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

/// 閲覧履歴の 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// 追加時刻。追加後は変更しない。
    #[serde(serialize_with = "serialize_added_at")]
    pub added_at: DateTime<Utc>,
}

/// 保存データの要素を MovieRecord にできなかった理由
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoredRecordError {
    #[error("not a JSON object")]
    NotAnObject,
    #[error("missing id")]
    MissingId,
    #[error("missing or invalid addedAt")]
    InvalidAddedAt,
}

impl MovieRecord {
    /// NewMovie に既定値を適用して記録を組み立てる。
    ///
    /// 空文字は未指定と同じ扱い。
    /// - title: 指定値、なければ ""
    /// - year: 指定値、なければ ""
    /// - poster: poster → cover → [`PLACEHOLDER_POSTER`] の順
    pub fn from_new(movie: NewMovie, added_at: DateTime<Utc>) -> Self {
        let NewMovie {
            id,
            title,
            year,
            poster,
            cover,
        } = movie;
        let poster = non_empty(poster)
            .or_else(|| non_empty(cover))
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string());
        Self {
            id,
            title: non_empty(title).unwrap_or_default(),
            year: non_empty(year).unwrap_or_default(),
            poster,
            added_at,
        }
    }

    /// 保存済み JSON の 1 要素から記録を復元する。
    ///
    /// 欠けた title / year / poster は from_new と同じ規則で補う。
    /// id（旧キー `kp_id` も可）と addedAt が使えない要素は Err。
    /// id / title / year は数値でも受け付ける。
    pub fn from_stored(value: &Value) -> Result<Self, StoredRecordError> {
        let obj = value.as_object().ok_or(StoredRecordError::NotAnObject)?;
        let field = |key: &str| obj.get(key).and_then(scalar_text);

        let id = field("id")
            .or_else(|| field("kp_id"))
            .filter(|s| !s.is_empty())
            .ok_or(StoredRecordError::MissingId)?;
        let added_at = obj
            .get("addedAt")
            .and_then(Value::as_str)
            .and_then(parse_added_at)
            .ok_or(StoredRecordError::InvalidAddedAt)?;

        let movie = NewMovie {
            id,
            title: field("title"),
            year: field("year"),
            poster: field("poster"),
            cover: field("cover"),
        };
        Ok(Self::from_new(movie, added_at))
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// 文字列・数値を文字列として取り出す（それ以外は None）
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_added_at(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 追加時刻の表示・保存用の文字列（例: 2026-10-18T09:30:00.000Z）
pub fn format_added_at(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_added_at<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_added_at(dt))
}
