//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::HomeDir;
use crate::error::Error;
use crate::ports::outbound::env_resolver::DEFAULT_RETENTION_DAYS;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "movie-history";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        home_dir_from(|k| env::var(k).ok())
    }

    fn retention_days(&self) -> u32 {
        retention_days_from(env::var("MOVIE_HISTORY_RETENTION_DAYS").ok().as_deref())
    }
}

/// 環境変数の参照関数からホームディレクトリを解決する（空文字は未設定扱い）
fn home_dir_from(var: impl Fn(&str) -> Option<String>) -> Result<HomeDir, Error> {
    let get = |k: &str| var(k).filter(|s| !s.is_empty());

    if let Some(home) = get("MOVIE_HISTORY_HOME") {
        return Ok(HomeDir::new(PathBuf::from(home)));
    }

    let config_base = get("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| get("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| Error::env("HOME is not set"))?;

    Ok(HomeDir::new(config_base.join(APP_DIR)))
}

fn retention_days_from(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_RETENTION_DAYS)
}
