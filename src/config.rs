use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Region bucket used in the stats keys, e.g. "world"
    pub region: String,
    /// Rank bucket, e.g. "emerald_plus"
    pub rank: String,
    pub cache_dir: PathBuf,
    pub cache_ttl_hours: i64,
    pub timeout_secs: u64,
    pub requests_per_second: u32,
    /// Champion whose counter page doubles as the meta list for a role
    pub meta_reference: String,
    pub source_delay_ms: u64,
    /// The running League client writes its local API port and password here
    pub lockfile_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region: "world".to_string(),
            rank: "emerald_plus".to_string(),
            cache_dir: default_cache_dir(),
            cache_ttl_hours: 72,
            timeout_secs: 10,
            requests_per_second: 2,
            meta_reference: "aatrox".to_string(),
            source_delay_ms: 300,
            lockfile_path: default_lockfile_path(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            region: env::var("COUNTER_PICK_REGION").unwrap_or(defaults.region),
            rank: env::var("COUNTER_PICK_RANK").unwrap_or(defaults.rank),
            cache_dir: env::var("COUNTER_PICK_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            cache_ttl_hours: parse_var("COUNTER_PICK_CACHE_TTL_HOURS", defaults.cache_ttl_hours)?,
            timeout_secs: parse_var("COUNTER_PICK_TIMEOUT_SECS", defaults.timeout_secs)?,
            requests_per_second: parse_var(
                "COUNTER_PICK_REQUESTS_PER_SECOND",
                defaults.requests_per_second,
            )?,
            meta_reference: env::var("COUNTER_PICK_META_REFERENCE")
                .unwrap_or(defaults.meta_reference),
            source_delay_ms: defaults.source_delay_ms,
            lockfile_path: env::var("COUNTER_PICK_LOCKFILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.lockfile_path),
        })
    }

    /// Rank tier bucket as it appears in stats keys: `world_emerald_plus`.
    pub fn rank_tier(&self) -> String {
        format!("{}_{}", self.region, self.rank).to_lowercase()
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".counter_pick")
}

fn default_lockfile_path() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/League of Legends.app/Contents/LoL/lockfile")
    } else {
        PathBuf::from(r"C:\Riot Games\League of Legends\lockfile")
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(format!("{} must be a number, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_tier_is_lower_cased() {
        let config = Config {
            region: "World".to_string(),
            rank: "Emerald_Plus".to_string(),
            ..Config::default()
        };
        assert_eq!(config.rank_tier(), "world_emerald_plus");
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("COUNTER_PICK_TEST_GARBAGE", "three");
        let result: Result<u64, _> = parse_var("COUNTER_PICK_TEST_GARBAGE", 10);
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        let fallback: u64 = parse_var("COUNTER_PICK_TEST_UNSET", 10).unwrap();
        assert_eq!(fallback, 10);
    }
}
