use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

/// Upper bound on `MAX_RANGE_DAYS`, roughly ten years of daily buckets.
pub const RANGE_DAYS_CEILING: i64 = 3660;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub total_seats: u64,
    pub max_range_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: load("PORT", defaults.port),
            data_path: resolve_data_path().unwrap_or(defaults.data_path),
            total_seats: load("TOTAL_SEATS", defaults.total_seats),
            max_range_days: clamp_range_limit(load("MAX_RANGE_DAYS", defaults.max_range_days)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/visitors.json"),
            total_seats: 20,
            max_range_days: 366,
        }
    }
}

fn resolve_data_path() -> Option<PathBuf> {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => {
            info!("APP_DATA_PATH not set, using default data file");
            None
        }
    }
}

fn clamp_range_limit(value: i64) -> i64 {
    let clamped = value.clamp(1, RANGE_DAYS_CEILING);
    if clamped != value {
        warn!("MAX_RANGE_DAYS {value} out of range, using {clamped}");
    }
    clamped
}

fn load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|err| {
        warn!("invalid {key} value '{raw}': {err}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or("PORT", "9090", 8080u16), 9090);
        assert_eq!(parse_or("PORT", " 9090 ", 8080u16), 9090);
        assert_eq!(parse_or("PORT", "not-a-port", 8080u16), 8080);
        assert_eq!(parse_or("TOTAL_SEATS", "-1", 20u64), 20);
    }

    #[test]
    fn range_limit_is_clamped() {
        assert_eq!(clamp_range_limit(366), 366);
        assert_eq!(clamp_range_limit(i64::MAX), RANGE_DAYS_CEILING);
        assert_eq!(clamp_range_limit(0), 1);
        assert_eq!(clamp_range_limit(-20), 1);
    }
}
