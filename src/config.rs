//! Runtime configuration from `DAMAGE_AID_*` environment variables.
//! Bad values are logged and replaced by the default rather than aborting.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::session::analysis::DEFAULT_ANALYSIS_DELAY;

pub const BIND_VAR: &str = "DAMAGE_AID_BIND";
pub const STATE_PATH_VAR: &str = "DAMAGE_AID_STATE";
pub const ANALYSIS_DELAY_VAR: &str = "DAMAGE_AID_ANALYSIS_DELAY_MS";
pub const SEED_VAR: &str = "DAMAGE_AID_SEED";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// JSON file backing the session. `None` keeps the session in memory.
    pub state_path: Option<PathBuf>,
    pub analysis_delay: Duration,
    /// Fixed seed for the simulated classifier; `None` seeds from entropy.
    pub classifier_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            state_path: None,
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
            classifier_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let delay_ms = parse_or_default(
            non_empty(ANALYSIS_DELAY_VAR).as_deref(),
            ANALYSIS_DELAY_VAR,
            defaults.analysis_delay.as_millis() as u64,
        );

        Self {
            bind_addr: non_empty(BIND_VAR).unwrap_or(defaults.bind_addr),
            state_path: non_empty(STATE_PATH_VAR).map(PathBuf::from),
            analysis_delay: Duration::from_millis(delay_ms),
            classifier_seed: non_empty(SEED_VAR).and_then(|raw| match raw.trim().parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!("invalid {SEED_VAR} '{raw}', seeding from entropy");
                    None
                }
            }),
        }
    }
}

fn parse_or_default<T>(raw: Option<&str>, name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                warn!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().analysis_delay, Duration::from_secs(3));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            (BIND_VAR, "0.0.0.0:8080"),
            (STATE_PATH_VAR, "/tmp/session.json"),
            (ANALYSIS_DELAY_VAR, "250"),
            (SEED_VAR, "42"),
        ]);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.state_path, Some(PathBuf::from("/tmp/session.json")));
        assert_eq!(config.analysis_delay, Duration::from_millis(250));
        assert_eq!(config.classifier_seed, Some(42));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[(ANALYSIS_DELAY_VAR, "soon"), (SEED_VAR, "-1"), (BIND_VAR, " ")]);
        assert_eq!(config.analysis_delay, DEFAULT_ANALYSIS_DELAY);
        assert_eq!(config.classifier_seed, None);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }
}
