// src/config/config.rs
use crate::miner::worker::DEFAULT_PROGRESS_INTERVAL;
use crate::types::Header;
use crate::utils::error::MinerError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the miner
///
/// Mirrors the options of [`Coordinator`](crate::miner::Coordinator):
/// worker count, optional fixed seed for starting nonces and progress
/// frequency, plus the difficulty the binary mines at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of worker threads (0 = one per CPU core, negative is rejected
    /// when mining starts)
    #[serde(default = "default_threads")]
    pub threads: i64,

    /// Fixed seed for starting nonces; omitted means OS-seeded
    #[serde(default)]
    pub seed: Option<u64>,

    /// Attempts between per-thread progress lines (0 disables them)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,

    /// Difficulty as a decimal integer of arbitrary size
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_threads() -> i64 {
    num_cpus::get() as i64
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

fn default_difficulty() -> String {
    // 2^24: roughly sixteen million attempts per solution
    "16777216".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threads: default_threads(),
            seed: None,
            progress_interval: default_progress_interval(),
            difficulty: default_difficulty(),
        }
    }
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(MinerError)` - If file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, MinerError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            MinerError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(toml::from_str(&config_str)?)
    }

    /// Parses the configured difficulty into a mining header
    ///
    /// # Returns
    /// * `Ok(Header)` - For a positive decimal difficulty
    /// * `Err(MinerError::ConfigError)` - If the value is not a decimal
    ///   integer or is zero
    pub fn header(&self) -> Result<Header, MinerError> {
        let difficulty = self
            .difficulty
            .trim()
            .parse::<BigUint>()
            .map_err(|e| {
                MinerError::ConfigError(format!("Invalid difficulty {:?}: {}", self.difficulty, e))
            })?;
        Header::new(difficulty)
    }

    /// Generates a commented configuration template string
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# Proof-of-work miner configuration\n\n");
        template.push_str("# Number of worker threads (0 = one per CPU core)\n");
        template.push_str("threads = 0\n");
        template.push_str("# Fixed seed for starting nonces (remove for OS randomness)\n");
        template.push_str("# seed = 42\n");
        template.push_str("# Attempts between per-thread progress lines (0 = off)\n");
        template.push_str(&format!("progress_interval = {}\n", DEFAULT_PROGRESS_INTERVAL));
        template.push_str("# Difficulty, decimal; target = 2^256 / difficulty\n");
        template.push_str(&format!("difficulty = \"{}\"\n", default_difficulty()));
        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.threads, num_cpus::get() as i64);
        assert_eq!(config.progress_interval, 1_000_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_explicit_values() {
        let config: Config = toml::from_str(
            "threads = -1\nseed = 7\nprogress_interval = 0\ndifficulty = \"340282366920938463463374607431768211456\"\n",
        )
        .unwrap();
        assert_eq!(config.threads, -1);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.progress_interval, 0);

        let header = config.header().unwrap();
        assert_eq!(header.difficulty(), &(BigUint::from(1u8) << 128u32));
    }

    #[test]
    fn test_template_round_trips() {
        let config: Config = toml::from_str(&Config::generate_template()).unwrap();
        assert_eq!(config.threads, 0);
        assert_eq!(config.seed, None);
        assert!(config.header().is_ok());
    }

    #[test]
    fn test_bad_difficulties_are_config_errors() {
        for bad in ["0", "-5", "abc", ""] {
            let config = Config {
                difficulty: bad.into(),
                ..Config::default()
            };
            assert!(
                matches!(config.header(), Err(MinerError::ConfigError(_))),
                "difficulty {:?} must be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/pow-miner.toml").unwrap_err();
        assert!(matches!(err, MinerError::ConfigError(_)));
    }
}
