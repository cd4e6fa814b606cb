//! Game configuration: the designer-tunable values, loadable from RON,
//! TOML or JSON with extension-based format detection.
//!
//! Every field has a default matching the shipped game, so a config file
//! only needs to name what it changes.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Tier counts the progress array layout supports.
pub const TIER_COUNT_RANGE: RangeInclusive<u32> = 5..=10;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported config format: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting config formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The tier count falls outside [`TIER_COUNT_RANGE`].
    #[error("tier count {got} outside supported range {}..={}", TIER_COUNT_RANGE.start(), TIER_COUNT_RANGE.end())]
    TierCountRange { got: u32 },

    /// The challenge tier window is empty, reversed, or past the campaign.
    #[error("challenge tier bounds {min}..{max} invalid for {tier_count} tiers")]
    ChallengeTierBounds {
        min: u32,
        max: u32,
        tier_count: u32,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Detect the format of a config file from its extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// The designer-tunable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of difficulty tiers (the challenge tier is extra).
    pub tier_count: u32,
    /// Coin cost of one hint reveal.
    pub hint_cost: i64,
    /// Solution tiles revealed per hint.
    pub hints_per_reveal: usize,
    /// Coin cost of entering a challenge without watching an ad.
    pub challenge_entry_cost: i64,
    /// Coins awarded for winning a challenge.
    pub challenge_reward: i64,
    /// Seconds allowed inside a challenge attempt.
    pub challenge_time_limit_secs: f64,
    /// Seconds of cooldown between challenge attempts.
    pub challenge_cooldown_secs: f64,
    /// Coins of the once-per-day login reward.
    pub daily_reward: i64,
    /// Lowest tier a challenge level is drawn from.
    pub min_challenge_tier: u32,
    /// One past the highest tier a challenge level is drawn from.
    pub max_challenge_tier: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tier_count: 5,
            hint_cost: 25,
            hints_per_reveal: 5,
            challenge_entry_cost: 25,
            challenge_reward: 50,
            challenge_time_limit_secs: 30.0,
            challenge_cooldown_secs: 1800.0,
            daily_reward: 35,
            min_challenge_tier: 2,
            max_challenge_tier: 3,
        }
    }
}

impl GameConfig {
    /// Read and validate a config file, detecting the format from the
    /// extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = detect_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: GameConfig = match format {
            Format::Ron => ron::from_str(&content).map_err(|e| ConfigError::Parse {
                file: path.to_path_buf(),
                detail: e.to_string(),
            })?,
            Format::Toml => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                file: path.to_path_buf(),
                detail: e.to_string(),
            })?,
            Format::Json => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                file: path.to_path_buf(),
                detail: e.to_string(),
            })?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Scan `dir` for `{base_name}.ron` / `.toml` / `.json`. Returns
    /// `Ok(None)` when no file exists and an error when several formats
    /// exist side by side.
    pub fn find(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, ConfigError> {
        let mut found: Option<PathBuf> = None;
        for ext in ["ron", "toml", "json"] {
            let candidate = dir.join(format!("{base_name}.{ext}"));
            if candidate.exists() {
                if let Some(existing) = found {
                    return Err(ConfigError::ConflictingFormats {
                        a: existing,
                        b: candidate,
                    });
                }
                found = Some(candidate);
            }
        }
        Ok(found)
    }

    /// Check the cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TIER_COUNT_RANGE.contains(&self.tier_count) {
            return Err(ConfigError::TierCountRange {
                got: self.tier_count,
            });
        }
        if self.min_challenge_tier >= self.max_challenge_tier
            || self.max_challenge_tier > self.tier_count
        {
            return Err(ConfigError::ChallengeTierBounds {
                min: self.min_challenge_tier,
                max: self.max_challenge_tier,
                tier_count: self.tier_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("oneline-config-tests")
            .join(format!("{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_validate() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn loads_partial_toml_over_defaults() {
        let dir = scratch_dir("toml");
        let path = dir.join("game.toml");
        fs::write(&path, "tier_count = 7\nhint_cost = 40\n").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.tier_count, 7);
        assert_eq!(config.hint_cost, 40);
        // Untouched fields keep their defaults.
        assert_eq!(config.hints_per_reveal, 5);
        assert_eq!(config.challenge_cooldown_secs, 1800.0);
    }

    #[test]
    fn loads_ron_and_json() {
        let dir = scratch_dir("formats");

        let ron_path = dir.join("game.ron");
        fs::write(&ron_path, "(tier_count: 6)").unwrap();
        assert_eq!(GameConfig::load(&ron_path).unwrap().tier_count, 6);

        let json_path = dir.join("game.json");
        fs::write(&json_path, r#"{"daily_reward": 50}"#).unwrap();
        assert_eq!(GameConfig::load(&json_path).unwrap().daily_reward, 50);
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(matches!(
            GameConfig::load(Path::new("game.yaml")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_tier_counts() {
        let mut config = GameConfig::default();
        config.tier_count = 4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TierCountRange { got: 4 })
        ));
        config.tier_count = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_challenge_windows() {
        let mut config = GameConfig::default();
        config.min_challenge_tier = 3;
        config.max_challenge_tier = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ChallengeTierBounds { .. })
        ));

        config.min_challenge_tier = 2;
        config.max_challenge_tier = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn find_prefers_nothing_and_flags_conflicts() {
        let dir = scratch_dir("find");
        assert!(GameConfig::find(&dir, "game").unwrap().is_none());

        fs::write(dir.join("game.toml"), "").unwrap();
        assert_eq!(
            GameConfig::find(&dir, "game").unwrap(),
            Some(dir.join("game.toml"))
        );

        fs::write(dir.join("game.json"), "{}").unwrap();
        assert!(matches!(
            GameConfig::find(&dir, "game"),
            Err(ConfigError::ConflictingFormats { .. })
        ));
    }
}
