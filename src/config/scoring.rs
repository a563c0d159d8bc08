//! Scoring configuration loading from config.toml
//!
//! The score engine is a pure function of (card, configuration): rarity
//! tiers, the curated bonus list, per-item bonuses, and rank thresholds are
//! all injected through [`ScoringConfig`] rather than living as module
//! globals. A complete built-in [`Default`] makes config.toml optional;
//! when present, the file replaces the defaults wholesale.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Scoring tables; omitted sections fall back to the built-in defaults
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// A rarity tier matched by case-insensitive substring against the rarity label.
///
/// Tiers are evaluated in list order and the first match wins, so earlier
/// entries take priority regardless of keyword specificity.
#[derive(Debug, Deserialize, Clone)]
pub struct RarityTier {
    /// Display name of the tier (e.g., "HYPER", "DOUBLE_RARE")
    pub name: String,
    /// Keywords searched for in the rarity label, case-insensitive
    pub keywords: Vec<String>,
    /// Base points awarded for a card in this tier
    pub points: u32,
}

/// Tier of a curated bonus-list entry.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum BonusTier {
    /// Highest bonus tier (grail-of-grails chase cards)
    #[serde(rename = "GOD")]
    God,
    /// Mid bonus tier
    #[serde(rename = "GRAIL")]
    Grail,
    /// Low bonus tier
    #[serde(rename = "CHASE")]
    Chase,
}

/// A curated bonus-list entry identifying one specific printing.
///
/// Matching requires exact set-id equality and collector-number equality
/// after stripping any `/total` suffix and leading zeros.
#[derive(Debug, Deserialize, Clone)]
pub struct BonusEntry {
    /// Set identifier, compared exactly (e.g., "base1")
    pub set_id: String,
    /// Collector number, compared after canonicalization (e.g., "4" matches "4/102" and "004")
    pub card_number: String,
    /// Bonus tier awarded on match
    pub tier: BonusTier,
}

/// Bonus points awarded per [`BonusTier`].
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BonusPoints {
    /// Points for a GOD-tier match
    pub god: u32,
    /// Points for a GRAIL-tier match
    pub grail: u32,
    /// Points for a CHASE-tier match
    pub chase: u32,
}

impl BonusPoints {
    /// Returns the point value for the given tier.
    #[must_use]
    pub const fn for_tier(self, tier: BonusTier) -> u32 {
        match tier {
            BonusTier::God => self.god,
            BonusTier::Grail => self.grail,
            BonusTier::Chase => self.chase,
        }
    }
}

/// A collector rank with its minimum score threshold.
#[derive(Debug, Deserialize, Clone)]
pub struct Rank {
    /// Display name of the rank (e.g., "Bronze")
    pub name: String,
    /// Minimum aggregate score required to hold this rank
    pub min_score: u32,
}

/// Complete scoring configuration injected into the score engine.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    /// Rarity tiers in priority order; first substring match wins
    pub tiers: Vec<RarityTier>,
    /// Base points for cards matching no tier keyword
    pub default_points: u32,
    /// Points awarded per bonus tier
    pub bonus_points: BonusPoints,
    /// Curated bonus list of specific printings
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
    /// Points per graded item owned
    pub graded_points: u32,
    /// Points per sealed item owned
    pub sealed_points: u32,
    /// Rank thresholds ordered from lowest to highest `min_score`
    pub ranks: Vec<Rank>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let tier = |name: &str, keywords: &[&str], points: u32| RarityTier {
            name: name.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
            points,
        };

        Self {
            tiers: vec![
                tier("HYPER", &["hyper", "gold"], 50),
                tier("ILLUSTRATION", &["illustration", "special", "art"], 40),
                tier("ULTRA", &["ultra", "full art"], 30),
                tier("DOUBLE_RARE", &["double rare", "vmax", "vstar", "ex"], 25),
                tier("HOLO", &["holo"], 15),
                tier("RARE", &["rare"], 10),
            ],
            default_points: 5,
            bonus_points: BonusPoints {
                god: 500,
                grail: 250,
                chase: 100,
            },
            bonuses: Vec::new(),
            graded_points: 50,
            sealed_points: 25,
            ranks: vec![
                Rank {
                    name: "Bronze".to_string(),
                    min_score: 0,
                },
                Rank {
                    name: "Silver".to_string(),
                    min_score: 500,
                },
                Rank {
                    name: "Gold".to_string(),
                    min_score: 1500,
                },
                Rank {
                    name: "Platinum".to_string(),
                    min_score: 4000,
                },
                Rank {
                    name: "Master".to_string(),
                    min_score: 10_000,
                },
            ],
        }
    }
}

/// Loads scoring configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads scoring configuration from the default location (./config.toml),
/// falling back to the built-in defaults when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(Config::default())
    }
}
