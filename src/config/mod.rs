/// Database configuration and connection management
pub mod database;

/// Scoring configuration (rarity tiers, bonus list, rank thresholds) from config.toml
pub mod scoring;
