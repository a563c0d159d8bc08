//! Prestige score and rank engine.
//!
//! A card's base score comes from its rarity tier, matched by
//! case-insensitive substring against the rarity label in priority order
//! (first matching tier wins). A curated bonus list adds fixed points for
//! specific printings, matched by exact set id and canonicalized collector
//! number. Every table involved is injected through
//! [`ScoringConfig`](crate::config::scoring::ScoringConfig), so the engine
//! is a pure function of (card, config).

use crate::{
    config::scoring::{Rank, ScoringConfig},
    core::identity,
    entities::{Card, card},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::HashMap;

/// Canonicalizes a collector number for comparison: strips any `/total`
/// suffix, surrounding whitespace, and leading zeros, then lower-cases.
/// `"004/102"`, `"4/102"`, and `"4"` all canonicalize equal.
#[must_use]
pub fn canonical_card_number(raw: &str) -> String {
    let head = raw.split('/').next().unwrap_or("").trim();
    let stripped = head.trim_start_matches('0');
    let canonical = if stripped.is_empty() && !head.is_empty() {
        "0"
    } else {
        stripped
    };
    canonical.to_lowercase()
}

/// Base points for a rarity label: the first tier whose keyword appears in
/// the label (case-insensitive) wins; a label matching no tier scores the
/// configured default.
#[must_use]
pub fn rarity_points(rarity: &str, config: &ScoringConfig) -> u32 {
    let label = rarity.to_lowercase();
    config
        .tiers
        .iter()
        .find(|tier| tier.keywords.iter().any(|keyword| label.contains(keyword)))
        .map_or(config.default_points, |tier| tier.points)
}

/// Bonus points for a card, when it matches a curated bonus-list entry.
/// Match requires exact set-id equality and collector-number equality after
/// canonicalization.
#[must_use]
pub fn bonus_points(card: &card::Model, config: &ScoringConfig) -> u32 {
    let number = canonical_card_number(&card.number);
    config
        .bonuses
        .iter()
        .find(|bonus| {
            bonus.set_id == card.set_id && canonical_card_number(&bonus.card_number) == number
        })
        .map_or(0, |bonus| config.bonus_points.for_tier(bonus.tier))
}

/// Total points for one card: rarity tier base plus any curated bonus.
#[must_use]
pub fn score_card(card: &card::Model, config: &ScoringConfig) -> u32 {
    rarity_points(&card.rarity, config) + bonus_points(card, config)
}

/// Breakdown of an account-level prestige score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountScore {
    /// Summed card scores (rarity base plus bonuses)
    pub card_points: u32,
    /// Points from graded items (`count * graded_points`)
    pub graded_points: u32,
    /// Points from sealed items (`count * sealed_points`)
    pub sealed_points: u32,
    /// Number of owned cards that contributed
    pub owned_cards: u32,
}

impl AccountScore {
    /// Total prestige score.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.card_points + self.graded_points + self.sealed_points
    }
}

/// Aggregates the prestige score over owned cards plus per-item bonuses for
/// graded and sealed items. The caller supplies the graded and sealed
/// counts; those categories live outside the card tables.
#[must_use]
pub fn aggregate_score(
    owned_cards: &[&card::Model],
    graded_count: u32,
    sealed_count: u32,
    config: &ScoringConfig,
) -> AccountScore {
    let card_points = owned_cards
        .iter()
        .map(|card| score_card(card, config))
        .sum();

    // Cast safety: owned card counts are far below u32::MAX.
    #[allow(clippy::cast_possible_truncation)]
    let owned = owned_cards.len() as u32;

    AccountScore {
        card_points,
        graded_points: graded_count * config.graded_points,
        sealed_points: sealed_count * config.sealed_points,
        owned_cards: owned,
    }
}

/// Selects the highest rank whose minimum score is satisfied: a linear scan
/// from lowest to highest threshold, keeping the last satisfied one.
/// Returns `None` only when the rank table is empty or the score is below
/// every threshold.
#[must_use]
pub fn rank_for_score(score: u32, config: &ScoringConfig) -> Option<&Rank> {
    let mut current = None;
    for rank in &config.ranks {
        if score >= rank.min_score {
            current = Some(rank);
        }
    }
    current
}

/// Computes the account score from the database: every inventory record
/// with a positive total joined to its card row by normalized identity.
/// Ledger entries whose identity matches no card row contribute nothing.
pub async fn compute_account_score(
    db: &DatabaseConnection,
    user_id: &str,
    graded_count: u32,
    sealed_count: u32,
    config: &ScoringConfig,
) -> Result<AccountScore> {
    let ledger = crate::core::inventory::get_inventory_for_user(db, user_id).await?;
    let cards = Card::find().all(db).await?;

    let by_identity: HashMap<String, &card::Model> = cards
        .iter()
        .filter_map(|card| {
            identity::normalize(card.identity.as_deref()).map(|key| (key, card))
        })
        .collect();

    let owned: Vec<&card::Model> = ledger
        .iter()
        .filter(|record| {
            record.quantity_normal + record.quantity_holo + record.quantity_reverse > 0
        })
        .filter_map(|record| {
            identity::normalize(Some(&record.card_identity))
                .and_then(|key| by_identity.get(&key).copied())
        })
        .collect();

    Ok(aggregate_score(&owned, graded_count, sealed_count, config))
}
