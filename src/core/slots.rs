//! Slot configuration resolution.
//!
//! A slot is a derived, non-persisted unit of completion. How many slots a
//! card occupies depends on the album's tracking mode and the card's display
//! configuration (badge, reverse-holo availability) plus its rarity label.
//! This module is the single place that formula lives; every view that
//! counts slots (album report, account overview, tests) goes through
//! [`resolve_slot_kinds`].

use crate::entities::{TrackingMode, card};

/// Kind of completion slot a card can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// The single whole-card slot used in SIMPLE mode
    Whole,
    /// Normal (non-holo) finish slot
    Normal,
    /// Holo finish slot
    Holo,
    /// Reverse-holo finish slot
    Reverse,
}

/// The display-relevant facts about a card that slot resolution and
/// scoring need, decoupled from the entity model so that pure functions
/// stay trivially testable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardProfile {
    /// Rarity label as printed (e.g., "Rare Holo")
    pub rarity: String,
    /// Display badge for special printings; implies no separate normal slot
    pub badge: Option<String>,
    /// Whether a reverse-holo printing exists for this card's set.
    /// `None` means the catalog row was never processed; the resolver then
    /// assumes the safest default (reverse exists) so that legacy entries
    /// still display progress instead of blocking on missing configuration.
    pub reverse_holo_exists: Option<bool>,
}

impl CardProfile {
    /// Builds a profile from a card entity row.
    #[must_use]
    pub fn from_card(card: &card::Model) -> Self {
        Self {
            rarity: card.rarity.clone(),
            badge: card.badge.clone(),
            reverse_holo_exists: card.reverse_holo_exists,
        }
    }

    /// Whether the card carries a non-empty display badge.
    #[must_use]
    pub fn has_badge(&self) -> bool {
        self.badge
            .as_deref()
            .is_some_and(|badge| !badge.trim().is_empty())
    }

    /// Whether a reverse-holo printing exists, defaulting to `true` for
    /// unprocessed catalog rows.
    #[must_use]
    pub fn reverse_exists(&self) -> bool {
        self.reverse_holo_exists.unwrap_or(true)
    }

    /// Whether the rarity label names a holo printing (case-insensitive
    /// substring match).
    #[must_use]
    pub fn rarity_is_holo(&self) -> bool {
        self.rarity.to_lowercase().contains("holo")
    }
}

/// Resolves the set of slot kinds applicable to a card under the given
/// tracking mode.
///
/// - SIMPLE mode: always exactly `[Whole]`, one slot per card.
/// - MASTER mode:
///   - `Normal` unless the card carries a badge (a badge means the printing
///     has no separate base version worth tracking),
///   - `Holo` if the card carries a badge or its rarity names a holo
///     printing (badge takes priority; the two conditions never produce
///     more than one holo slot),
///   - `Reverse` if and only if the display configuration declares a
///     reverse-holo printing for the card's set.
///
/// The returned kinds are distinct and ordered Normal, Holo, Reverse.
#[must_use]
pub fn resolve_slot_kinds(profile: &CardProfile, mode: TrackingMode) -> Vec<SlotKind> {
    match mode {
        TrackingMode::Simple => vec![SlotKind::Whole],
        TrackingMode::Master => {
            let mut kinds = Vec::with_capacity(3);
            let badged = profile.has_badge();

            if !badged {
                kinds.push(SlotKind::Normal);
            }
            if badged || profile.rarity_is_holo() {
                kinds.push(SlotKind::Holo);
            }
            if profile.reverse_exists() {
                kinds.push(SlotKind::Reverse);
            }
            kinds
        }
    }
}
