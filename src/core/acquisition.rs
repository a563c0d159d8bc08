//! Acquisition state machine.
//!
//! The pure toggle transitions compute a complete, consistent quantity
//! triple from the current quantities and the toggle action; they never
//! fail and never produce partial updates. [`toggle_entry`] is the async
//! orchestrator around them: it applies the transition, persists the album
//! entry, and upserts the global inventory record. The two writes are
//! deliberately not wrapped in one database transaction - the optimistic
//! model accepts a window of inconsistency that the next reconciliation
//! pass heals.

use crate::{
    core::{identity, inventory, slots::CardProfile},
    entities::{Album, AlbumCard, Card, TrackingMode, album, album_card},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// A printing finish of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Normal (non-holo) printing
    Normal,
    /// Holo printing
    Holo,
    /// Reverse-holo printing
    Reverse,
}

/// Per-finish owned quantities for one card identity.
///
/// The derived values are fixed by construction:
/// `total = normal + holo + reverse` and `acquired = total > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quantities {
    /// Owned copies in normal finish
    pub normal: i32,
    /// Owned copies in holo finish
    pub holo: i32,
    /// Owned copies in reverse-holo finish
    pub reverse: i32,
}

impl Quantities {
    /// Total owned copies across all finishes.
    #[must_use]
    pub const fn total(self) -> i32 {
        self.normal + self.holo + self.reverse
    }

    /// Whether any finish is owned.
    #[must_use]
    pub const fn acquired(self) -> bool {
        self.total() > 0
    }

    /// Owned copies of one finish.
    #[must_use]
    pub const fn of(self, finish: Finish) -> i32 {
        match finish {
            Finish::Normal => self.normal,
            Finish::Holo => self.holo,
            Finish::Reverse => self.reverse,
        }
    }

    /// Returns a copy with one finish's quantity replaced.
    #[must_use]
    pub const fn with(mut self, finish: Finish, quantity: i32) -> Self {
        match finish {
            Finish::Normal => self.normal = quantity,
            Finish::Holo => self.holo = quantity,
            Finish::Reverse => self.reverse = quantity,
        }
        self
    }

    /// Reads the quantity triple out of an album entry row.
    #[must_use]
    pub const fn from_entry(entry: &album_card::Model) -> Self {
        Self {
            normal: entry.quantity_normal,
            holo: entry.quantity_holo,
            reverse: entry.quantity_reverse,
        }
    }
}

/// Applies a SIMPLE-mode toggle: a binary acquire/release of the whole card.
///
/// From all-zero quantities, acquiring sets the card's default finish to 1 -
/// holo when the card carries a badge (badged printings have no base
/// version), normal otherwise. From any nonzero state, the toggle releases
/// the card entirely by clearing every finish. The asymmetry is intentional:
/// SIMPLE mode tracks ownership, not finish detail.
#[must_use]
pub fn apply_simple_toggle(current: Quantities, has_badge: bool) -> Quantities {
    if current.acquired() {
        Quantities::default()
    } else if has_badge {
        Quantities {
            holo: 1,
            ..Quantities::default()
        }
    } else {
        Quantities {
            normal: 1,
            ..Quantities::default()
        }
    }
}

/// Applies a MASTER-mode toggle targeting exactly one finish.
///
/// Flips that finish between owned (quantity 1) and not owned (quantity 0);
/// the other finishes are untouched. Toggling the same finish twice returns
/// the original quantities.
#[must_use]
pub fn apply_master_toggle(current: Quantities, finish: Finish) -> Quantities {
    let newly_owned = current.of(finish) == 0;
    current.with(finish, i32::from(newly_owned))
}

/// Result of a persisted toggle operation.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The updated album entry row
    pub entry: album_card::Model,
    /// The album the entry belongs to
    pub album: album::Model,
    /// New quantities after the toggle
    pub quantities: Quantities,
    /// Normalized card identity, when the entry has one; `None` means the
    /// toggle could not reach the inventory ledger and stayed album-local
    pub identity: Option<String>,
}

/// Toggles acquisition for an album entry and persists the result.
///
/// Phase one is pure: the new quantity triple is computed from the entry's
/// current state via [`apply_simple_toggle`] or [`apply_master_toggle`]
/// depending on the album's tracking mode. Phase two persists: the entry
/// row is updated, then the user's inventory record for the same normalized
/// identity is upserted. No transaction spans the two writes; a failure
/// between them is healed by the next reconciliation pass.
///
/// # Arguments
/// * `db` - Database connection
/// * `entry_id` - The album entry to toggle
/// * `finish` - Target finish; required in MASTER mode, ignored in SIMPLE mode
pub async fn toggle_entry(
    db: &DatabaseConnection,
    entry_id: i64,
    finish: Option<Finish>,
) -> Result<ToggleOutcome> {
    let entry = AlbumCard::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::EntryNotFound { id: entry_id })?;

    let album = Album::find_by_id(entry.album_id)
        .one(db)
        .await?
        .ok_or(Error::AlbumNotFound { id: entry.album_id })?;

    let card = match entry.card_id {
        Some(card_id) => Card::find_by_id(card_id).one(db).await?,
        None => None,
    };
    let profile = card
        .as_ref()
        .map(CardProfile::from_card)
        .unwrap_or_default();

    let current = Quantities::from_entry(&entry);
    let quantities = match album.tracking_mode {
        TrackingMode::Simple => apply_simple_toggle(current, profile.has_badge()),
        TrackingMode::Master => {
            let finish = finish.ok_or_else(|| Error::Config {
                message: "MASTER mode toggle requires a target finish".to_string(),
            })?;
            apply_master_toggle(current, finish)
        }
    };

    let key = identity::normalize(
        entry
            .card_identity
            .as_deref()
            .or_else(|| card.as_ref().and_then(|c| c.identity.as_deref())),
    );

    // First write: the album entry, so the album view is current.
    let mut active: album_card::ActiveModel = entry.into();
    active.quantity_normal = Set(quantities.normal);
    active.quantity_holo = Set(quantities.holo);
    active.quantity_reverse = Set(quantities.reverse);
    active.acquired_normal = Set(quantities.normal > 0);
    active.acquired_holo = Set(quantities.holo > 0);
    active.acquired_reverse = Set(quantities.reverse > 0);
    active.acquired = Set(quantities.acquired());
    let entry = active.update(db).await?;

    // Second write: the global ledger, keyed by normalized identity. An
    // entry without an identity degrades silently to album-local state.
    if let Some(key) = &key {
        inventory::record_inventory(db, &album.user_id, key, quantities).await?;
    }

    Ok(ToggleOutcome {
        entry,
        album,
        quantities,
        identity: key,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    const ZERO: Quantities = Quantities {
        normal: 0,
        holo: 0,
        reverse: 0,
    };

    #[test]
    fn test_quantity_invariants() {
        let q = Quantities {
            normal: 1,
            holo: 2,
            reverse: 0,
        };
        assert_eq!(q.total(), 3);
        assert!(q.acquired());
        assert!(!ZERO.acquired());
    }

    #[test]
    fn test_simple_toggle_acquires_default_finish() {
        let acquired = apply_simple_toggle(ZERO, false);
        assert_eq!(acquired.normal, 1);
        assert_eq!(acquired.total(), 1);

        let badged = apply_simple_toggle(ZERO, true);
        assert_eq!(badged.holo, 1);
        assert_eq!(badged.total(), 1);
    }

    #[test]
    fn test_simple_toggle_binary_law() {
        // One toggle from zero yields total=1 in some finish; a second
        // toggle returns everything to zero regardless of which finish
        // holds the copy.
        for has_badge in [false, true] {
            let once = apply_simple_toggle(ZERO, has_badge);
            assert_eq!(once.total(), 1);
            let twice = apply_simple_toggle(once, has_badge);
            assert_eq!(twice, ZERO);
        }
    }

    #[test]
    fn test_simple_toggle_releases_any_nonzero_state() {
        let mixed = Quantities {
            normal: 2,
            holo: 1,
            reverse: 3,
        };
        assert_eq!(apply_simple_toggle(mixed, false), ZERO);
    }

    #[test]
    fn test_master_toggle_flips_single_finish() {
        let after = apply_master_toggle(ZERO, Finish::Holo);
        assert_eq!(after.holo, 1);
        assert_eq!(after.normal, 0);
        assert_eq!(after.reverse, 0);
    }

    #[test]
    fn test_master_toggle_is_idempotent_over_two_applications() {
        let start = Quantities {
            normal: 1,
            holo: 0,
            reverse: 1,
        };
        for finish in [Finish::Normal, Finish::Holo, Finish::Reverse] {
            let twice = apply_master_toggle(apply_master_toggle(start, finish), finish);
            assert_eq!(twice, start);
        }
    }

    #[test]
    fn test_master_toggle_leaves_other_finishes_untouched() {
        let start = Quantities {
            normal: 1,
            holo: 1,
            reverse: 0,
        };
        let after = apply_master_toggle(start, Finish::Normal);
        assert_eq!(after.normal, 0);
        assert_eq!(after.holo, 1);
        assert_eq!(after.reverse, 0);
    }

    #[tokio::test]
    async fn test_toggle_entry_simple_updates_entry_and_ledger() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Base Set", TrackingMode::Simple).await?;
        let card = create_test_card(&db, Some("Base1-4"), "Rare Holo", None, Some(true)).await?;
        let entry = add_test_entry(&db, &album, &card).await?;

        let outcome = toggle_entry(&db, entry.id, None).await?;
        assert!(outcome.entry.acquired);
        assert_eq!(outcome.quantities.total(), 1);
        assert_eq!(outcome.identity.as_deref(), Some("base1-4"));

        // The ledger now holds the same quantities under the normalized key.
        let records =
            crate::core::inventory::get_inventory_for_user(&db, "collector").await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].card_identity, "base1-4");
        assert_eq!(records[0].quantity_normal, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_entry_simple_release_clears_ledger_quantities() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Base Set", TrackingMode::Simple).await?;
        let card = create_test_card(&db, Some("base1-4"), "Common", None, Some(true)).await?;
        let entry = add_test_entry(&db, &album, &card).await?;

        toggle_entry(&db, entry.id, None).await?;
        let outcome = toggle_entry(&db, entry.id, None).await?;

        assert!(!outcome.entry.acquired);
        assert_eq!(outcome.quantities, ZERO);

        let records =
            crate::core::inventory::get_inventory_for_user(&db, "collector").await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity_normal, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_entry_master_targets_one_finish() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Master Set", TrackingMode::Master).await?;
        let card = create_test_card(&db, Some("base1-4"), "Rare Holo", None, Some(true)).await?;
        let entry = add_test_entry(&db, &album, &card).await?;

        let outcome = toggle_entry(&db, entry.id, Some(Finish::Reverse)).await?;
        assert!(outcome.entry.acquired_reverse);
        assert!(!outcome.entry.acquired_normal);
        assert!(outcome.entry.acquired);
        assert_eq!(outcome.quantities.reverse, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_entry_master_without_finish_is_config_error() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Master Set", TrackingMode::Master).await?;
        let card = create_test_card(&db, Some("base1-4"), "Common", None, Some(true)).await?;
        let entry = add_test_entry(&db, &album, &card).await?;

        let result = toggle_entry(&db, entry.id, None).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_entry_without_identity_stays_album_local() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Base Set", TrackingMode::Simple).await?;
        let card = create_test_card(&db, None, "Common", None, Some(true)).await?;
        let entry = add_test_entry(&db, &album, &card).await?;

        let outcome = toggle_entry(&db, entry.id, None).await?;
        assert!(outcome.entry.acquired);
        assert!(outcome.identity.is_none());

        // No ledger record was created for the identity-less entry.
        let records =
            crate::core::inventory::get_inventory_for_user(&db, "collector").await?;
        assert!(records.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_entry_badged_card_defaults_to_holo_in_simple_mode() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Specials", TrackingMode::Simple).await?;
        let card =
            create_test_card(&db, Some("swsh-284"), "Ultra Rare", Some("V"), Some(false)).await?;
        let entry = add_test_entry(&db, &album, &card).await?;

        let outcome = toggle_entry(&db, entry.id, None).await?;
        assert_eq!(outcome.quantities.holo, 1);
        assert_eq!(outcome.quantities.normal, 0);
        assert!(outcome.entry.acquired_holo);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_entry_missing_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let result = toggle_entry(&db, 999, None).await;
        assert!(matches!(result, Err(Error::EntryNotFound { id: 999 })));
        Ok(())
    }
}
