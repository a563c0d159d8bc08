//! Inventory-to-album reconciliation.
//!
//! Album entries cache acquisition flags locally, but the global inventory
//! ledger is the single source of truth once a record exists for the same
//! card identity. Every view that renders progress re-runs [`reconcile`]
//! over freshly loaded rows, which also makes the flow self-healing: a
//! crash between the entry write and the ledger write during a toggle is
//! corrected on the next load.

use crate::{
    core::{
        acquisition::Quantities,
        identity,
        slots::CardProfile,
    },
    entities::{Album, AlbumCard, Card, album, album_card, card, inventory_record},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, prelude::*};
use std::collections::HashMap;

/// An album entry after reconciliation, paired with the display profile of
/// its card. This is the only shape the progress aggregator consumes.
#[derive(Debug, Clone)]
pub struct ReconciledCard {
    /// The entry with flags and quantities overridden by the ledger where a
    /// matching inventory record exists
    pub entry: album_card::Model,
    /// Display facts of the referenced card; defaults when the card row is
    /// missing (treated as an unprocessed catalog entry)
    pub profile: CardProfile,
}

/// Derives an entry's join identity: the entry's own identity field when
/// present, otherwise the identity carried by the referenced card row.
#[must_use]
pub fn entry_identity(entry: &album_card::Model, card: Option<&card::Model>) -> Option<String> {
    identity::normalize(
        entry
            .card_identity
            .as_deref()
            .or_else(|| card.and_then(|c| c.identity.as_deref())),
    )
}

/// Merges the user's inventory ledger into album entries by normalized
/// identity.
///
/// For each entry with a matching inventory record, quantities are copied
/// from the record and every acquisition flag is re-derived from them.
/// Entries without a match (including entries whose identity cannot be
/// normalized) keep their existing flags untouched. The function is pure
/// and total: it performs no I/O, never fails, and running it twice over
/// the same inputs yields identical output.
#[must_use]
pub fn reconcile(
    rows: Vec<(album_card::Model, Option<card::Model>)>,
    ledger: &[inventory_record::Model],
) -> Vec<ReconciledCard> {
    let index: HashMap<String, &inventory_record::Model> = ledger
        .iter()
        .filter_map(|record| {
            identity::normalize(Some(&record.card_identity)).map(|key| (key, record))
        })
        .collect();

    rows.into_iter()
        .map(|(mut entry, card)| {
            let profile = card
                .as_ref()
                .map(CardProfile::from_card)
                .unwrap_or_default();

            if let Some(record) = entry_identity(&entry, card.as_ref())
                .and_then(|key| index.get(&key))
            {
                let quantities = Quantities {
                    normal: record.quantity_normal,
                    holo: record.quantity_holo,
                    reverse: record.quantity_reverse,
                };
                entry.quantity_normal = quantities.normal;
                entry.quantity_holo = quantities.holo;
                entry.quantity_reverse = quantities.reverse;
                entry.acquired_normal = quantities.normal > 0;
                entry.acquired_holo = quantities.holo > 0;
                entry.acquired_reverse = quantities.reverse > 0;
                entry.acquired = quantities.acquired();
            }

            ReconciledCard { entry, profile }
        })
        .collect()
}

/// Loads an album's entries joined with their card rows, ordered by when
/// the card was added.
pub async fn load_album_rows(
    db: &DatabaseConnection,
    album_id: i64,
) -> Result<Vec<(album_card::Model, Option<card::Model>)>> {
    AlbumCard::find()
        .filter(album_card::Column::AlbumId.eq(album_id))
        .find_also_related(Card)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads and reconciles one album against its owner's inventory ledger.
pub async fn reconcile_album(
    db: &DatabaseConnection,
    album: &album::Model,
) -> Result<Vec<ReconciledCard>> {
    let rows = load_album_rows(db, album.id).await?;
    let ledger = crate::core::inventory::get_inventory_for_user(db, &album.user_id).await?;
    Ok(reconcile(rows, &ledger))
}

/// Convenience wrapper that looks the album up first.
pub async fn reconcile_album_by_id(
    db: &DatabaseConnection,
    album_id: i64,
) -> Result<Vec<ReconciledCard>> {
    let album = Album::find_by_id(album_id)
        .one(db)
        .await?
        .ok_or(Error::AlbumNotFound { id: album_id })?;
    reconcile_album(db, &album).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{entities::TrackingMode, test_utils::*};

    fn ledger_record(identity: &str, normal: i32, holo: i32, reverse: i32) -> inventory_record::Model {
        inventory_record::Model {
            id: 0,
            user_id: "collector".to_string(),
            card_identity: identity.to_string(),
            quantity_normal: normal,
            quantity_holo: holo,
            quantity_reverse: reverse,
            updated_at: chrono::Utc::now(),
        }
    }

    fn bare_entry(id: i64, identity: Option<&str>) -> album_card::Model {
        album_card::Model {
            id,
            album_id: 1,
            card_id: None,
            card_identity: identity.map(ToString::to_string),
            acquired: false,
            acquired_normal: false,
            acquired_holo: false,
            acquired_reverse: false,
            quantity_normal: 0,
            quantity_holo: 0,
            quantity_reverse: 0,
            added_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_matching_record_overrides_flags_and_quantities() {
        let rows = vec![(bare_entry(1, Some("Base1-4")), None)];
        let ledger = vec![ledger_record("base1-4", 0, 1, 2)];

        let reconciled = reconcile(rows, &ledger);
        let entry = &reconciled[0].entry;
        assert!(entry.acquired);
        assert!(!entry.acquired_normal);
        assert!(entry.acquired_holo);
        assert!(entry.acquired_reverse);
        assert_eq!(entry.quantity_reverse, 2);
    }

    #[test]
    fn test_ledger_wins_over_stale_local_flags() {
        // A late-arriving persistence write may leave the entry claiming
        // ownership the ledger no longer records; the ledger is truth.
        let mut stale = bare_entry(1, Some("base1-4"));
        stale.acquired = true;
        stale.acquired_normal = true;
        stale.quantity_normal = 1;

        let ledger = vec![ledger_record("base1-4", 0, 0, 0)];
        let reconciled = reconcile(vec![(stale, None)], &ledger);
        assert!(!reconciled[0].entry.acquired);
        assert_eq!(reconciled[0].entry.quantity_normal, 0);
    }

    #[test]
    fn test_unmatched_entry_keeps_local_flags() {
        let mut local = bare_entry(1, Some("base1-99"));
        local.acquired = true;
        local.acquired_normal = true;
        local.quantity_normal = 1;

        let ledger = vec![ledger_record("base1-4", 1, 0, 0)];
        let reconciled = reconcile(vec![(local.clone(), None)], &ledger);
        assert_eq!(reconciled[0].entry, local);
    }

    #[test]
    fn test_missing_identity_degrades_to_unreconciled() {
        // No identity anywhere: the entry cannot join the ledger and keeps
        // its default "not owned" flags. This must not be an error.
        let rows = vec![(bare_entry(1, None), None)];
        let ledger = vec![ledger_record("base1-4", 1, 0, 0)];

        let reconciled = reconcile(rows, &ledger);
        assert!(!reconciled[0].entry.acquired);
    }

    #[test]
    fn test_identity_falls_back_to_card_row() {
        let card = card::Model {
            id: 7,
            identity: Some("  Base1-4 ".to_string()),
            name: "Charizard".to_string(),
            set_id: "base1".to_string(),
            number: "4/102".to_string(),
            rarity: "Rare Holo".to_string(),
            badge: None,
            reverse_holo_exists: Some(true),
            image_url: None,
        };
        let rows = vec![(bare_entry(1, None), Some(card))];
        let ledger = vec![ledger_record("base1-4", 1, 0, 0)];

        let reconciled = reconcile(rows, &ledger);
        assert!(reconciled[0].entry.acquired);
        assert!(reconciled[0].entry.acquired_normal);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let rows = vec![
            (bare_entry(1, Some("base1-4")), None),
            (bare_entry(2, Some("base1-5")), None),
            (bare_entry(3, None), None),
        ];
        let ledger = vec![ledger_record("base1-4", 1, 1, 0)];

        let once = reconcile(rows.clone(), &ledger);
        let again_input: Vec<_> = once
            .iter()
            .map(|r| (r.entry.clone(), None))
            .collect();
        let twice = reconcile(again_input, &ledger);

        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.entry, b.entry);
        }
        // And a fresh second run over the original inputs matches too.
        let fresh = reconcile(rows, &ledger);
        for (a, b) in once.iter().zip(fresh.iter()) {
            assert_eq!(a.entry, b.entry);
        }
    }

    #[test]
    fn test_missing_card_row_yields_default_profile() {
        let reconciled = reconcile(vec![(bare_entry(1, Some("x")), None)], &[]);
        let profile = &reconciled[0].profile;
        assert!(!profile.has_badge());
        assert!(profile.reverse_exists());
    }

    #[tokio::test]
    async fn test_reconcile_album_roundtrip() -> Result<()> {
        let db = setup_test_db().await?;
        let album = create_test_album(&db, "collector", "Base Set", TrackingMode::Simple).await?;
        let owned = create_test_card(&db, Some("base1-4"), "Rare Holo", None, Some(true)).await?;
        let missing = create_test_card(&db, Some("base1-5"), "Common", None, Some(true)).await?;
        add_test_entry(&db, &album, &owned).await?;
        add_test_entry(&db, &album, &missing).await?;

        record_test_inventory(&db, "collector", "base1-4", 1, 0, 0).await?;

        let reconciled = reconcile_album(&db, &album).await?;
        assert_eq!(reconciled.len(), 2);

        let by_identity = |key: &str| {
            reconciled
                .iter()
                .find(|r| r.entry.card_identity.as_deref() == Some(key))
                .unwrap()
        };
        assert!(by_identity("base1-4").entry.acquired);
        assert!(!by_identity("base1-5").entry.acquired);

        Ok(())
    }
}
