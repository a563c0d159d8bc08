//! Global inventory ledger operations.
//!
//! The inventory table holds exactly one record per (user, normalized card
//! identity) and is the single source of truth for what a user owns across
//! every album. [`record_inventory`] enforces the one-record invariant with
//! a find-then-update-or-insert upsert; keys are always normalized before
//! they touch the table.

use crate::{
    core::{acquisition::Quantities, identity},
    entities::{InventoryRecord, inventory_record},
    errors::Result,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set, prelude::*};
use tracing::debug;

/// Upserts the user's inventory record for a card identity.
///
/// The raw identity is normalized first; an identity that normalizes to
/// nothing cannot be recorded and the function returns `Ok(None)` - the
/// caller's album-local state remains the only trace of the acquisition.
/// This is the deliberate silent degradation for identity-less cards, not
/// an error.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `user_id` - Owning user
/// * `raw_identity` - Card identity in any spelling
/// * `quantities` - New per-finish quantities (replaces the stored triple)
pub async fn record_inventory<C>(
    db: &C,
    user_id: &str,
    raw_identity: &str,
    quantities: Quantities,
) -> Result<Option<inventory_record::Model>>
where
    C: ConnectionTrait,
{
    let Some(key) = identity::normalize(Some(raw_identity)) else {
        debug!(user_id, "skipping inventory write for empty card identity");
        return Ok(None);
    };

    let now = chrono::Utc::now();
    let existing = InventoryRecord::find()
        .filter(inventory_record::Column::UserId.eq(user_id))
        .filter(inventory_record::Column::CardIdentity.eq(key.as_str()))
        .one(db)
        .await?;

    let model = if let Some(record) = existing {
        let mut active: inventory_record::ActiveModel = record.into();
        active.quantity_normal = Set(quantities.normal);
        active.quantity_holo = Set(quantities.holo);
        active.quantity_reverse = Set(quantities.reverse);
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        let active = inventory_record::ActiveModel {
            user_id: Set(user_id.to_string()),
            card_identity: Set(key),
            quantity_normal: Set(quantities.normal),
            quantity_holo: Set(quantities.holo),
            quantity_reverse: Set(quantities.reverse),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await?
    };

    Ok(Some(model))
}

/// Retrieves the user's complete inventory ledger, ordered by identity.
pub async fn get_inventory_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<inventory_record::Model>> {
    InventoryRecord::find()
        .filter(inventory_record::Column::UserId.eq(user_id))
        .order_by_asc(inventory_record::Column::CardIdentity)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the user's inventory record for one card identity, in any spelling.
pub async fn get_record_by_identity(
    db: &DatabaseConnection,
    user_id: &str,
    raw_identity: &str,
) -> Result<Option<inventory_record::Model>> {
    let Some(key) = identity::normalize(Some(raw_identity)) else {
        return Ok(None);
    };

    InventoryRecord::find()
        .filter(inventory_record::Column::UserId.eq(user_id))
        .filter(inventory_record::Column::CardIdentity.eq(key))
        .one(db)
        .await
        .map_err(Into::into)
}
