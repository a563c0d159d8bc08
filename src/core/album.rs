//! Album business logic - Handles all album-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! albums and their card entries. All functions are async and return Result
//! types for error handling.

use crate::{
    core::identity,
    entities::{Album, AlbumCard, TrackingMode, album, album_card, card},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};

/// Creates a new album for a user, performing input validation.
///
/// The name must be non-empty after trimming; the new album starts with no
/// entries and no cover card.
pub async fn create_album(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    tracking_mode: TrackingMode,
    set_id: Option<String>,
) -> Result<album::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Album name cannot be empty".to_string(),
        });
    }

    let album = album::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name.trim().to_string()),
        tracking_mode: Set(tracking_mode),
        set_id: Set(set_id),
        cover_card_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = album.insert(db).await?;
    Ok(result)
}

/// Finds an album by its unique ID.
pub async fn get_album_by_id(
    db: &DatabaseConnection,
    album_id: i64,
) -> Result<Option<album::Model>> {
    Album::find_by_id(album_id).one(db).await.map_err(Into::into)
}

/// Retrieves all albums belonging to a user, ordered by creation time.
pub async fn get_albums_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<album::Model>> {
    Album::find()
        .filter(album::Column::UserId.eq(user_id))
        .order_by_asc(album::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Switches an album's tracking mode.
///
/// Entries are untouched: slot counts are derived at aggregation time, so
/// changing the mode only changes how the same flags are counted.
pub async fn set_tracking_mode(
    db: &DatabaseConnection,
    album_id: i64,
    tracking_mode: TrackingMode,
) -> Result<album::Model> {
    let album = Album::find_by_id(album_id)
        .one(db)
        .await?
        .ok_or(Error::AlbumNotFound { id: album_id })?;

    let mut active: album::ActiveModel = album.into();
    active.tracking_mode = Set(tracking_mode);
    active.update(db).await.map_err(Into::into)
}

/// Adds a card to an album, denormalizing the card's identity onto the
/// entry so that reconciliation works even if the card row later vanishes.
/// The entry starts unowned; the next reconciliation pass picks up any
/// existing inventory record for the same identity.
pub async fn add_card_to_album(
    db: &DatabaseConnection,
    album_id: i64,
    card: &card::Model,
) -> Result<album_card::Model> {
    Album::find_by_id(album_id)
        .one(db)
        .await?
        .ok_or(Error::AlbumNotFound { id: album_id })?;

    let entry = album_card::ActiveModel {
        album_id: Set(album_id),
        card_id: Set(Some(card.id)),
        card_identity: Set(identity::normalize(card.identity.as_deref())),
        acquired: Set(false),
        acquired_normal: Set(false),
        acquired_holo: Set(false),
        acquired_reverse: Set(false),
        quantity_normal: Set(0),
        quantity_holo: Set(0),
        quantity_reverse: Set(0),
        added_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Removes a card entry from its album. The global inventory record is not
/// touched: removing a card from a checklist does not un-own it.
pub async fn remove_card_from_album(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    let entry = AlbumCard::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::EntryNotFound { id: entry_id })?;

    entry.delete(db).await?;
    Ok(())
}

/// Deletes an album and all of its entries.
///
/// The two deletes run in one database transaction so a failure cannot
/// leave orphaned entries. Inventory records survive; they are
/// album-independent.
pub async fn delete_album(db: &DatabaseConnection, album_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let album = Album::find_by_id(album_id)
        .one(&txn)
        .await?
        .ok_or(Error::AlbumNotFound { id: album_id })?;

    AlbumCard::delete_many()
        .filter(album_card::Column::AlbumId.eq(album_id))
        .exec(&txn)
        .await?;
    album.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
