//! Cross-album change notification.
//!
//! When a card's ownership changes in one album, other albums containing
//! the same identity have stale progress until their next load. This module
//! surfaces those albums so the caller can emit progress-changed
//! notifications. The lookup is informational and best-effort: it never
//! mutates the related albums, and a persistence failure here must not roll
//! back or block the toggle that triggered it.

use crate::{
    core::{identity, reconcile},
    entities::{Album, AlbumCard, Card, album, album_card},
    errors::Result,
};
use sea_orm::{DatabaseConnection, prelude::*};
use std::collections::HashMap;
use tracing::warn;

/// Finds the user's other albums containing a card with the same normalized
/// identity, excluding the album that triggered the change.
///
/// An identity that normalizes to nothing matches no albums.
pub async fn related_albums(
    db: &DatabaseConnection,
    user_id: &str,
    raw_identity: &str,
    exclude_album_id: i64,
) -> Result<Vec<album::Model>> {
    let Some(key) = identity::normalize(Some(raw_identity)) else {
        return Ok(Vec::new());
    };

    let albums: HashMap<i64, album::Model> = Album::find()
        .filter(album::Column::UserId.eq(user_id))
        .filter(album::Column::Id.ne(exclude_album_id))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    if albums.is_empty() {
        return Ok(Vec::new());
    }

    let album_ids: Vec<i64> = albums.keys().copied().collect();
    let rows = AlbumCard::find()
        .filter(album_card::Column::AlbumId.is_in(album_ids))
        .find_also_related(Card)
        .all(db)
        .await?;

    let mut matched: Vec<album::Model> = Vec::new();
    for (entry, card) in rows {
        if reconcile::entry_identity(&entry, card.as_ref()).as_deref() != Some(key.as_str()) {
            continue;
        }
        if let Some(album) = albums.get(&entry.album_id) {
            if !matched.iter().any(|m| m.id == album.id) {
                matched.push(album.clone());
            }
        }
    }

    matched.sort_by_key(|a| a.id);
    Ok(matched)
}

/// Best-effort variant of [`related_albums`]: a lookup failure is logged
/// and degrades to an empty list so the triggering operation is never
/// affected.
pub async fn notify_related_albums(
    db: &DatabaseConnection,
    user_id: &str,
    raw_identity: &str,
    exclude_album_id: i64,
) -> Vec<album::Model> {
    match related_albums(db, user_id, raw_identity, exclude_album_id).await {
        Ok(albums) => albums,
        Err(e) => {
            warn!(user_id, raw_identity, "cross-album lookup failed: {e}");
            Vec::new()
        }
    }
}
