//! Shared test utilities for `Cardfolio`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{acquisition::Quantities, album, inventory},
    entities::{self, TrackingMode},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test album for a user with the given tracking mode.
pub async fn create_test_album(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    tracking_mode: TrackingMode,
) -> Result<entities::album::Model> {
    album::create_album(db, user_id, name, tracking_mode, None).await
}

/// Creates a test card row with the given display facts.
///
/// # Arguments
/// * `identity` - External identifier, `None` for identity-less legacy rows
/// * `rarity` - Rarity label (e.g., "Rare Holo")
/// * `badge` - Display badge, `None` for ordinary printings
/// * `reverse_holo_exists` - Reverse-holo flag, `None` for unprocessed rows
pub async fn create_test_card(
    db: &DatabaseConnection,
    identity: Option<&str>,
    rarity: &str,
    badge: Option<&str>,
    reverse_holo_exists: Option<bool>,
) -> Result<entities::card::Model> {
    let card = entities::card::ActiveModel {
        identity: Set(identity.map(ToString::to_string)),
        name: Set("Test Card".to_string()),
        set_id: Set("base1".to_string()),
        number: Set("1/102".to_string()),
        rarity: Set(rarity.to_string()),
        badge: Set(badge.map(ToString::to_string)),
        reverse_holo_exists: Set(reverse_holo_exists),
        image_url: Set(None),
        ..Default::default()
    };

    card.insert(db).await.map_err(Into::into)
}

/// Adds a card to an album, returning the new unowned entry.
pub async fn add_test_entry(
    db: &DatabaseConnection,
    album: &entities::album::Model,
    card: &entities::card::Model,
) -> Result<entities::album_card::Model> {
    album::add_card_to_album(db, album.id, card).await
}

/// Writes an inventory record through the normal upsert path.
pub async fn record_test_inventory(
    db: &DatabaseConnection,
    user_id: &str,
    identity: &str,
    normal: i32,
    holo: i32,
    reverse: i32,
) -> Result<Option<entities::inventory_record::Model>> {
    inventory::record_inventory(
        db,
        user_id,
        identity,
        Quantities {
            normal,
            holo,
            reverse,
        },
    )
    .await
}

/// Sets up a complete test environment with a SIMPLE-mode album.
/// Returns (db, album) for common test scenarios.
pub async fn setup_with_album() -> Result<(DatabaseConnection, entities::album::Model)> {
    let db = setup_test_db().await?;
    let album = create_test_album(&db, "collector", "Test Album", TrackingMode::Simple).await?;
    Ok((db, album))
}
