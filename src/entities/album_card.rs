//! Album card entity - A card's membership in one album.
//!
//! Carries album-local acquisition flags and per-finish quantities. These
//! are a cache of the user's global inventory, never authoritative: once an
//! inventory record exists for the same identity, reconciliation overwrites
//! them on every load. The flags only stand on their own for entries whose
//! identity has no inventory record yet (default "not owned").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Album card database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "album_cards")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Album this entry belongs to
    pub album_id: i64,
    /// Referenced card row, if known
    pub card_id: Option<i64>,
    /// Denormalized copy of the card's external identity (join key fallback
    /// is the card row's own identity when this is NULL)
    pub card_identity: Option<String>,
    /// Whether any finish of this card is owned
    pub acquired: bool,
    /// Whether the normal (non-holo) finish is owned
    pub acquired_normal: bool,
    /// Whether the holo finish is owned
    pub acquired_holo: bool,
    /// Whether the reverse-holo finish is owned
    pub acquired_reverse: bool,
    /// Owned copies in normal finish
    pub quantity_normal: i32,
    /// Owned copies in holo finish
    pub quantity_holo: i32,
    /// Owned copies in reverse-holo finish
    pub quantity_reverse: i32,
    /// When the card was added to the album
    pub added_at: DateTimeUtc,
}

/// Defines relationships between `AlbumCard` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one album
    #[sea_orm(
        belongs_to = "super::album::Entity",
        from = "Column::AlbumId",
        to = "super::album::Column::Id"
    )]
    Album,
    /// Each entry references at most one card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id"
    )]
    Card,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
