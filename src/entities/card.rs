//! Card entity - Immutable reference data describing a printed card.
//!
//! Rows are written by the catalog import and never mutated by the engine.
//! The `identity` column is the external identifier used as the join key
//! between album entries and inventory records; it is nullable because some
//! legacy catalog rows arrive without one, in which case the card can never
//! participate in reconciliation and always reads as unowned.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Card database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    /// Unique identifier for the card row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External card identifier, the cross-table join key (nullable for legacy rows)
    pub identity: Option<String>,
    /// Card name (e.g., "Charizard")
    pub name: String,
    /// Identifier of the set this card was printed in (e.g., "base1")
    pub set_id: String,
    /// Collector number within the set, possibly with a `/total` suffix (e.g., "4/102")
    pub number: String,
    /// Rarity label as printed (e.g., "Rare Holo", "Double Rare")
    pub rarity: String,
    /// Display badge for special printings (e.g., "EX", "V"); implies no separate normal slot
    pub badge: Option<String>,
    /// Whether a reverse-holo printing exists for this card's set.
    /// NULL means the catalog row has not been processed yet.
    pub reverse_holo_exists: Option<bool>,
    /// Optional image reference
    pub image_url: Option<String>,
}

/// Defines relationships between Card and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One card can appear in many albums
    #[sea_orm(has_many = "super::album_card::Entity")]
    AlbumCards,
}

impl Related<super::album_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlbumCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
