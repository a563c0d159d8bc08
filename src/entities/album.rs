//! Album entity - Represents a checklist container for cards.
//!
//! Each album belongs to one user and carries a tracking mode that decides
//! how many completion slots a card occupies: `SIMPLE` counts one slot per
//! card, `MASTER` counts per-finish slots (normal, holo, reverse-holo).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Album tracking granularity.
///
/// Stored as a string column; the engine branches on this everywhere, so it
/// is a typed enum rather than a raw string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TrackingMode {
    /// One slot per card regardless of finish
    #[sea_orm(string_value = "SIMPLE")]
    Simple,
    /// One slot per applicable finish (normal / holo / reverse)
    #[sea_orm(string_value = "MASTER")]
    Master,
}

/// Album database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "albums")]
pub struct Model {
    /// Unique identifier for the album
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who owns this album
    pub user_id: String,
    /// Human-readable name of the album (e.g., "Base Set", "Favorite Eeveelutions")
    pub name: String,
    /// Tracking granularity for completion slots
    pub tracking_mode: TrackingMode,
    /// Optional source set identifier when the album mirrors one printed set
    pub set_id: Option<String>,
    /// Optional card used as the album cover
    pub cover_card_id: Option<i64>,
    /// When the album was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Album and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One album has many card entries
    #[sea_orm(has_many = "super::album_card::Entity")]
    AlbumCards,
}

impl Related<super::album_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlbumCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
