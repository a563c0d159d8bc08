//! Inventory record entity - The user's global, album-independent holding
//! of a card identity.
//!
//! Exactly one record exists per (user, normalized card identity); the
//! upsert in [`crate::core::inventory`] enforces this. The record is the
//! single source of truth for "do I own this card and in which finishes" -
//! album-local flags are derived from it at reconciliation time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who owns this inventory
    pub user_id: String,
    /// Normalized card identity (trimmed, lower-cased)
    pub card_identity: String,
    /// Owned copies in normal finish
    pub quantity_normal: i32,
    /// Owned copies in holo finish
    pub quantity_holo: i32,
    /// Owned copies in reverse-holo finish
    pub quantity_reverse: i32,
    /// When this record was last modified
    pub updated_at: DateTimeUtc,
}

/// `InventoryRecord` has no relationships with other entities; it joins to
/// album entries by normalized identity, not by foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
