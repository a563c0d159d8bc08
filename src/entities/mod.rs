//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod album;
pub mod album_card;
pub mod card;
pub mod inventory_record;

// Re-export specific types to avoid conflicts
pub use album::{Column as AlbumColumn, Entity as Album, Model as AlbumModel, TrackingMode};
pub use album_card::{Column as AlbumCardColumn, Entity as AlbumCard, Model as AlbumCardModel};
pub use card::{Column as CardColumn, Entity as Card, Model as CardModel};
pub use inventory_record::{
    Column as InventoryRecordColumn, Entity as InventoryRecord, Model as InventoryRecordModel,
};
