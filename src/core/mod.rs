//! Core business logic - framework-agnostic collection engine.
//!
//! The pure pieces (identity normalization, slot resolution, toggle
//! transitions, reconciliation, progress aggregation, scoring) operate on
//! plain data and never touch the database; the async functions alongside
//! them load and persist entity models through SeaORM.

/// Acquisition toggle state machine and the two-phase toggle operation
pub mod acquisition;
/// Album CRUD and card membership operations
pub mod album;
/// Catalog ingestion adapter for shape-varying card payloads
pub mod catalog;
/// Card identity normalization (the cross-table join key)
pub mod identity;
/// Global inventory ledger operations
pub mod inventory;
/// Best-effort cross-album change notification
pub mod notify;
/// Completion progress aggregation over reconciled entries
pub mod progress;
/// Inventory-to-album reconciliation
pub mod reconcile;
/// Album and account report generation
pub mod report;
/// Prestige score and rank engine
pub mod score;
/// Slot configuration resolution per tracking mode
pub mod slots;
