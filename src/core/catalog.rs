//! Catalog ingestion adapter.
//!
//! Raw catalog payloads are duck-typed: a card's variant data sometimes
//! arrives as a single object and sometimes as a one-element array, and the
//! display configuration block may be missing entirely on legacy entries.
//! This module normalizes those shapes at the boundary so the rest of the
//! engine only ever sees a single well-typed record per card.

use crate::{
    core::identity,
    entities::{Card, card},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use tracing::debug;

/// A value that may arrive as a single object or as an array of objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A bare object
    One(T),
    /// An array, of which only the first element is meaningful here
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Collapses to the single meaningful value: the object itself, or the
    /// first array element. An empty array yields `None`.
    pub fn into_primary(self) -> Option<T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.into_iter().next(),
        }
    }
}

/// Raw display configuration block, possibly absent on legacy entries.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDisplay {
    /// Badge label for special printings
    #[serde(default)]
    pub badge: Option<String>,
    /// Whether a reverse-holo printing exists for the card's set
    #[serde(default)]
    pub reverse_holo_exists: Option<bool>,
}

/// Raw printable variant of a card.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    /// External identifier of this printing
    pub id: String,
    /// Optional image reference
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Raw card record as delivered by the catalog source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    /// Card name
    pub name: String,
    /// Set identifier
    pub set_id: String,
    /// Collector number, possibly with a `/total` suffix
    pub number: String,
    /// Rarity label; missing rarities default to empty (scores as common)
    #[serde(default)]
    pub rarity: Option<String>,
    /// Display configuration; absent on unprocessed legacy entries
    #[serde(default)]
    pub display: Option<RawDisplay>,
    /// Variant data in either object or array shape
    #[serde(default)]
    pub variants: Option<OneOrMany<RawVariant>>,
}

/// A catalog card flattened to the single well-typed shape the engine uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    /// External identity from the primary variant; `None` when the payload
    /// carried no variant (the card then never reconciles)
    pub identity: Option<String>,
    /// Card name
    pub name: String,
    /// Set identifier
    pub set_id: String,
    /// Collector number as delivered
    pub number: String,
    /// Rarity label, empty when missing
    pub rarity: String,
    /// Badge label, when the display block declares one
    pub badge: Option<String>,
    /// Reverse-holo availability; `None` preserves "unprocessed" so the
    /// slot resolver can apply its safe default later
    pub reverse_holo_exists: Option<bool>,
    /// Image reference from the primary variant
    pub image_url: Option<String>,
}

/// Flattens a raw card into the canonical single-record shape.
#[must_use]
pub fn normalize_card(raw: RawCard) -> CatalogCard {
    let display = raw.display.unwrap_or_default();
    let variant = raw.variants.and_then(OneOrMany::into_primary);
    let (variant_id, image_url) = match variant {
        Some(v) => (identity::normalize(Some(&v.id)), v.image_url),
        None => (None, None),
    };

    CatalogCard {
        identity: variant_id,
        name: raw.name,
        set_id: raw.set_id,
        number: raw.number,
        rarity: raw.rarity.unwrap_or_default(),
        badge: display.badge,
        reverse_holo_exists: display.reverse_holo_exists,
        image_url,
    }
}

/// Parses a JSON catalog payload into flattened records.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogCard>> {
    let raw: Vec<RawCard> = serde_json::from_str(json).map_err(|e| Error::Catalog {
        message: format!("Failed to parse catalog payload: {e}"),
    })?;
    Ok(raw.into_iter().map(normalize_card).collect())
}

/// Imports a JSON catalog payload, upserting card rows by identity.
///
/// Cards with an identity update any existing row for the same normalized
/// identity; cards without one are always inserted fresh (they cannot be
/// matched to anything).
pub async fn import_catalog(db: &DatabaseConnection, json: &str) -> Result<Vec<card::Model>> {
    let cards = parse_catalog(json)?;
    let mut imported = Vec::with_capacity(cards.len());

    for item in cards {
        let existing = match item.identity.as_deref() {
            Some(key) => {
                Card::find()
                    .filter(card::Column::Identity.eq(key))
                    .one(db)
                    .await?
            }
            None => {
                debug!(name = %item.name, "catalog card has no variant identity");
                None
            }
        };

        let model = if let Some(row) = existing {
            let mut active: card::ActiveModel = row.into();
            active.name = Set(item.name);
            active.set_id = Set(item.set_id);
            active.number = Set(item.number);
            active.rarity = Set(item.rarity);
            active.badge = Set(item.badge);
            active.reverse_holo_exists = Set(item.reverse_holo_exists);
            active.image_url = Set(item.image_url);
            active.update(db).await?
        } else {
            let active = card::ActiveModel {
                identity: Set(item.identity),
                name: Set(item.name),
                set_id: Set(item.set_id),
                number: Set(item.number),
                rarity: Set(item.rarity),
                badge: Set(item.badge),
                reverse_holo_exists: Set(item.reverse_holo_exists),
                image_url: Set(item.image_url),
                ..Default::default()
            };
            active.insert(db).await?
        };

        imported.push(model);
    }

    Ok(imported)
}
