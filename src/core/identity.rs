//! Card identity normalization.
//!
//! External card identifiers arrive with inconsistent casing and stray
//! whitespace depending on which table or import wrote them. Everything
//! that joins album entries to inventory records goes through
//! [`normalize`] so that two spellings of the same identifier always meet.

/// Canonicalizes a card's external identifier: trims whitespace and
/// lower-cases. Returns `None` for missing or empty input.
///
/// Two inputs that normalize equal are the same physical card. A card whose
/// identity is absent cannot participate in reconciliation and is treated
/// as never-owned; that is a deliberate silent degradation, not an error.
#[must_use]
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}
