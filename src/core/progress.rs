//! Completion progress aggregation.
//!
//! Walks reconciled entries, resolves each card's applicable slot kinds,
//! and counts filled against total. The percent is rounded and defined as 0
//! for an empty album; clamping at 100 happens only in the display helper,
//! so callers that want the raw ratio (which can exceed 100 when upstream
//! data holds more finishes than the card has slots) still get it.

use crate::{
    core::{
        reconcile::ReconciledCard,
        slots::{self, SlotKind},
    },
    entities::{TrackingMode, album_card},
};

/// Raw completion counts for a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Number of filled slots
    pub filled: u32,
    /// Number of applicable slots
    pub total: u32,
}

impl Progress {
    /// Rounded completion percentage. An empty total yields 0, never a
    /// division error.
    #[must_use]
    pub fn percent(self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        // Cast safety: filled and total are slot counts, far below 2^32/100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = (f64::from(self.filled) * 100.0 / f64::from(self.total)).round() as u32;
        rounded
    }

    /// Completion percentage clamped to 100 for display. The clamp is a
    /// presentation decision; [`Self::percent`] reports the raw ratio.
    #[must_use]
    pub fn display_percent(self) -> u32 {
        self.percent().min(100)
    }

    /// Sums two progress counts, used for account-level aggregation.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        Self {
            filled: self.filled + other.filled,
            total: self.total + other.total,
        }
    }
}

/// Whether one slot kind is filled for an entry, per the canonical flag
/// mapping: the whole-card slot maps to `acquired`, finish slots map to
/// their per-finish flags.
#[must_use]
pub const fn slot_filled(entry: &album_card::Model, kind: SlotKind) -> bool {
    match kind {
        SlotKind::Whole => entry.acquired,
        SlotKind::Normal => entry.acquired_normal,
        SlotKind::Holo => entry.acquired_holo,
        SlotKind::Reverse => entry.acquired_reverse,
    }
}

/// Computes filled and total slot counts over reconciled entries.
///
/// This is the one slot-count formula in the system; the album report, the
/// account overview, and the profile view all call it rather than
/// re-deriving slot math.
#[must_use]
pub fn compute_progress(entries: &[ReconciledCard], mode: TrackingMode) -> Progress {
    let mut progress = Progress::default();

    for reconciled in entries {
        for kind in slots::resolve_slot_kinds(&reconciled.profile, mode) {
            progress.total += 1;
            if slot_filled(&reconciled.entry, kind) {
                progress.filled += 1;
            }
        }
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slots::CardProfile;

    fn entry(
        acquired: bool,
        normal: bool,
        holo: bool,
        reverse: bool,
    ) -> album_card::Model {
        album_card::Model {
            id: 0,
            album_id: 1,
            card_id: None,
            card_identity: None,
            acquired,
            acquired_normal: normal,
            acquired_holo: holo,
            acquired_reverse: reverse,
            quantity_normal: i32::from(normal),
            quantity_holo: i32::from(holo),
            quantity_reverse: i32::from(reverse),
            added_at: chrono::Utc::now(),
        }
    }

    fn reconciled(
        entry: album_card::Model,
        rarity: &str,
        badge: Option<&str>,
        reverse_exists: bool,
    ) -> ReconciledCard {
        ReconciledCard {
            entry,
            profile: CardProfile {
                rarity: rarity.to_string(),
                badge: badge.map(ToString::to_string),
                reverse_holo_exists: Some(reverse_exists),
            },
        }
    }

    #[test]
    fn test_empty_album_is_zero_not_nan() {
        let progress = compute_progress(&[], TrackingMode::Simple);
        assert_eq!(
            progress,
            Progress {
                filled: 0,
                total: 0
            }
        );
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.display_percent(), 0);
    }

    #[test]
    fn test_simple_album_two_of_three() {
        let entries = vec![
            reconciled(entry(true, true, false, false), "Common", None, true),
            reconciled(entry(true, true, false, false), "Rare", None, true),
            reconciled(entry(false, false, false, false), "Rare Holo", None, true),
        ];
        let progress = compute_progress(&entries, TrackingMode::Simple);
        assert_eq!(progress.filled, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percent(), 67);
    }

    #[test]
    fn test_master_badged_card_half_filled() {
        // Badge="V", reverse exists: slots are {Holo, Reverse}; owning only
        // the holo finish fills one of two.
        let entries = vec![reconciled(
            entry(true, false, true, false),
            "Ultra Rare",
            Some("V"),
            true,
        )];
        let progress = compute_progress(&entries, TrackingMode::Master);
        assert_eq!(progress.filled, 1);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.percent(), 50);
    }

    #[test]
    fn test_master_ignores_flags_for_inapplicable_slots() {
        // A badged card has no normal slot; a stray acquired_normal flag
        // must not count.
        let entries = vec![reconciled(
            entry(true, true, false, false),
            "Ultra Rare",
            Some("EX"),
            false,
        )];
        let progress = compute_progress(&entries, TrackingMode::Master);
        assert_eq!(progress.total, 1);
        assert_eq!(progress.filled, 0);
    }

    #[test]
    fn test_rounding() {
        let progress = Progress {
            filled: 1,
            total: 3,
        };
        assert_eq!(progress.percent(), 33);
        let progress = Progress {
            filled: 2,
            total: 3,
        };
        assert_eq!(progress.percent(), 67);
        let progress = Progress {
            filled: 1,
            total: 8,
        };
        assert_eq!(progress.percent(), 13);
    }

    #[test]
    fn test_display_clamps_but_raw_percent_does_not() {
        let over = Progress {
            filled: 3,
            total: 2,
        };
        assert_eq!(over.percent(), 150);
        assert_eq!(over.display_percent(), 100);
    }

    #[test]
    fn test_combine_sums_counts() {
        let a = Progress {
            filled: 2,
            total: 3,
        };
        let b = Progress {
            filled: 1,
            total: 2,
        };
        assert_eq!(
            a.combine(b),
            Progress {
                filled: 3,
                total: 5
            }
        );
    }
}
