//! Report generation business logic.
//!
//! Builds album- and account-level completion summaries from freshly
//! reconciled data. Reports never reuse in-memory state from the view that
//! triggered a toggle; each one re-runs reconciliation and the canonical
//! progress formula over what the database holds now.

use crate::{
    config::scoring::ScoringConfig,
    core::{progress, reconcile, score},
    entities::album,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Completion summary for one album.
#[derive(Debug, Clone)]
pub struct AlbumReport {
    /// The album being reported on
    pub album: album::Model,
    /// Raw filled/total slot counts
    pub progress: progress::Progress,
    /// Number of card entries in the album
    pub entry_count: usize,
}

/// Account-level summary across all of a user's albums.
#[derive(Debug, Clone)]
pub struct AccountOverview {
    /// Per-album reports, in album creation order
    pub albums: Vec<AlbumReport>,
    /// Combined slot counts over every album
    pub combined: progress::Progress,
    /// Prestige score breakdown
    pub score: score::AccountScore,
    /// Name of the rank the score earns, if the rank table yields one
    pub rank: Option<String>,
}

/// Generates a completion report for one album by reconciling its entries
/// against the owner's inventory and aggregating slots.
pub async fn generate_album_report(
    db: &DatabaseConnection,
    album_id: i64,
) -> Result<AlbumReport> {
    let album = crate::core::album::get_album_by_id(db, album_id)
        .await?
        .ok_or(Error::AlbumNotFound { id: album_id })?;

    let reconciled = reconcile::reconcile_album(db, &album).await?;
    let progress = progress::compute_progress(&reconciled, album.tracking_mode);

    Ok(AlbumReport {
        album,
        progress,
        entry_count: reconciled.len(),
    })
}

/// Generates the account overview: every album's report, the combined
/// progress, and the prestige score with its rank.
///
/// Each album is counted under its own tracking mode, with the same slot
/// formula the album view uses.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Account to summarize
/// * `graded_count` / `sealed_count` - Item counts from outside the card tables
/// * `config` - Injected scoring tables
pub async fn account_overview(
    db: &DatabaseConnection,
    user_id: &str,
    graded_count: u32,
    sealed_count: u32,
    config: &ScoringConfig,
) -> Result<AccountOverview> {
    let albums = crate::core::album::get_albums_for_user(db, user_id).await?;

    let mut reports = Vec::with_capacity(albums.len());
    let mut combined = progress::Progress::default();
    for album in albums {
        let report = generate_album_report(db, album.id).await?;
        combined = combined.combine(report.progress);
        reports.push(report);
    }

    let account_score =
        score::compute_account_score(db, user_id, graded_count, sealed_count, config).await?;
    let rank = score::rank_for_score(account_score.total(), config).map(|r| r.name.clone());

    Ok(AccountOverview {
        albums: reports,
        combined,
        score: account_score,
        rank,
    })
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(progress: progress::Progress, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let percent = progress.display_percent();

    // Cast safety: percent is in [0, 100], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((f64::from(percent) / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!(
        "[{filled_str}{empty_str}] {percent}% ({}/{})",
        progress.filled, progress.total
    )
}
