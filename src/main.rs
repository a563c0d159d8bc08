//! `Cardfolio` reporting shell.
//!
//! Connects to the collection database and prints the account overview:
//! per-album completion bars, combined progress, and the prestige score
//! with its rank. The UI surfaces that call the engine interactively live
//! elsewhere; this binary is the local reporting entry point.

use cardfolio::{
    config,
    core::report,
    errors::Result,
};
use dotenvy::dotenv;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Scoring tables from config.toml, or the built-in defaults
    let scoring = config::scoring::load_default_config()?.scoring;

    // 4. Database
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    let user_id = env::var("CARDFOLIO_USER").unwrap_or_else(|_| "collector".to_string());

    let overview = report::account_overview(&db, &user_id, 0, 0, &scoring).await?;

    println!("Collection overview for {user_id}");
    for album_report in &overview.albums {
        println!(
            "  {:<24} {}",
            album_report.album.name,
            report::format_progress_bar(album_report.progress, None)
        );
    }
    println!(
        "  {:<24} {}",
        "Overall",
        report::format_progress_bar(overview.combined, None)
    );
    println!(
        "  Score: {} ({} owned cards){}",
        overview.score.total(),
        overview.score.owned_cards,
        overview
            .rank
            .as_deref()
            .map(|rank| format!(" - rank {rank}"))
            .unwrap_or_default()
    );

    Ok(())
}
