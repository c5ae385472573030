//! `conversai init-db` - create the data directory and apply migrations.

use anyhow::Result;
use console::style;

use conversai_core::store::repository::ConversationRepository;
use conversai_infra::config::database_path;

use crate::state::AppState;

/// Report the database location and how many turns it holds.
///
/// `AppState::init` has already created the file and run migrations by the
/// time this runs, so a second invocation is harmless.
pub async fn init_db(state: &AppState, json: bool) -> Result<()> {
    let path = database_path(&state.data_dir, &state.config);
    let turns = state.chat_service.store().repo().count_turns().await?;

    if json {
        let report = serde_json::json!({
            "database": path.display().to_string(),
            "turns": turns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Database ready at {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );
    println!("  {} turn{} stored", turns, if turns == 1 { "" } else { "s" });
    println!();
    Ok(())
}
