//! `conversai sessions` - known sessions with turn counts.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// List sessions, newest activity first.
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let sessions = state.chat_service.sessions().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start one with: {}",
            style("i").blue().bold(),
            style("conversai ask \"Hello\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Session").fg(Color::White),
        Cell::new("Turns").fg(Color::White),
        Cell::new("Last activity").fg(Color::White),
    ]);

    for session in &sessions {
        table.add_row(vec![
            Cell::new(&session.session_id).fg(Color::Cyan),
            Cell::new(session.turn_count.to_string()).fg(Color::White),
            Cell::new(session.last_activity.format("%Y-%m-%d %H:%M").to_string())
                .fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}
