//! `conversai history` - recent turns of one session.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Longest message preview shown in the table, in characters.
const PREVIEW_CHARS: usize = 60;

/// Print up to `limit` turns, newest first.
///
/// # Examples
///
/// ```bash
/// conversai history 0191f0c2-...
/// conversai history 0191f0c2-... --limit 5 --json
/// ```
pub async fn show_history(state: &AppState, session_id: &str, limit: u32, json: bool) -> Result<()> {
    let turns = state.chat_service.store().recent(session_id, limit).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&turns)?);
        return Ok(());
    }

    if turns.is_empty() {
        println!();
        println!(
            "  {} No turns recorded for session '{}'.",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Time").fg(Color::White),
        Cell::new("You").fg(Color::White),
        Cell::new("Bot").fg(Color::White),
    ]);

    for turn in &turns {
        table.add_row(vec![
            Cell::new(turn.id.to_string()).fg(Color::DarkGrey),
            Cell::new(turn.created_at.format("%Y-%m-%d %H:%M:%S").to_string()).fg(Color::White),
            Cell::new(preview(&turn.user_input)).fg(Color::Cyan),
            Cell::new(preview(&turn.bot_response)).fg(Color::Green),
        ]);
    }

    println!();
    println!("  History for '{}'", style(session_id).cyan().bold());
    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// First line of `text`, cut to [`PREVIEW_CHARS`] characters.
pub fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn preview_cuts_on_char_boundaries() {
        let long = "é".repeat(100);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn preview_uses_first_line() {
        assert_eq!(preview("first\nsecond"), "first");
    }
}
