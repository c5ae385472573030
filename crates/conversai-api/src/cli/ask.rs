//! `conversai ask` - one exchange through the same service the API uses.
//!
//! Handy for checking the token and endpoint without a browser.

use anyhow::Result;
use console::style;

use conversai_types::chat::ChatRequest;

use crate::state::AppState;

/// Send one message, persist the turn, print the reply.
///
/// # Examples
///
/// ```bash
/// conversai ask "Hello there"
/// conversai ask "And again" --session 0191f0c2-...
/// ```
pub async fn ask(state: &AppState, message: String, session: Option<String>, json: bool) -> Result<()> {
    let reply = state
        .chat_service
        .handle(ChatRequest::new(message, session))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("Bot:").green().bold(), reply.reply);
    println!();
    println!(
        "  {}",
        style(format!("session {}", reply.session_id)).dim()
    );
    println!();
    Ok(())
}
