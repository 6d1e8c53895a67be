//! Autocomplete handlers for Discord slash command parameters.
//!
//! Alliance names are suggested from the alliances the bot has already stored
//! contribution snapshots for, so frequently looked-up alliances are one keystroke away.

use crate::{bot::BotData, core::contribution, errors::Error};

/// Discord's limit on autocomplete choices.
const MAX_CHOICES: u64 = 25;

/// Provides autocomplete suggestions for alliance names.
///
/// Lookup failures produce no suggestions rather than an error, since the user can
/// always type the name in full.
pub async fn autocomplete_alliance_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    match contribution::tracked_alliances(db, partial.trim(), MAX_CHOICES).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("Alliance autocomplete failed: {e}");
            Vec::new()
        }
    }
}
