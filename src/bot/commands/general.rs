//! General Discord commands - ping and help.
//! This module contains simple commands that don't touch the database or any
//! REST collaborator.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = format!(
            "**AM4 Bot Help**\n\
            Here is a summary of all available commands.\n\n\
            **Airlines**\n\
            • `/airline [name]` - Shows an airline, or your linked one.\n\
            • `/link <name>` / `/unlink` - Links your Discord account to your airline.\n\
            • Right-click a user → Apps → **Airline** - Shows their linked airline.\n\n\
            **Alliances**\n\
            • `/alliance info <name>` - Alliance overview and today's top contributors.\n\
            • `/alliance members <name> [sort_by] [order]` - Sortable member list.\n\
            • `/alliance contributions <name> [days]` - Contribution totals over recent days.\n\n\
            **Comparisons**\n\
            • `/compare airlines <a> <b> [c] [d] [e]` - Chart carousel over airlines.\n\
            • `/compare alliances <a> <b> [c] [d] [e]` - Chart carousel over alliances.\n\n\
            **Fun**\n\
            • `/quiz start [rounds]` / `/quiz leaderboard` - Aviation quiz.\n\
            • `/define <word>`, `/fact`, `/qr <text>` - Quick lookups.\n\n\
            Need help? Join the support server: {}",
            ctx.data().config.support.server_url
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
