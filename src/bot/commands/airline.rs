//! Airline Discord commands - airline lookup and account linking.
//!
//! Lookups without a name fall back to the invoker's linked airline. Linking validates
//! the name against the game API before anything is stored.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        api::models::Airline,
        bot::{BotData, render},
        core::{airline::airline_embed, profile},
        errors::{Error, Result},
    };
    use poise::{CreateReply, serenity_prelude as serenity};
    use tracing::info;

    /// Fetches the airline linked to `user_id`, or fails with `missing`.
    async fn linked_airline(
        ctx: poise::Context<'_, BotData, Error>,
        user_id: u64,
        missing: &str,
    ) -> Result<Airline> {
        let data = ctx.data();
        let profile = profile::get_profile(&data.database, &user_id.to_string())
            .await?
            .ok_or_else(|| Error::user(missing))?;
        data.api.airline_by_id(profile.airline_id).await
    }

    async fn send_airline(
        ctx: poise::Context<'_, BotData, Error>,
        airline: &Airline,
    ) -> Result<()> {
        ctx.send(CreateReply::default().embed(render::embed(&airline_embed(airline))))
            .await?;
        Ok(())
    }

    /// Shows an airline's profile.
    #[poise::command(slash_command)]
    pub async fn airline(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Airline name (defaults to your linked airline)"] name: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;

        let airline = match name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => ctx.data().api.airline_by_name(name).await?,
            _ => {
                linked_airline(
                    ctx,
                    ctx.author().id.get(),
                    "You have not linked an airline yet. Use `/link <name>` or give a name.",
                )
                .await?
            }
        };
        send_airline(ctx, &airline).await
    }

    /// Shows the airline linked to a user.
    #[poise::command(context_menu_command = "Airline")]
    pub async fn airline_context(
        ctx: poise::Context<'_, BotData, Error>,
        user: serenity::User,
    ) -> Result<()> {
        ctx.defer().await?;
        let airline = linked_airline(
            ctx,
            user.id.get(),
            &format!("{} has not linked an airline.", user.name),
        )
        .await?;
        send_airline(ctx, &airline).await
    }

    /// Links your Discord account to your airline.
    #[poise::command(slash_command)]
    pub async fn link(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your airline's name"] name: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let data = ctx.data();
        let airline = data.api.airline_by_name(name.trim()).await?;
        let user_id = ctx.author().id.to_string();
        profile::link_airline(&data.database, &user_id, &airline).await?;

        info!(user_id, airline_id = airline.id, "Linked airline");
        ctx.send(
            CreateReply::default()
                .content(format!("✅ Linked to **{}**.", airline.name))
                .embed(render::embed(&airline_embed(&airline)))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Removes the link to your airline.
    #[poise::command(slash_command)]
    pub async fn unlink(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        if !profile::unlink(&ctx.data().database, &user_id).await? {
            return Err(Error::user("You have no linked airline."));
        }
        ctx.send(
            CreateReply::default()
                .content("✅ Your airline link was removed.")
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
