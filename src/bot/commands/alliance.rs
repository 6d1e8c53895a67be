//! Alliance Discord commands - overview, member table and contribution rollups.
//!
//! Every live fetch stores a snapshot of the members' daily contribution, which is
//! what `/alliance contributions` sums over.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        api::models::AllianceDetails,
        bot::{BotData, handlers::autocomplete, render, session::run_session},
        core::{
            alliance::alliance_embed,
            contribution,
            format::format_number,
            members::{MemberSortKey, MemberTable, SortDirection, SortState},
            reflow::reflow,
            render::{EmbedView, FIELD_VALUE_LIMIT, MAX_EMBED_FIELDS},
        },
        errors::{Error, Result},
    };
    use chrono::{Days, Utc};
    use poise::CreateReply;
    use tracing::warn;

    /// Fetches an alliance and records today's member snapshot.
    async fn fetch_alliance(
        ctx: poise::Context<'_, BotData, Error>,
        name: &str,
    ) -> Result<AllianceDetails> {
        let data = ctx.data();
        let details = data.api.alliance(name.trim()).await?;

        let today = Utc::now().date_naive();
        if let Err(e) = contribution::record_members(
            &data.database,
            &details.alliance.name,
            &details.members,
            today,
        )
        .await
        {
            warn!("Failed to record snapshot for {}: {e}", details.alliance.name);
        }
        Ok(details)
    }

    /// Alliance lookups.
    #[poise::command(
        slash_command,
        subcommands("alliance_info", "alliance_members", "alliance_contributions"),
        subcommand_required
    )]
    pub async fn alliance(_ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        Ok(())
    }

    /// Shows an alliance overview.
    #[poise::command(slash_command, rename = "info")]
    pub async fn alliance_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Alliance name"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        name: String,
    ) -> Result<()> {
        ctx.defer().await?;
        let details = fetch_alliance(ctx, &name).await?;
        ctx.send(CreateReply::default().embed(render::embed(&alliance_embed(&details)?)))
            .await?;
        Ok(())
    }

    /// Lists alliance members with sorting and pages.
    #[poise::command(slash_command, rename = "members")]
    pub async fn alliance_members(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Alliance name"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        name: String,
        #[description = "Field to sort by (default: contributed)"] sort_by: Option<MemberSortKey>,
        #[description = "Sort order (default depends on the field)"] order: Option<SortDirection>,
    ) -> Result<()> {
        ctx.defer().await?;
        let details = fetch_alliance(ctx, &name).await?;
        if details.members.is_empty() {
            return Err(Error::user(format!(
                "**{}** has no members.",
                details.alliance.name
            )));
        }

        let table = MemberTable::new(details.alliance.name, details.members);
        let state = SortState::new(sort_by.unwrap_or(MemberSortKey::Contributed), order);
        let idle = ctx.data().config.sessions.idle_timeout();
        run_session(ctx, table, state, idle).await?;
        Ok(())
    }

    /// Shows stored contribution totals over recent days.
    #[poise::command(slash_command, rename = "contributions")]
    pub async fn alliance_contributions(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Alliance name"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        name: String,
        #[description = "Number of days to include (default: 7)"]
        #[min = 1]
        #[max = 90]
        days: Option<u32>,
    ) -> Result<()> {
        let days = days.unwrap_or(7).max(1);
        let db = &ctx.data().database;
        let Some(stored) = contribution::resolve_alliance(db, &name).await? else {
            return Err(Error::user(format!(
                "No contributions stored for `{}` yet. Look it up with `/alliance info` first.",
                name.trim()
            )));
        };
        let since = Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| Error::user("That window reaches too far back."))?;

        let totals = contribution::contribution_totals(db, &stored, since).await?;
        if totals.is_empty() {
            return Err(Error::user(format!(
                "No contributions stored for `{stored}` in the last {days} day(s)."
            )));
        }

        let grand_total: i64 = totals.iter().map(|t| t.total).sum();
        let groups = reflow(&contribution::contribution_lines(&totals), FIELD_VALUE_LIMIT);
        let count = groups.len().min(MAX_EMBED_FIELDS);

        let mut embed = EmbedView::new(format!("📈 {stored} · last {days} day(s)"))
            .footer(format!("Total: ${}", format_number(grand_total)));
        for (i, group) in groups.into_iter().take(count).enumerate() {
            embed = embed.field(format!("Contributors ({}/{count})", i + 1), group, false);
        }

        ctx.send(CreateReply::default().embed(render::embed(&embed)))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
