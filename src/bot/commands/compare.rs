//! Comparison Discord commands - chart carousels over airlines and alliances.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, session::run_session},
        core::{
            carousel::ChartCarousel,
            chart::ChartDescriptor,
            compare::{airline_charts, alliance_charts},
        },
        errors::{Error, Result},
    };
    use std::sync::Arc;

    /// Drops blank and repeated names, keeping the order given.
    fn distinct_names(names: [Option<String>; 5]) -> Result<Vec<String>> {
        let mut distinct: Vec<String> = Vec::new();
        for name in names.into_iter().flatten() {
            let name = name.trim().to_string();
            if !name.is_empty()
                && !distinct.iter().any(|n| n.eq_ignore_ascii_case(&name))
            {
                distinct.push(name);
            }
        }
        if distinct.len() < 2 {
            return Err(Error::user("Give at least two different names to compare."));
        }
        Ok(distinct)
    }

    async fn run_carousel<T: Send + Sync>(
        ctx: poise::Context<'_, BotData, Error>,
        title: String,
        entities: Vec<T>,
        descriptors: Vec<ChartDescriptor<T>>,
    ) -> Result<()> {
        let data = ctx.data();
        let carousel = ChartCarousel::new(title, entities, descriptors, Arc::clone(&data.charts))?;
        let state = carousel.state_at(0).await?;
        run_session(ctx, carousel, state, data.config.sessions.idle_timeout()).await?;
        Ok(())
    }

    /// Compares airlines or alliances side by side.
    #[poise::command(
        slash_command,
        subcommands("compare_airlines", "compare_alliances"),
        subcommand_required
    )]
    pub async fn compare(_ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        Ok(())
    }

    /// Compares up to five airlines.
    #[poise::command(slash_command, rename = "airlines")]
    pub async fn compare_airlines(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "First airline"] a: String,
        #[description = "Second airline"] b: String,
        #[description = "Third airline"] c: Option<String>,
        #[description = "Fourth airline"] d: Option<String>,
        #[description = "Fifth airline"] e: Option<String>,
    ) -> Result<()> {
        let names = distinct_names([Some(a), Some(b), c, d, e])?;
        ctx.defer().await?;

        let mut airlines = Vec::with_capacity(names.len());
        for name in &names {
            airlines.push(ctx.data().api.airline_by_name(name).await?);
        }

        let title = airlines
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" vs ");
        run_carousel(ctx, title, airlines, airline_charts()).await
    }

    /// Compares up to five alliances.
    #[poise::command(slash_command, rename = "alliances")]
    pub async fn compare_alliances(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "First alliance"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        a: String,
        #[description = "Second alliance"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        b: String,
        #[description = "Third alliance"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        c: Option<String>,
        #[description = "Fourth alliance"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        d: Option<String>,
        #[description = "Fifth alliance"]
        #[autocomplete = "autocomplete::autocomplete_alliance_name"]
        e: Option<String>,
    ) -> Result<()> {
        let names = distinct_names([Some(a), Some(b), c, d, e])?;
        ctx.defer().await?;

        let mut alliances = Vec::with_capacity(names.len());
        for name in &names {
            alliances.push(ctx.data().api.alliance(name).await?);
        }

        let title = alliances
            .iter()
            .map(|a| a.alliance.name.as_str())
            .collect::<Vec<_>>()
            .join(" vs ");
        run_carousel(ctx, title, alliances, alliance_charts()).await
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]
        use super::*;

        #[test]
        fn test_distinct_names_dedups_case_insensitively() {
            let names = distinct_names([
                Some("Sky".into()),
                Some(" sky ".into()),
                Some("Blue".into()),
                None,
                Some(String::new()),
            ])
            .unwrap();
            assert_eq!(names, vec!["Sky", "Blue"]);
        }

        #[test]
        fn test_distinct_names_needs_two() {
            let error = distinct_names([Some("Sky".into()), Some("SKY".into()), None, None, None])
                .unwrap_err();
            assert!(error.is_user_facing());
        }
    }
}

// Re-export all commands
pub use inner::*;
