//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the AM4 bot, including all slash
//! commands, autocomplete handlers, session plumbing and the shared bot context.

/// Discord command implementations (airline, alliance, compare, quiz, lookup, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Conversion of rendered views into serenity builders
pub mod render;
/// Discord transport for interactive sessions
pub mod session;

use crate::{
    api::{GameApi, LookupClient},
    config::{AppConfig, quiz::QuizBank},
    core::{chart::ChartRenderer, lock::KeyedLocks},
    errors::Error,
};
use poise::{CreateReply, serenity_prelude as serenity};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
/// This structure holds the database connection, the REST collaborators and the
/// guild locks that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Application settings
    pub config: Arc<AppConfig>,
    /// Game API
    pub api: Arc<dyn GameApi>,
    /// Chart renderer used by chart carousels
    pub charts: Arc<dyn ChartRenderer>,
    /// Dictionary, fact and QR lookups
    pub lookup: LookupClient,
    /// Questions available to `/quiz start`
    pub quiz_bank: QuizBank,
    /// One running quiz per guild
    pub guild_locks: KeyedLocks<u64>,
}

impl BotData {
    /// Creates a new `BotData` with no guild lock held.
    #[must_use]
    pub fn new(
        database: DatabaseConnection,
        config: Arc<AppConfig>,
        api: Arc<dyn GameApi>,
        charts: Arc<dyn ChartRenderer>,
        lookup: LookupClient,
        quiz_bank: QuizBank,
    ) -> Self {
        Self {
            database,
            config,
            api,
            charts,
            lookup,
            quiz_bank,
            guild_locks: KeyedLocks::new(),
        }
    }
}

/// Classifies a failed command and returns the notice to show the invoker.
///
/// Expected errors are shown verbatim and not logged. Anything else is logged once with
/// the command name and replaced by a generic notice.
#[must_use]
pub fn command_failure(error: &Error, command: &str, support_url: &str) -> String {
    if !error.is_user_facing() {
        error!(command, "Command failed: {error:?}");
    }
    error.user_notice(support_url)
}

/// Routes command errors to the user.
///
/// `ctx.send` picks the initial reply, the deferred edit or a follow-up depending on
/// how far the interaction got.
pub async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let notice = command_failure(
                &error,
                &ctx.command().qualified_name,
                &ctx.data().config.support.server_url,
            );
            if let Err(e) = ctx
                .send(CreateReply::default().content(notice).ephemeral(true))
                .await
            {
                warn!("Failed to send error notice: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::airline(),
        commands::airline_context(),
        commands::link(),
        commands::unlink(),
        commands::alliance(),
        commands::compare(),
        commands::quiz(),
        commands::define(),
        commands::fact(),
        commands::qr(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))
}
