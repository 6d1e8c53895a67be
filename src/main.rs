use am4_bot::{
    api::{Am4Client, ChartClient, LookupClient},
    bot::{self, BotData},
    config::{self, database},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings and the quiz bank
    let app_config = Arc::new(
        config::settings::load_default_config()
            .inspect_err(|e| error!("Failed to load configuration: {e}"))?,
    );
    let quiz_bank = config::quiz::load_default_questions()
        .inspect_err(|e| error!("Failed to load quiz questions: {e}"))?;
    info!(
        questions = quiz_bank.questions.len(),
        "Configuration loaded."
    );

    // 4. Connect to the database and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Build the REST collaborators
    let api_token = env::var("AM4_API_TOKEN")
        .inspect_err(|e| error!("AM4_API_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;
    let api = Arc::new(Am4Client::new(&app_config.api.base_url, &api_token));
    let charts = Arc::new(ChartClient::new(app_config.charts.clone()));
    let lookup = LookupClient::new(app_config.lookup.clone());

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    let data = BotData::new(db, app_config, api, charts, lookup, quiz_bank);
    bot::run_bot(token, data).await.map_err(Error::from)?;

    Ok(())
}
