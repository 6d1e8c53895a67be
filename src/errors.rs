//! Unified error type for the bot.
//!
//! Only [`Error::User`] is an expected, user-facing failure. Every other variant is
//! unexpected: it is logged server-side and the user only sees a generic notice.

use thiserror::Error;

/// Message shown to users when a command fails for a reason they cannot act on.
pub const GENERIC_FAILURE: &str = "❌ Something went wrong while processing this request.";

/// All errors produced by the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Expected failure, shown to the invoking user verbatim.
    #[error("{message}")]
    User {
        /// Human-readable message for the user
        message: String,
    },

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// A collaborator answered with something we could not use.
    #[error("Unexpected API response: {message}")]
    Api {
        /// Description of the malformed response
        message: String,
    },

    /// A session was opened or driven against its contract.
    #[error("Session error: {message}")]
    Session {
        /// Description of the violated precondition
        message: String,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport failure talking to a REST collaborator.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Discord / serenity failure.
    #[error("Discord error: {0}")]
    Discord(Box<poise::serenity_prelude::Error>),

    /// Formatting error while building a message.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Missing or invalid environment variable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

impl Error {
    /// Builds an expected, user-facing error.
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Whether this error is meant to be shown to the user verbatim.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// Text delivered to the user for this error.
    ///
    /// Expected errors are returned verbatim. Anything else collapses into
    /// [`GENERIC_FAILURE`] plus a pointer to the support server, so internal
    /// details never leak into Discord.
    #[must_use]
    pub fn user_notice(&self, support_url: &str) -> String {
        match self {
            Self::User { message } => message.clone(),
            _ => format!("{GENERIC_FAILURE}\nIf this keeps happening, let us know: {support_url}"),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
