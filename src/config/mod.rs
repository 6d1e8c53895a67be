/// Database configuration and connection management
pub mod database;

/// Quiz question bank loading from quiz.toml
pub mod quiz;

/// Application settings from config.toml and the environment
pub mod settings;

pub use settings::AppConfig;
