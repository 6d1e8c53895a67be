//! Quiz question bank loading from quiz.toml
//!
//! Questions are plain multiple-choice entries. The bank is validated at load time so
//! a broken entry fails at startup instead of in the middle of a game.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Most answer buttons that fit on one Discord action row
pub const MAX_OPTIONS: usize = 5;

/// Structure of the whole quiz.toml file
#[derive(Debug, Default, Deserialize)]
pub struct QuizBank {
    /// Questions available to `/quiz start`
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

/// A single multiple-choice question
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// Question text
    pub prompt: String,
    /// Answer choices, shown as buttons in order
    pub options: Vec<String>,
    /// Zero-based index of the correct choice
    pub answer: usize,
}

impl QuizBank {
    /// Checks every question for a usable option count and an in-range answer.
    pub fn validate(&self) -> Result<()> {
        for (index, question) in self.questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("Quiz question #{} has an empty prompt", index + 1),
                });
            }
            if !(2..=MAX_OPTIONS).contains(&question.options.len()) {
                return Err(Error::Config {
                    message: format!(
                        "Quiz question #{} must have between 2 and {MAX_OPTIONS} options",
                        index + 1
                    ),
                });
            }
            if question.answer >= question.options.len() {
                return Err(Error::Config {
                    message: format!("Quiz question #{} has an out-of-range answer", index + 1),
                });
            }
        }
        Ok(())
    }
}

/// Loads and validates a question bank from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A question fails validation
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<QuizBank> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read quiz file: {e}"),
    })?;

    let bank: QuizBank = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse quiz.toml: {e}"),
    })?;
    bank.validate()?;
    Ok(bank)
}

/// Loads the question bank from `./quiz.toml`, or an empty bank if the file is absent
pub fn load_default_questions() -> Result<QuizBank> {
    if Path::new("quiz.toml").exists() {
        load_questions("quiz.toml")
    } else {
        tracing::warn!("quiz.toml not found, /quiz start will be unavailable");
        Ok(QuizBank::default())
    }
}
