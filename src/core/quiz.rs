//! Quiz business logic - rounds, per-game tallies and the guild leaderboard.
//!
//! A game is started by one member through an owner-only Start/Cancel prompt. Rounds are
//! then open to everyone in the channel: the first correct answer scores, and every user
//! gets a single attempt per round.

use crate::{
    config::quiz::{QuizBank, QuizQuestion},
    core::{
        render::{Button, ButtonTone, ControlRow, EmbedView, Rendered},
        session::{ComponentEvent, SessionView, Transition},
    },
    entities::{QuizScore, quiz_score},
    errors::{Error, Result},
};
use async_trait::async_trait;
use rand::{Rng, seq::IndexedRandom};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use std::collections::{HashMap, HashSet};

/// Custom id of the prompt's start button
pub const START_ID: &str = "quiz:start";
/// Custom id of the prompt's cancel button
pub const CANCEL_ID: &str = "quiz:cancel";
/// Prefix of answer button ids, followed by the option index
pub const ANSWER_PREFIX: &str = "quiz:answer:";

/// Picks up to `rounds` distinct questions from the bank in random order.
pub fn pick_questions<R: Rng + ?Sized>(
    bank: &QuizBank,
    rounds: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    bank.questions
        .choose_multiple(rng, rounds)
        .cloned()
        .collect()
}

/// Parses the option index out of an answer button id.
#[must_use]
pub fn parse_answer(custom_id: &str) -> Option<usize> {
    custom_id.strip_prefix(ANSWER_PREFIX)?.parse().ok()
}

/// What happened to one answer click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// First correct answer, the round is over
    Correct,
    /// Wrong answer, the user is out for this round
    Wrong,
    /// The user already answered this round
    AlreadyTried,
    /// Someone else already won the round
    Closed,
}

/// One question being answered.
#[derive(Debug, Clone)]
pub struct QuizRound {
    question: QuizQuestion,
    attempted: HashSet<u64>,
    winner: Option<u64>,
}

impl QuizRound {
    /// Opens a round for `question`.
    #[must_use]
    pub fn new(question: QuizQuestion) -> Self {
        Self {
            question,
            attempted: HashSet::new(),
            winner: None,
        }
    }

    /// Records `user`'s pick of option `choice`.
    pub fn answer(&mut self, user: u64, choice: usize) -> AnswerOutcome {
        if self.winner.is_some() {
            return AnswerOutcome::Closed;
        }
        if !self.attempted.insert(user) {
            return AnswerOutcome::AlreadyTried;
        }
        if choice == self.question.answer {
            self.winner = Some(user);
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Wrong
        }
    }

    /// The user who answered correctly, once someone has.
    #[must_use]
    pub const fn winner(&self) -> Option<u64> {
        self.winner
    }

    /// Question being asked.
    #[must_use]
    pub const fn question(&self) -> &QuizQuestion {
        &self.question
    }

    /// Message for the open round: the prompt and one button per option.
    #[must_use]
    pub fn render(&self, number: usize, total: usize) -> Rendered {
        let buttons = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| Button::new(format!("{ANSWER_PREFIX}{i}"), option.clone()))
            .collect();

        Rendered::embed(
            EmbedView::new(format!("Question {number}/{total}"))
                .description(self.question.prompt.clone())
                .footer("First correct answer scores. One try each."),
        )
        .with_row(ControlRow::Buttons(buttons))
    }

    /// Closed-round message revealing the answer and the winner, with buttons disabled.
    #[must_use]
    pub fn reveal(&self, number: usize, total: usize) -> Rendered {
        let correct = &self.question.options[self.question.answer];
        let verdict = match self.winner {
            Some(user) => format!("<@{user}> got it: **{correct}**"),
            None => format!("Nobody got it. The answer was **{correct}**"),
        };

        let buttons = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let tone = if i == self.question.answer {
                    ButtonTone::Success
                } else {
                    ButtonTone::Secondary
                };
                Button::new(format!("{ANSWER_PREFIX}{i}"), option.clone())
                    .tone(tone)
                    .disabled(true)
            })
            .collect();

        Rendered::embed(
            EmbedView::new(format!("Question {number}/{total}"))
                .description(format!("{}\n\n{verdict}", self.question.prompt)),
        )
        .with_row(ControlRow::Buttons(buttons))
    }
}

/// Points won during one game.
#[derive(Debug, Clone, Default)]
pub struct QuizGame {
    tally: HashMap<u64, i64>,
}

impl QuizGame {
    /// Credits one round to `user`.
    pub fn record_win(&mut self, user: u64) {
        *self.tally.entry(user).or_default() += 1;
    }

    /// Scores, highest first, ties broken by user id.
    #[must_use]
    pub fn standings(&self) -> Vec<(u64, i64)> {
        let mut standings: Vec<_> = self.tally.iter().map(|(&u, &p)| (u, p)).collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        standings
    }

    /// Final summary message.
    #[must_use]
    pub fn summary(&self) -> Rendered {
        let standings = self.standings();
        let description = if standings.is_empty() {
            "No points were scored.".to_string()
        } else {
            standings
                .iter()
                .enumerate()
                .map(|(rank, (user, points))| format!("{}. <@{user}> · {points}", rank + 1))
                .collect::<Vec<_>>()
                .join("\n")
        };
        Rendered::embed(EmbedView::new("Quiz finished").description(description))
    }
}

/// Whether the starter chose to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// No choice yet
    Pending,
    /// Start the game
    Start,
    /// Cancel it
    Cancel,
}

/// Owner-only, one-shot Start/Cancel prompt shown before a game.
#[derive(Debug, Clone)]
pub struct QuizPrompt {
    /// Number of rounds on offer
    pub rounds: usize,
}

#[async_trait]
impl SessionView for QuizPrompt {
    type State = PromptChoice;

    fn render(&self, state: &PromptChoice) -> Rendered {
        let description = match state {
            PromptChoice::Pending => format!(
                "A quiz of {} question(s) is ready. Press **Start** to begin.",
                self.rounds
            ),
            PromptChoice::Start => "Starting...".to_string(),
            PromptChoice::Cancel => "Quiz cancelled.".to_string(),
        };

        Rendered::embed(EmbedView::new("AM4 Quiz").description(description)).with_row(
            ControlRow::Buttons(vec![
                Button::new(START_ID, "Start").tone(ButtonTone::Success),
                Button::new(CANCEL_ID, "Cancel").tone(ButtonTone::Danger),
            ]),
        )
    }

    async fn update(
        &self,
        event: &ComponentEvent,
        _state: &PromptChoice,
    ) -> Result<Transition<PromptChoice>> {
        match event.custom_id.as_str() {
            START_ID => Ok(Transition::Finish(PromptChoice::Start)),
            CANCEL_ID => Ok(Transition::Finish(PromptChoice::Cancel)),
            other => Err(Error::user(format!("Unknown quiz control `{other}`."))),
        }
    }
}

/// Adds `points` to the user's guild score, creating the row on first win.
pub async fn add_points(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    points: i64,
) -> Result<quiz_score::Model> {
    let existing = QuizScore::find()
        .filter(quiz_score::Column::GuildId.eq(guild_id))
        .filter(quiz_score::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let total = row.points + points;
            let mut active: quiz_score::ActiveModel = row.into();
            active.points = Set(total);
            active.update(db).await.map_err(Into::into)
        }
        None => quiz_score::ActiveModel {
            guild_id: Set(guild_id.to_string()),
            user_id: Set(user_id.to_string()),
            points: Set(points),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

/// Top `limit` scores in a guild.
pub async fn leaderboard(
    db: &DatabaseConnection,
    guild_id: &str,
    limit: u64,
) -> Result<Vec<quiz_score::Model>> {
    QuizScore::find()
        .filter(quiz_score::Column::GuildId.eq(guild_id))
        .order_by_desc(quiz_score::Column::Points)
        .order_by_asc(quiz_score::Column::UserId)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
