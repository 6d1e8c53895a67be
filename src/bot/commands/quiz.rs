//! Quiz Discord commands - guild quiz games and the leaderboard.
//!
//! Only one game runs per guild at a time. The guild lock is held for the whole
//! command and released when the handler returns, whichever way it returns.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render, session::run_session},
        core::{
            quiz::{
                self, AnswerOutcome, PromptChoice, QuizGame, QuizPrompt, QuizRound,
                parse_answer, pick_questions,
            },
            render::EmbedView,
        },
        errors::{Error, Result},
    };
    use poise::{
        CreateReply,
        serenity_prelude::{
            ComponentInteractionCollector, CreateInteractionResponse,
            CreateInteractionResponseMessage, Message,
        },
    };
    use std::time::Duration;
    use tokio::time::Instant;
    use tracing::{info, warn};

    const DEFAULT_ROUNDS: usize = 5;
    const LEADERBOARD_SIZE: u64 = 10;

    const fn answer_notice(outcome: AnswerOutcome) -> &'static str {
        match outcome {
            AnswerOutcome::Correct => "✅ Correct!",
            AnswerOutcome::Wrong => "❌ Wrong answer.",
            AnswerOutcome::AlreadyTried => "You already answered this question.",
            AnswerOutcome::Closed => "This question is already over.",
        }
    }

    /// Collects answers on `message` until someone wins or `window` runs out.
    async fn collect_answers(
        ctx: poise::Context<'_, BotData, Error>,
        round: &mut QuizRound,
        message: &Message,
        window: Duration,
    ) {
        let deadline = Instant::now() + window;

        while round.winner().is_none() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let Some(interaction) = ComponentInteractionCollector::new(ctx)
                .message_id(message.id)
                .timeout(remaining)
                .await
            else {
                break;
            };
            let Some(choice) = parse_answer(&interaction.data.custom_id) else {
                continue;
            };

            let outcome = round.answer(interaction.user.id.get(), choice);
            let response = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(answer_notice(outcome))
                    .ephemeral(true),
            );
            if let Err(e) = interaction.create_response(ctx, response).await {
                warn!("Failed to answer quiz interaction: {e}");
            }
        }
    }

    /// Aviation quiz.
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("quiz_start", "quiz_leaderboard"),
        subcommand_required
    )]
    pub async fn quiz(_ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        Ok(())
    }

    /// Starts a quiz game in this server.
    #[poise::command(slash_command, guild_only, rename = "start")]
    pub async fn quiz_start(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Number of questions (default: 5)"]
        #[min = 1]
        #[max = 20]
        rounds: Option<u32>,
    ) -> Result<()> {
        let guild_id = ctx
            .guild_id()
            .ok_or_else(|| Error::user("Quizzes can only be played in a server."))?;
        let data = ctx.data();
        if data.quiz_bank.questions.is_empty() {
            return Err(Error::user("No quiz questions are configured."));
        }

        let Some(_guard) = data.guild_locks.try_acquire(guild_id.get()) else {
            return Err(Error::user("A quiz is already running in this server."));
        };

        let rounds = rounds
            .and_then(|r| usize::try_from(r).ok())
            .unwrap_or(DEFAULT_ROUNDS);
        let questions = pick_questions(&data.quiz_bank, rounds, &mut rand::rng());
        let total = questions.len();

        let choice = run_session(
            ctx,
            QuizPrompt { rounds: total },
            PromptChoice::Pending,
            data.config.sessions.confirm_timeout(),
        )
        .await?;
        if choice != PromptChoice::Start {
            return Ok(());
        }

        info!(guild_id = guild_id.get(), rounds = total, "Quiz started");
        let mut game = QuizGame::default();
        let window = data.config.sessions.quiz_round();

        for (i, question) in questions.into_iter().enumerate() {
            let number = i + 1;
            let mut round = QuizRound::new(question);

            let handle = ctx.send(render::reply(&round.render(number, total))).await?;
            let mut message = handle.into_message().await?;

            collect_answers(ctx, &mut round, &message, window).await;

            if let Err(e) = message
                .edit(ctx, render::edit_message(&round.reveal(number, total)))
                .await
            {
                warn!("Failed to reveal quiz answer: {e}");
            }

            if let Some(winner) = round.winner() {
                game.record_win(winner);
                quiz::add_points(
                    &data.database,
                    &guild_id.to_string(),
                    &winner.to_string(),
                    1,
                )
                .await?;
            }
        }

        ctx.send(render::reply(&game.summary())).await?;
        Ok(())
    }

    /// Shows the top quiz players in this server.
    #[poise::command(slash_command, guild_only, rename = "leaderboard")]
    pub async fn quiz_leaderboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let guild_id = ctx
            .guild_id()
            .ok_or_else(|| Error::user("The leaderboard only exists in servers."))?;

        let scores =
            quiz::leaderboard(&ctx.data().database, &guild_id.to_string(), LEADERBOARD_SIZE)
                .await?;
        if scores.is_empty() {
            return Err(Error::user("Nobody has scored in this server yet."));
        }

        let lines = scores
            .iter()
            .enumerate()
            .map(|(rank, s)| format!("{}. <@{}> · {} pts", rank + 1, s.user_id, s.points))
            .collect::<Vec<_>>()
            .join("\n");
        let embed = EmbedView::new("🏆 Quiz leaderboard").description(lines);
        ctx.send(CreateReply::default().embed(render::embed(&embed)))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
