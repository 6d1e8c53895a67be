//! Discord transport for [`Session`]s.
//!
//! Follow-up interactions are collected on the session's message. The interaction
//! that produced the current event is kept until it is answered, either by an in-place
//! update or by an ephemeral notice.

use crate::{
    bot::{BotData, render},
    core::{
        render::Rendered,
        session::{ComponentEvent, Session, SessionConfig, SessionTransport, SessionView},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use poise::serenity_prelude::{
    ComponentInteraction, ComponentInteractionCollector, ComponentInteractionDataKind,
    CreateInteractionResponse, CreateInteractionResponseMessage, Message,
};
use std::time::Duration;

/// Session transport bound to one sent message.
pub struct DiscordTransport<'a> {
    ctx: poise::Context<'a, BotData, Error>,
    message: Message,
    pending: Option<ComponentInteraction>,
}

impl<'a> DiscordTransport<'a> {
    /// Binds a transport to a message that already shows the session's first render.
    pub const fn new(ctx: poise::Context<'a, BotData, Error>, message: Message) -> Self {
        Self {
            ctx,
            message,
            pending: None,
        }
    }
}

/// Maps a component interaction to the platform-neutral event.
pub fn component_event(interaction: &ComponentInteraction) -> ComponentEvent {
    let values = match &interaction.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.clone(),
        _ => Vec::new(),
    };
    ComponentEvent {
        user_id: interaction.user.id.get(),
        custom_id: interaction.data.custom_id.clone(),
        values,
    }
}

#[async_trait]
impl SessionTransport for DiscordTransport<'_> {
    async fn next_event(&mut self, idle: Duration) -> Option<ComponentEvent> {
        let interaction = ComponentInteractionCollector::new(self.ctx)
            .message_id(self.message.id)
            .timeout(idle)
            .await?;
        let event = component_event(&interaction);
        self.pending = Some(interaction);
        Some(event)
    }

    async fn acknowledge_update(&mut self, rendered: &Rendered) -> Result<()> {
        match self.pending.take() {
            Some(interaction) => {
                interaction
                    .create_response(
                        self.ctx,
                        CreateInteractionResponse::UpdateMessage(render::update_message(rendered)),
                    )
                    .await?;
            }
            None => {
                self.message
                    .edit(self.ctx, render::edit_message(rendered))
                    .await?;
            }
        }
        Ok(())
    }

    async fn notify(&mut self, text: &str) -> Result<()> {
        let Some(interaction) = self.pending.take() else {
            return Err(Error::Session {
                message: "no pending interaction to answer".to_string(),
            });
        };
        interaction
            .create_response(
                self.ctx,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(text)
                        .ephemeral(true),
                ),
            )
            .await?;
        Ok(())
    }

    async fn finalize(&mut self, rendered: &Rendered) -> Result<()> {
        self.message
            .edit(self.ctx, render::edit_message(rendered))
            .await?;
        Ok(())
    }
}

/// Sends the first render of `view`, then drives it as a session owned by the invoker.
///
/// Returns the state the session ended in.
pub async fn run_session<V: SessionView>(
    ctx: poise::Context<'_, BotData, Error>,
    view: V,
    state: V::State,
    idle_timeout: Duration,
) -> Result<V::State> {
    let config = SessionConfig {
        owner: ctx.author().id.get(),
        idle_timeout,
        support_url: ctx.data().config.support.server_url.clone(),
    };
    let session = Session::open(view, state, config)?;

    let handle = ctx.send(render::reply(&session.render())).await?;
    let message = handle.into_message().await?;

    let mut transport = DiscordTransport::new(ctx, message);
    Ok(session.run(&mut transport).await)
}
