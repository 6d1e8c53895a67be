//! Ephemeral selection sessions.
//!
//! A session binds a short-lived set of controls (buttons, select menus) on one sent
//! message to the user who invoked the command. Only that user can drive it; each
//! accepted event runs the view's `update`, then the message is re-rendered in place.
//! The session ends when its idle window elapses without an accepted event, or when the
//! view finishes it explicitly. On the way out every control is disabled with one
//! best-effort edit.
//!
//! The Discord side is abstracted behind [`SessionTransport`] so the lifecycle can be
//! exercised without a gateway connection.

use crate::{
    core::render::Rendered,
    errors::{Error, Result},
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// A follow-up interaction on the session's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEvent {
    /// Discord user who clicked
    pub user_id: u64,
    /// `custom_id` of the activated component
    pub custom_id: String,
    /// Selected values (select menus only)
    pub values: Vec<String>,
}

impl ComponentEvent {
    /// Button click.
    pub fn button(user_id: u64, custom_id: impl Into<String>) -> Self {
        Self {
            user_id,
            custom_id: custom_id.into(),
            values: Vec::new(),
        }
    }

    /// Select menu choice.
    pub fn select(user_id: u64, custom_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            user_id,
            custom_id: custom_id.into(),
            values: vec![value.into()],
        }
    }

    /// First selected value, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// No accepted event within the idle window
    Idle,
    /// A terminal action (game over, one-shot action consumed)
    Explicit,
}

/// Result of a view update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<S> {
    /// Keep the session open with the new state
    Continue(S),
    /// Apply the new state and end the session
    Finish(S),
}

/// What a session did with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not from the owner, or the session is closed
    Ignored,
    /// State replaced and message re-rendered
    Updated,
    /// The update raised an expected error; its message was shown
    Rejected,
    /// The update failed unexpectedly; a generic notice was shown
    Failed,
    /// The update ended the session
    Finished,
}

/// The command-specific half of a session: how to draw a state and how to react.
#[async_trait]
pub trait SessionView: Send + Sync {
    /// Render state driving the visual
    type State: Send + Sync;

    /// Full content of the message for `state`.
    fn render(&self, state: &Self::State) -> Rendered;

    /// Computes the next state for an accepted event.
    async fn update(
        &self,
        event: &ComponentEvent,
        state: &Self::State,
    ) -> Result<Transition<Self::State>>;
}

/// The platform half of a session.
#[async_trait]
pub trait SessionTransport: Send {
    /// Waits up to `idle` for the next interaction on the bound message.
    /// `None` means the window elapsed.
    async fn next_event(&mut self, idle: Duration) -> Option<ComponentEvent>;

    /// Answers the pending interaction by editing the message in place.
    async fn acknowledge_update(&mut self, rendered: &Rendered) -> Result<()>;

    /// Answers the pending interaction with a notice visible only to its author.
    async fn notify(&mut self, text: &str) -> Result<()>;

    /// Persists the final (disabled) render of the message.
    async fn finalize(&mut self, rendered: &Rendered) -> Result<()>;
}

/// Parameters fixed at session creation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The only user allowed to drive the session
    pub owner: u64,
    /// Window without accepted events after which the session closes
    pub idle_timeout: Duration,
    /// Support pointer for generic failure notices
    pub support_url: String,
}

/// A live session over a view and its current render state.
pub struct Session<V: SessionView> {
    view: V,
    state: V::State,
    config: SessionConfig,
    closed: bool,
}

impl<V: SessionView> Session<V> {
    /// Opens a session on a message that already shows `view.render(&state)`.
    pub fn open(view: V, state: V::State, config: SessionConfig) -> Result<Self> {
        if config.idle_timeout.is_zero() {
            return Err(Error::Session {
                message: "idle timeout must be a positive duration".to_string(),
            });
        }
        Ok(Self {
            view,
            state,
            config,
            closed: false,
        })
    }

    /// Current render state.
    pub const fn state(&self) -> &V::State {
        &self.state
    }

    /// Whether the session has ended.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current render; every control is disabled once the session is closed.
    pub fn render(&self) -> Rendered {
        let rendered = self.view.render(&self.state);
        if self.closed {
            rendered.disabled()
        } else {
            rendered
        }
    }

    /// Handles one follow-up interaction.
    ///
    /// Events from anyone but the owner, or arriving after close, are dropped without
    /// a reply. Transport failures while answering are logged, never propagated.
    pub async fn on_event<T: SessionTransport>(
        &mut self,
        transport: &mut T,
        event: &ComponentEvent,
    ) -> EventOutcome {
        if self.closed {
            return EventOutcome::Ignored;
        }
        if event.user_id != self.config.owner {
            tracing::debug!(
                owner = self.config.owner,
                user = event.user_id,
                "ignoring interaction from non-owner"
            );
            return EventOutcome::Ignored;
        }

        match self.view.update(event, &self.state).await {
            Ok(Transition::Continue(state)) => {
                self.state = state;
                let rendered = self.view.render(&self.state);
                if let Err(error) = transport.acknowledge_update(&rendered).await {
                    tracing::warn!("failed to acknowledge `{}`: {error}", event.custom_id);
                }
                EventOutcome::Updated
            }
            Ok(Transition::Finish(state)) => {
                self.state = state;
                self.closed = true;
                // The acknowledgement doubles as the finalizing edit.
                let rendered = self.render();
                if let Err(error) = transport.acknowledge_update(&rendered).await {
                    tracing::warn!("failed to persist final state: {error}");
                }
                tracing::debug!(reason = ?CloseReason::Explicit, "session closed");
                EventOutcome::Finished
            }
            Err(error) => self.report(transport, event, error).await,
        }
    }

    async fn report<T: SessionTransport>(
        &mut self,
        transport: &mut T,
        event: &ComponentEvent,
        error: Error,
    ) -> EventOutcome {
        let outcome = if error.is_user_facing() {
            EventOutcome::Rejected
        } else {
            tracing::error!(
                "session update for `{}` failed: {error:?}",
                event.custom_id
            );
            EventOutcome::Failed
        };

        let notice = error.user_notice(&self.config.support_url);
        if let Err(send_error) = transport.notify(&notice).await {
            tracing::warn!("failed to send session notice: {send_error}");
        }

        if matches!(error, Error::Session { .. }) {
            self.close(transport, CloseReason::Explicit).await;
        }
        outcome
    }

    /// Ends the session: disables every control and makes one best-effort edit.
    ///
    /// Returns `false` (and does nothing) if the session was already closed.
    pub async fn close<T: SessionTransport>(
        &mut self,
        transport: &mut T,
        reason: CloseReason,
    ) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;

        let rendered = self.render();
        if let Err(error) = transport.finalize(&rendered).await {
            tracing::warn!(?reason, "failed to disable session controls: {error}");
        }
        tracing::debug!(?reason, owner = self.config.owner, "session closed");
        true
    }

    /// Drives the session until it closes and returns the final state.
    ///
    /// Only accepted events (owner, session open) restart the idle window.
    pub async fn run<T: SessionTransport>(mut self, transport: &mut T) -> V::State {
        let idle = self.config.idle_timeout;
        let mut deadline = Instant::now() + idle;

        while !self.closed {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.close(transport, CloseReason::Idle).await;
                break;
            }

            match transport.next_event(remaining).await {
                Some(event) => {
                    if self.on_event(transport, &event).await != EventOutcome::Ignored {
                        deadline = Instant::now() + idle;
                    }
                }
                None => {
                    self.close(transport, CloseReason::Idle).await;
                }
            }
        }

        self.state
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by the session view tests.

    use super::*;
    use tokio::sync::mpsc;

    /// Transport fed from a channel that records everything sent back.
    pub struct ScriptedTransport {
        events: mpsc::UnboundedReceiver<ComponentEvent>,
        pub acks: Vec<Rendered>,
        pub notices: Vec<String>,
        pub finals: Vec<Rendered>,
        pub fail_finalize: bool,
    }

    impl ScriptedTransport {
        pub fn new() -> (Self, mpsc::UnboundedSender<ComponentEvent>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (
                Self {
                    events: rx,
                    acks: Vec::new(),
                    notices: Vec::new(),
                    finals: Vec::new(),
                    fail_finalize: false,
                },
                tx,
            )
        }

        /// Number of message edits (acknowledgements and finalizations).
        pub fn edits(&self) -> usize {
            self.acks.len() + self.finals.len()
        }
    }

    #[async_trait]
    impl SessionTransport for ScriptedTransport {
        async fn next_event(&mut self, idle: Duration) -> Option<ComponentEvent> {
            tokio::time::timeout(idle, self.events.recv())
                .await
                .ok()
                .flatten()
        }

        async fn acknowledge_update(&mut self, rendered: &Rendered) -> Result<()> {
            self.acks.push(rendered.clone());
            Ok(())
        }

        async fn notify(&mut self, text: &str) -> Result<()> {
            self.notices.push(text.to_string());
            Ok(())
        }

        async fn finalize(&mut self, rendered: &Rendered) -> Result<()> {
            if self.fail_finalize {
                return Err(Error::Api {
                    message: "Missing Access".to_string(),
                });
            }
            self.finals.push(rendered.clone());
            Ok(())
        }
    }
}
