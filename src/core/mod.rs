//! Core logic - framework-agnostic sessions, formatting, charts and data access.
//!
//! Nothing in here depends on Discord types; the bot layer translates between
//! [`render::Rendered`] / [`session::ComponentEvent`] and serenity.

/// Airline embeds
pub mod airline;
/// Alliance embeds
pub mod alliance;
/// Chart-carousel session view
pub mod carousel;
/// Chart configuration model and descriptors
pub mod chart;
/// Comparison chart descriptors
pub mod compare;
/// Member contribution snapshots and rollups
pub mod contribution;
/// Number and date formatting
pub mod format;
/// Keyed non-blocking locks
pub mod lock;
/// Member sorting and the paginated member table
pub mod members;
/// Linked airline profiles
pub mod profile;
/// Quiz rounds, prompt and scores
pub mod quiz;
/// Bounded-width field reflow
pub mod reflow;
/// Platform-neutral reply model
pub mod render;
/// Ephemeral selection sessions
pub mod session;
