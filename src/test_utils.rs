//! Shared test utilities.
//!
//! This module provides a helper for setting up test databases, builders for
//! API models with sensible defaults, and a log capture for asserting on tracing output.

use crate::{
    api::models::{Airline, Alliance, AllianceDetails, Fleet, Member, Reputation},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::{
    io,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{Level, subscriber::DefaultGuard};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an alliance member.
///
/// # Defaults
/// * `flights`: 100
/// * `share_value`: 100.0
/// * `joined`: `1_600_000_000 + airline_id`
/// * `season`, `online`: 0
pub fn member(airline_id: i64, company: &str, contributed: i64, daily: i64) -> Member {
    Member {
        airline_id,
        company: company.to_string(),
        joined: 1_600_000_000 + airline_id,
        flights: 100,
        contributed,
        daily_contribution: daily,
        share_value: 100.0,
        season: 0,
        online: 0,
    }
}

/// Creates a realism airline without an alliance.
///
/// # Defaults
/// * `level`: 30, `share`: 250.0
/// * `fleet`: 1 250 aircraft on 900 routes
/// * `reputation`: 80% pax, 70% cargo
pub fn airline(id: i64, name: &str) -> Airline {
    Airline {
        id,
        name: name.to_string(),
        level: 30,
        realism: true,
        share: 250.0,
        reputation: Reputation {
            airline: 80,
            cargo: 70,
        },
        fleet: Fleet {
            size: 1_250,
            routes: 900,
        },
        founded: 1_600_000_000,
        achievements: 25,
        alliance: None,
    }
}

/// Wraps `members` in an alliance named `name`.
pub fn alliance_details(name: &str, members: Vec<Member>) -> AllianceDetails {
    AllianceDetails {
        alliance: Alliance {
            name: name.to_string(),
            rank: 1,
            members: u32::try_from(members.len()).unwrap_or(u32::MAX),
            max_members: 60,
            value: 1_000.0,
            ipo: false,
            min_sv: 0.0,
        },
        members,
    }
}

/// Formatted tracing output collected by [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Lines logged at `ERROR`.
    pub fn errors(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains("ERROR"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes this thread's tracing events into a buffer until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so async tests see the capture too.
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}
