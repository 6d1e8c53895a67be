//! Response structures for the game REST API.
//!
//! Every endpoint wraps its payload in a `status` envelope; [`Status::check`] turns a
//! reported failure into an expected, user-facing error.

use crate::errors::{Error, Result};
use serde::Deserialize;

/// Status envelope present on every response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Whether the request succeeded
    pub success: bool,
    /// Reason for failure, shown to the user
    #[serde(default)]
    pub error: Option<String>,
    /// Remaining request quota for the access token
    #[serde(default)]
    pub requests_remaining: Option<u32>,
}

impl Status {
    /// Fails with [`Error::User`] carrying `error` when `success` is false.
    pub fn check(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::user(
                self.error
                    .clone()
                    .unwrap_or_else(|| "The game API rejected the request.".to_string()),
            ))
        }
    }
}

/// Passenger and cargo reputation, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Reputation {
    /// Passenger reputation
    pub airline: u32,
    /// Cargo reputation
    pub cargo: u32,
}

/// Fleet overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Fleet {
    /// Aircraft owned
    pub size: u32,
    /// Routes operated
    pub routes: u32,
}

/// Airline returned by `/airline`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    /// Game airline id
    pub id: i64,
    /// Airline name
    pub name: String,
    /// Player level
    pub level: u32,
    /// Realism (true) or easy mode
    pub realism: bool,
    /// Share value
    pub share: f64,
    /// Reputation
    pub reputation: Reputation,
    /// Fleet overview
    pub fleet: Fleet,
    /// Founding time, unix seconds
    pub founded: i64,
    /// Achievements unlocked
    pub achievements: u32,
    /// Alliance name, if any
    #[serde(default)]
    pub alliance: Option<String>,
}

/// Alliance returned by `/alliance`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alliance {
    /// Alliance name
    pub name: String,
    /// Global rank
    pub rank: u32,
    /// Current member count
    pub members: u32,
    /// Member cap
    pub max_members: u32,
    /// Alliance value
    pub value: f64,
    /// Whether members must have IPO
    pub ipo: bool,
    /// Minimum share value to join
    pub min_sv: f64,
}

/// Alliance member returned alongside an alliance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Game airline id
    pub airline_id: i64,
    /// Airline name
    pub company: String,
    /// Join time, unix seconds
    pub joined: i64,
    /// Flights flown for the alliance
    pub flights: u32,
    /// Lifetime contribution
    pub contributed: i64,
    /// Contribution today
    pub daily_contribution: i64,
    /// Share value
    pub share_value: f64,
    /// Contribution this season
    #[serde(default)]
    pub season: i64,
    /// Last online time, unix seconds
    pub online: i64,
}

/// Alliance plus its member list.
#[derive(Debug, Clone, PartialEq)]
pub struct AllianceDetails {
    /// The alliance
    pub alliance: Alliance,
    /// Its members
    pub members: Vec<Member>,
}

/// Raw `/airline` response.
#[derive(Debug, Deserialize)]
pub(crate) struct AirlineResponse {
    pub status: Status,
    #[serde(default)]
    pub airline: Option<Airline>,
}

/// Raw `/alliance` response.
#[derive(Debug, Deserialize)]
pub(crate) struct AllianceResponse {
    pub status: Status,
    #[serde(default)]
    pub alliance: Option<Alliance>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_failed_status_becomes_user_error() {
        let body = r#"{"success": false, "error": "Airline not found", "requestsRemaining": 10}"#;
        let status: Status = serde_json::from_str(body).unwrap();
        let error = status.check().unwrap_err();
        assert!(error.is_user_facing());
        assert_eq!(error.to_string(), "Airline not found");
    }

    #[test]
    fn test_failed_status_without_message_has_fallback() {
        let status: Status = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(
            status.check().unwrap_err().to_string(),
            "The game API rejected the request."
        );
    }

    #[test]
    fn test_parse_member() {
        let member: Member = serde_json::from_str(
            r#"{"airlineId": 7, "company": "Sky Ltd", "joined": 1600000000, "flights": 1200,
                "contributed": 5500000, "dailyContribution": 42000, "shareValue": 310.5,
                "online": 1700000000}"#,
        )
        .unwrap();
        assert_eq!(member.airline_id, 7);
        assert_eq!(member.season, 0);
        assert_eq!(member.daily_contribution, 42000);
    }
}
