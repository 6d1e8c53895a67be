//! HTTP client for the game REST API.
//!
//! Every request is a `GET` carrying the `access_token` query parameter. Responses wrap
//! their payload in a [`Status`](super::models::Status) envelope.

use super::models::{Airline, AirlineResponse, AllianceDetails, AllianceResponse};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Read access to the game, as used by the command handlers.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Looks an airline up by name.
    async fn airline_by_name(&self, name: &str) -> Result<Airline>;
    /// Looks an airline up by game id.
    async fn airline_by_id(&self, id: i64) -> Result<Airline>;
    /// Fetches an alliance with its member list.
    async fn alliance(&self, name: &str) -> Result<AllianceDetails>;
}

/// Game API client.
pub struct Am4Client {
    /// Base URL, without trailing slash
    base_url: String,
    /// Access token sent with every request
    access_token: String,
    /// HTTP client
    client: Client,
}

impl Am4Client {
    /// Creates a client for `base_url` authenticated with `access_token`.
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            client: Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        debug!("request {url} {query:?}");

        let body: T = self
            .client
            .get(&url)
            .query(&[("access_token", &self.access_token)])
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body)
    }

    async fn airline(&self, query: &[(&str, String)]) -> Result<Airline> {
        let response: AirlineResponse = self.get("airline", query).await?;
        debug!(
            requests_remaining = ?response.status.requests_remaining,
            "airline response"
        );
        response.status.check()?;
        response.airline.ok_or_else(|| Error::Api {
            message: "successful airline response without an airline".to_string(),
        })
    }
}

#[async_trait]
impl GameApi for Am4Client {
    async fn airline_by_name(&self, name: &str) -> Result<Airline> {
        info!("request airline {name}");
        self.airline(&[("name", name.to_string())]).await
    }

    async fn airline_by_id(&self, id: i64) -> Result<Airline> {
        info!("request airline #{id}");
        self.airline(&[("id", id.to_string())]).await
    }

    async fn alliance(&self, name: &str) -> Result<AllianceDetails> {
        info!("request alliance {name}");
        let response: AllianceResponse = self.get("alliance", &[("name", name.to_string())]).await?;
        debug!(
            requests_remaining = ?response.status.requests_remaining,
            members = response.members.len(),
            "alliance response"
        );
        response.status.check()?;

        let alliance = response.alliance.ok_or_else(|| Error::Api {
            message: "successful alliance response without an alliance".to_string(),
        })?;
        Ok(AllianceDetails {
            alliance,
            members: response.members,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use mockito::Matcher;

    const AIRLINE_BODY: &str = r#"{
        "status": {"success": true, "requestsRemaining": 799},
        "airline": {
            "id": 42, "name": "Sky Ltd", "level": 31, "realism": true, "share": 512.5,
            "reputation": {"airline": 88, "cargo": 71},
            "fleet": {"size": 120, "routes": 95},
            "founded": 1600000000, "achievements": 40, "alliance": "Star"
        }
    }"#;

    #[tokio::test]
    async fn test_airline_by_name_sends_token_and_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/airline")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("access_token".to_owned(), "secret".to_owned()),
                Matcher::UrlEncoded("name".to_owned(), "Sky Ltd".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(AIRLINE_BODY)
            .create_async()
            .await;

        let client = Am4Client::new(&server.url(), "secret");
        let airline = client.airline_by_name("Sky Ltd").await.unwrap();
        assert_eq!(airline.id, 42);
        assert_eq!(airline.fleet.size, 120);
        assert_eq!(airline.alliance.as_deref(), Some("Star"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unsuccessful_status_is_user_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/airline")
            .match_query(Matcher::UrlEncoded("id".to_owned(), "7".to_owned()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": {"success": false, "error": "Airline not found"}}"#)
            .create_async()
            .await;

        let client = Am4Client::new(&server.url(), "secret");
        let error = client.airline_by_id(7).await.unwrap_err();
        assert!(error.is_user_facing());
        assert_eq!(error.to_string(), "Airline not found");
    }

    #[tokio::test]
    async fn test_missing_payload_is_unexpected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/airline")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": {"success": true}}"#)
            .create_async()
            .await;

        let client = Am4Client::new(&server.url(), "secret");
        let error = client.airline_by_id(1).await.unwrap_err();
        assert!(matches!(error, Error::Api { .. }));
        assert!(!error.is_user_facing());
    }

    #[tokio::test]
    async fn test_alliance_with_members() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "status": {"success": true, "requestsRemaining": 10},
            "alliance": {"name": "Star", "rank": 3, "members": 2, "maxMembers": 60,
                         "value": 1500.0, "ipo": true, "minSv": 200.0},
            "members": [
                {"airlineId": 1, "company": "A", "joined": 1600000000, "flights": 10,
                 "contributed": 500, "dailyContribution": 5, "shareValue": 210.0,
                 "online": 1700000000},
                {"airlineId": 2, "company": "B", "joined": 1600000100, "flights": 20,
                 "contributed": 800, "dailyContribution": 9, "shareValue": 305.0, "season": 44,
                 "online": 1700000100}
            ]
        }"#;
        server
            .mock("GET", "/alliance")
            .match_query(Matcher::UrlEncoded("name".to_owned(), "Star".to_owned()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = Am4Client::new(&format!("{}/", server.url()), "secret");
        let details = client.alliance("Star").await.unwrap();
        assert_eq!(details.alliance.max_members, 60);
        assert_eq!(details.members.len(), 2);
        assert_eq!(details.members[1].season, 44);
    }

    #[tokio::test]
    async fn test_http_failure_is_unexpected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/alliance")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = Am4Client::new(&server.url(), "secret");
        let error = client.alliance("Star").await.unwrap_err();
        assert!(matches!(error, Error::Http(_)));
    }
}
