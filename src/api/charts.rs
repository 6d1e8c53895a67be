//! Chart rendering client.
//!
//! Posts a [`ChartConfig`] to the rendering service's `/chart/create` endpoint, which
//! stores the chart and answers with a short image URL.

use crate::{
    config::settings::ChartsConfig,
    core::chart::{ChartConfig, ChartRenderer},
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a> {
    chart: &'a ChartConfig,
    width: u32,
    height: u32,
    background_color: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    success: bool,
    #[serde(default)]
    url: Option<String>,
}

/// Chart rendering client.
pub struct ChartClient {
    settings: ChartsConfig,
    client: Client,
}

impl ChartClient {
    /// Creates a client from the `[charts]` settings.
    #[must_use]
    pub fn new(settings: ChartsConfig) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ChartRenderer for ChartClient {
    async fn render(&self, config: &ChartConfig) -> Result<String> {
        let url = format!("{}/chart/create", self.settings.base_url.trim_end_matches('/'));
        let request = CreateRequest {
            chart: config,
            width: self.settings.width,
            height: self.settings.height,
            background_color: &self.settings.background_color,
        };
        debug!("request {url}");

        let response: CreateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("response from {url} -> {response:?}");

        match response {
            CreateResponse {
                success: true,
                url: Some(image),
            } => Ok(image),
            _ => Err(Error::Api {
                message: "chart service did not return an image url".to_string(),
            }),
        }
    }
}
