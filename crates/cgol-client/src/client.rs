//! HTTP client for the simulation service.

use anyhow::Result;
use cgol_core::{ClientConfig, GameOutcome, GameRequest};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct GameClient {
    config: ClientConfig,
    http_client: Client,
}

impl GameClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a simulation for one word on the server
    #[instrument(skip(self))]
    pub async fn play(&self, word: &str) -> Result<GameOutcome> {
        let url = format!("{}/cgol/game", self.config.server_url.trim_end_matches('/'));

        debug!("Requesting game from {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&GameRequest::new(word))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let error_text = response.text().await?;
            Err(anyhow::anyhow!("HTTP {} - {}", status, error_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GameClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.config().server_url, "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_play_reports_connection_errors() {
        let config = ClientConfig {
            // Port 9 (discard) is not expected to serve HTTP
            server_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let client = GameClient::new(config).unwrap();
        assert!(client.play("glider").await.is_err());
    }
}
