//! API client - Chiamate HTTP verso il server del feed

use crate::models::{Feed, UserSettings};
use reqwest::{Client, Response};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Serialize)]
struct ResetBody {
    userid: i64,
}

/// Client autenticato con token Bearer
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    base_url: String,
    token: String,
}

impl FeedClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Server answered {}: {}", status, body);
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    #[instrument(skip(self))]
    pub async fn fetch_feed(&self) -> Result<Feed, ClientError> {
        let response = self
            .http
            .get(self.url("/feed"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let feed: Feed = Self::check(response).await?.json().await?;
        debug!("Fetched {} letters", feed.letters.len());
        Ok(feed)
    }

    #[instrument(skip(self, settings), fields(userid = settings.userid))]
    pub async fn record_usersettings(&self, settings: &UserSettings) -> Result<bool, ClientError> {
        let response = self
            .http
            .post(self.url("/usersettings/record"))
            .bearer_auth(&self.token)
            .json(settings)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn reset_usersettings(&self, userid: i64) -> Result<bool, ClientError> {
        let response = self
            .http
            .post(self.url("/usersettings/reset"))
            .bearer_auth(&self.token)
            .json(&ResetBody { userid })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Salvataggio senza attesa: l'esito viene solo registrato nei log
    pub fn spawn_record(&self, settings: UserSettings) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            match client.record_usersettings(&settings).await {
                Ok(true) => info!("Preferences saved for user {}", settings.userid),
                Ok(false) => warn!("Server refused preferences for user {}", settings.userid),
                Err(e) => warn!("Saving preferences failed: {}", e),
            }
        })
    }
}
