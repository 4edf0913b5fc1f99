// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::search::source::SourceError;

/// Renew the token this long before its reported expiry.
const EXPIRY_BUFFER: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Client-credentials OAuth token cache.
///
/// Holds one bearer token and only performs a new exchange when the cached
/// token is missing, expired, or inside the safety buffer. Refreshes are
/// serialized behind the mutex so parallel callers cannot race two
/// exchanges for the same credential.
pub struct TokenCache {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(
        client: reqwest::Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        scope: String,
    ) -> Self {
        Self {
            client,
            token_url,
            client_id,
            client_secret,
            scope,
            cached: Mutex::new(None),
        }
    }

    /// Return a bearer token, reusing the cached one while it is still
    /// comfortably inside its lifetime.
    pub async fn access_token(&self) -> Result<String, SourceError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() + EXPIRY_BUFFER < token.expires_at {
                debug!("Reusing cached OAuth token");
                return Ok(token.value.clone());
            }
        }

        let basic = BASE64.encode(format!("{}:{}", self.client_id, self.client_secret));
        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Upstream(format!(
                "token exchange failed with HTTP {}",
                status
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::MalformedPayload(e.to_string()))?;

        info!("Obtained new OAuth token (expires in {}s)", body.expires_in);
        let value = body.access_token.clone();
        *cached = Some(CachedToken {
            value: body.access_token,
            expires_at: Instant::now() + Duration::from_secs(body.expires_in),
        });

        Ok(value)
    }
}
