//! Access tokens for the calendar service.
//!
//! fixcal never runs an interactive consent flow. A delegated session is
//! provisioned out of band (operator or external auth tooling writes the
//! session file); this module only maintains it, refreshing the access token
//! against the OAuth token endpoint when it has expired. Unattended service
//! identities inject a ready token through `StaticToken` instead.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fixcal_core::error::{FixcalError, FixcalResult};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Produces a bearer token for calendar API calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> FixcalResult<String>;
}

/// A token handed in by the environment, typically minted by the scheduler
/// platform for a service identity. Opaque to fixcal.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> FixcalResult<String> {
        Ok(self.0.clone())
    }
}

/// On-disk OAuth session contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// A delegated OAuth session stored as a toml file, refreshed on expiry.
pub struct StoredSession {
    path: PathBuf,
    token_url: String,
    http: reqwest::Client,
}

impl StoredSession {
    /// Session file for a named account under the fixcal config directory.
    pub fn for_account(account: &str) -> FixcalResult<Self> {
        let slug = account.replace(['/', '\\', ':'], "_");
        let dir = dirs::config_dir()
            .ok_or_else(|| FixcalError::Config("could not determine config directory".into()))?
            .join("fixcal")
            .join("session");

        Ok(Self::at_path(dir.join(format!("{slug}.toml"))))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        StoredSession {
            path: path.into(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Override the token endpoint (tests).
    pub fn with_token_url(mut self, url: &str) -> Self {
        self.token_url = url.to_string();
        self
    }

    fn load(&self) -> FixcalResult<SessionData> {
        if !self.path.exists() {
            return Err(FixcalError::AuthenticationFailed(format!(
                "no stored session at {}; provision one before running",
                self.path.display()
            )));
        }

        let contents = std::fs::read_to_string(&self.path)?;
        toml::from_str(&contents).map_err(|e| {
            FixcalError::AuthenticationFailed(format!(
                "unreadable session at {}: {e}",
                self.path.display()
            ))
        })
    }

    fn save(&self, data: &SessionData) -> FixcalResult<()> {
        let contents = toml::to_string_pretty(data)
            .map_err(|e| FixcalError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;

        // Owner-only, the file holds OAuth tokens.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    async fn refresh(&self, mut data: SessionData) -> FixcalResult<SessionData> {
        debug!(path = %self.path.display(), "access token expired, refreshing");

        let params = [
            ("client_id", data.client_id.as_str()),
            ("client_secret", data.client_secret.as_str()),
            ("refresh_token", data.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FixcalError::AuthenticationFailed(format!("token refresh: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FixcalError::AuthenticationFailed(format!(
                "token refresh rejected ({status}): {body}"
            )));
        }

        #[derive(Deserialize)]
        struct RefreshResponse {
            access_token: String,
            expires_in: i64,
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| FixcalError::AuthenticationFailed(format!("token refresh: {e}")))?;

        data.access_token = refreshed.access_token;
        data.expires_at = Utc::now() + Duration::seconds(refreshed.expires_in);
        // Google does not return a new refresh token on refresh; keep the old one.
        self.save(&data)?;

        Ok(data)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenSource for StoredSession {
    async fn access_token(&self) -> FixcalResult<String> {
        let data = self.load()?;

        if data.is_expired() {
            let data = self.refresh(data).await?;
            Ok(data.access_token)
        } else {
            Ok(data.access_token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: DateTime<Utc>) -> SessionData {
        SessionData {
            client_id: "client".into(),
            client_secret: "secret".into(),
            access_token: "old-token".into(),
            refresh_token: "refresh".into(),
            expires_at,
        }
    }

    #[test]
    fn session_data_round_trips_through_toml() {
        let data = session(Utc::now() + Duration::hours(1));
        let encoded = toml::to_string_pretty(&data).unwrap();
        let decoded: SessionData = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.access_token, data.access_token);
        assert_eq!(decoded.expires_at, data.expires_at);
    }

    #[tokio::test]
    async fn fresh_token_is_returned_without_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = StoredSession::at_path(dir.path().join("acc.toml"));
        store.save(&session(Utc::now() + Duration::hours(1))).unwrap();

        assert_eq!(store.access_token().await.unwrap(), "old-token");
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_and_persisted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "new-token", "expires_in": 3600}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = StoredSession::at_path(dir.path().join("acc.toml"))
            .with_token_url(&format!("{}/token", server.url()));
        store.save(&session(Utc::now() - Duration::minutes(5))).unwrap();

        assert_eq!(store.access_token().await.unwrap(), "new-token");

        // The refreshed token must survive the process: reload from disk.
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.access_token, "new-token");
        assert_eq!(reloaded.refresh_token, "refresh");
        assert!(reloaded.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn rejected_refresh_is_an_authentication_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = StoredSession::at_path(dir.path().join("acc.toml"))
            .with_token_url(&format!("{}/token", server.url()));
        store.save(&session(Utc::now() - Duration::minutes(5))).unwrap();

        let err = store.access_token().await.unwrap_err();
        assert!(matches!(err, FixcalError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn missing_session_file_is_an_authentication_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = StoredSession::at_path(dir.path().join("absent.toml"));

        let err = store.access_token().await.unwrap_err();
        assert!(matches!(err, FixcalError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn static_token_is_passed_through() {
        let token = StaticToken::new("abc");
        assert_eq!(token.access_token().await.unwrap(), "abc");
    }
}
