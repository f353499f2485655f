//! Spotify Web API client - artist search and related artists

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::{CatalogClient, Credentials};
use crate::config::UserConfig;
use crate::errors::CatalogError;
use crate::models::{CatalogArtist, RelatedArtistsResponse, SearchResponse};

/// Refresh the access token this long before the service says it expires
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    /// Token issued at `now`, considered stale `expires_in` minus the margin later
    fn issued(value: String, expires_in: u64, now: Instant) -> Self {
        let lifetime = expires_in.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);
        Self {
            value,
            expires_at: now + Duration::from_secs(lifetime),
        }
    }

    fn fresh_value(&self, now: Instant) -> Option<&str> {
        (self.expires_at > now).then_some(self.value.as_str())
    }
}

/// Catalog client backed by the Spotify Web API (client-credentials flow)
pub struct SpotifyClient {
    http: Client,
    credentials: Credentials,
    api_base: String,
    accounts_base: String,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, config: &UserConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            credentials,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            accounts_base: config.accounts_base_url.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Cached bearer token, fetching a new one when missing or stale
    async fn access_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;
        if let Some(value) = cached.as_ref().and_then(|t| t.fresh_value(Instant::now())) {
            return Ok(value.to_string());
        }

        tracing::debug!("requesting catalog access token");
        let resp = self
            .http
            .post(format!("{}/api/token", self.accounts_base))
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if let Some(err) = classify_token_status(resp.status(), retry_after(&resp)) {
            return Err(err);
        }
        let body: TokenResponse = resp.json().await?;

        let token = AccessToken::issued(body.access_token, body.expires_in, Instant::now());
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> Result<T, CatalogError> {
        let token = self.access_token().await?;
        let resp = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        Ok(check_status(resp, subject)?.json().await?)
    }
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn search_artist(&self, name: &str) -> Result<CatalogArtist, CatalogError> {
        let q = format!("artist:{}", name);
        let url = format!("{}/search", self.api_base);

        let data: SearchResponse = self
            .get_json(&url, &[("q", q.as_str()), ("type", "artist"), ("limit", "1")], name)
            .await?;

        top_result(data, name)
    }

    async fn related_artists(&self, artist_id: &str) -> Result<Vec<CatalogArtist>, CatalogError> {
        let url = format!("{}/artists/{}/related-artists", self.api_base, artist_id);
        let data: RelatedArtistsResponse = self.get_json(&url, &[], artist_id).await?;
        Ok(data.artists)
    }
}

/// No disambiguation: the top search result wins
fn top_result(data: SearchResponse, name: &str) -> Result<CatalogArtist, CatalogError> {
    data.artists
        .items
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::NotFound(name.to_string()))
}

fn retry_after(resp: &Response) -> Option<u64> {
    resp.headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Pass successful responses through, turn the rest into typed errors
fn check_status(resp: Response, subject: &str) -> Result<Response, CatalogError> {
    match classify_status(resp.status(), retry_after(&resp), subject) {
        Some(err) => Err(err),
        None => Ok(resp),
    }
}

/// The token service answers 400 invalid_client for bad credentials
fn classify_token_status(status: StatusCode, retry_after: Option<u64>) -> Option<CatalogError> {
    if status == StatusCode::BAD_REQUEST {
        return Some(CatalogError::Unauthorized(format!(
            "token request rejected ({})",
            status
        )));
    }
    classify_status(status, retry_after, "access token")
}

fn classify_status(
    status: StatusCode,
    retry_after: Option<u64>,
    subject: &str,
) -> Option<CatalogError> {
    if status.is_success() {
        return None;
    }

    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CatalogError::Unauthorized(format!("{} for {}", status, subject))
        }
        StatusCode::NOT_FOUND => CatalogError::NotFound(subject.to_string()),
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited { retry_after },
        _ => CatalogError::Transient(format!("{} for {}", status, subject)),
    };
    Some(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes() {
        assert!(classify_status(StatusCode::OK, None, "A").is_none());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, None, "abc"),
            Some(CatalogError::NotFound("abc".into()))
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, Some(7), "abc"),
            Some(CatalogError::RateLimited {
                retry_after: Some(7)
            })
        );
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, None, "abc"),
            Some(CatalogError::Unauthorized(_))
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, None, "abc"),
            Some(CatalogError::Transient(_))
        ));
    }

    #[test]
    fn test_base_urls_are_normalized() {
        let mut config = UserConfig::default();
        config.api_base_url = "http://localhost:9000/v1/".into();
        let client = SpotifyClient::new(Credentials::new("id", "secret"), &config).unwrap();
        assert_eq!(client.api_base, "http://localhost:9000/v1");
        assert_eq!(client.accounts_base, "https://accounts.spotify.com");
    }

    #[test]
    fn test_token_response_defaults() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc", "token_type": "Bearer"}"#).unwrap();
        assert_eq!(parsed.expires_in, 3600);
    }

    fn search_response(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_top_result_wins() {
        let data = search_response(
            r#"{"artists": {"items": [
                {"id": "1", "name": "Drake", "uri": "spotify:artist:1", "genres": ["rap"], "followers": {"total": 5}},
                {"id": "2", "name": "Drake Bell", "uri": "spotify:artist:2", "genres": [], "followers": {"total": 1}}
            ]}}"#,
        );
        let artist = top_result(data, "Drake").unwrap();
        assert_eq!(artist.id, "1");
        assert_eq!(artist.followers.total, Some(5));
    }

    #[test]
    fn test_empty_search_is_not_found() {
        let data = search_response(r#"{"artists": {"items": []}}"#);
        assert_eq!(
            top_result(data, "Nobody").unwrap_err(),
            CatalogError::NotFound("Nobody".into())
        );
    }

    #[test]
    fn test_token_refreshed_after_margin() {
        let now = Instant::now();
        let token = AccessToken::issued("abc".into(), 3600, now);

        assert_eq!(token.fresh_value(now), Some("abc"));
        assert_eq!(token.fresh_value(now + Duration::from_secs(3539)), Some("abc"));
        assert_eq!(token.fresh_value(now + Duration::from_secs(3540)), None);
    }

    #[test]
    fn test_short_lived_token_never_cached() {
        let now = Instant::now();
        let token = AccessToken::issued("abc".into(), 30, now);
        assert_eq!(token.fresh_value(now), None);
    }

    #[test]
    fn test_token_status_mapping() {
        assert!(classify_token_status(StatusCode::OK, None).is_none());
        assert!(matches!(
            classify_token_status(StatusCode::BAD_REQUEST, None),
            Some(CatalogError::Unauthorized(_))
        ));
        assert!(matches!(
            classify_token_status(StatusCode::UNAUTHORIZED, None),
            Some(CatalogError::Unauthorized(_))
        ));
        assert_eq!(
            classify_token_status(StatusCode::TOO_MANY_REQUESTS, Some(3)),
            Some(CatalogError::RateLimited {
                retry_after: Some(3)
            })
        );
    }
}
