use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;

use crate::api::models::{StoryReceipt, StoryRecord};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

pub struct ApiClient {
    pub http: HttpClient,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }

    fn base_api(base_url: &str) -> String {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.ends_with("/api") { trimmed.to_string() } else { format!("{}/api", trimmed) }
    }

    fn with_auth<'a>(mut req: reqwest::RequestBuilder, token: Option<&'a str>, api_key: Option<&'a str>) -> reqwest::RequestBuilder {
        if let Some(t) = token {
            req = req.header("Authorization", format!("Bearer {}", t));
        }
        if let Some(k) = api_key {
            req = req.header("x-api-key", k);
        }
        req
    }

    /// Try to reach the Storynest server using common probe endpoints.
    /// Sends the token or API key header when provided.
    pub async fn server_info(&self, base_url: &str, token: Option<&str>, api_key: Option<&str>) -> Result<u16, ApiError> {
        let base_api = Self::base_api(base_url);
        let candidates = [
            format!("{}/v1/server/info", base_api),
            format!("{}/v1/ping", base_api),
            base_url.trim_end_matches('/').to_string(),
        ];
        let mut last_err: Option<ApiError> = None;
        for endpoint in candidates {
            let req = Self::with_auth(self.http.get(&endpoint), token, api_key);
            match req.send().await {
                Ok(resp) => return Ok(resp.status().as_u16()),
                Err(e) => last_err = Some(e.into()),
            }
        }
        Err(last_err.unwrap_or(ApiError::Malformed("no endpoint reachable")))
    }

    /// Create one document in the server's "stories" collection.
    /// Returns the identifier the server assigned to the new record.
    pub async fn create_story(&self, base_url: &str, api_key: &str, record: &StoryRecord) -> Result<StoryReceipt, ApiError> {
        let base = base_url.trim_end_matches('/');
        let endpoint = format!("{}/api/v1/stories?key={}", base, api_key);
        let resp = self.http.post(&endpoint).json(record).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        let json: Value = resp.json().await?;
        let id = extract_story_id(&json).ok_or(ApiError::Malformed("no story id in response"))?;
        log::debug!("created story {id}");
        Ok(StoryReceipt { id })
    }
}

fn extract_story_id(json: &Value) -> Option<String> {
    json.get("id")
        .or_else(|| json.get("name"))
        .or_else(|| json.get("data").and_then(|d| d.get("id")))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_id_prefers_the_id_field() {
        let json = serde_json::json!({"id": "abc", "name": "stories/abc"});
        assert_eq!(extract_story_id(&json).as_deref(), Some("abc"));
    }

    #[test]
    fn story_id_falls_back_to_name_then_data() {
        let json = serde_json::json!({"name": "stories/xyz"});
        assert_eq!(extract_story_id(&json).as_deref(), Some("stories/xyz"));

        let json = serde_json::json!({"data": {"id": "nested"}});
        assert_eq!(extract_story_id(&json).as_deref(), Some("nested"));
    }

    #[test]
    fn missing_or_empty_id_is_rejected() {
        assert!(extract_story_id(&serde_json::json!({})).is_none());
        assert!(extract_story_id(&serde_json::json!({"id": ""})).is_none());
    }
}
