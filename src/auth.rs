//! Sign-in wiring against external OAuth providers. The provider list is
//! assembled once as an ordered registry that refuses duplicate ids; nothing
//! in the visible UI triggers sign-in, a completed exchange would land in
//! `AppState.token`.

use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("provider {0:?} is already registered")]
    DuplicateProvider(String),

    #[error("invalid endpoint: {0}")]
    BadEndpoint(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("no access token in response")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct Provider {
    pub id: &'static str,
    pub label: &'static str,
    pub authorize_endpoint: &'static str,
    pub token_endpoint: &'static str,
    pub scopes: &'static [&'static str],
}

impl Provider {
    pub fn github() -> Self {
        Self {
            id: "github",
            label: "GitHub",
            authorize_endpoint: "https://github.com/login/oauth/authorize",
            token_endpoint: "https://github.com/login/oauth/access_token",
            scopes: &["read:user", "user:email"],
        }
    }

    pub fn google() -> Self {
        Self {
            id: "google",
            label: "Google",
            authorize_endpoint: "https://accounts.google.com/o/oauth2/v2/auth",
            token_endpoint: "https://oauth2.googleapis.com/token",
            scopes: &["openid", "email", "profile"],
        }
    }
}

/// Ordered provider list. `register` rejects an id that is already present
/// instead of letting a later entry override an earlier one.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self { providers: Vec::new() }
    }

    /// GitHub first, then Google.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(Provider::github())
            .expect("default providers are distinct");
        registry
            .register(Provider::google())
            .expect("default providers are distinct");
        registry
    }

    pub fn register(&mut self, provider: Provider) -> Result<(), AuthError> {
        if self.providers.iter().any(|p| p.id == provider.id) {
            return Err(AuthError::DuplicateProvider(provider.id.to_string()));
        }
        self.providers.push(provider);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }
}

/// Build the provider's authorization URL for the code flow.
pub fn authorize_url(provider: &Provider, client_id: &str, redirect_uri: &str, state: &str) -> Result<Url, AuthError> {
    let mut url = Url::parse(provider.authorize_endpoint)?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &provider.scopes.join(" "))
        .append_pair("state", state);
    Ok(url)
}

/// Exchange an authorization code for an access token at the provider's
/// token endpoint.
pub async fn exchange_code(
    http: &HttpClient,
    provider: &Provider,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<String, AuthError> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("grant_type", "authorization_code"),
    ];
    let resp = http
        .post(provider.token_endpoint)
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(AuthError::Status(resp.status().as_u16()));
    }
    let json: Value = resp.json().await?;
    if let Some(tok) = json.get("access_token").and_then(|v| v.as_str()) {
        return Ok(tok.to_string());
    }
    if let Some(tok) = json.get("token").and_then(|v| v.as_str()) {
        return Ok(tok.to_string());
    }
    log::warn!("token endpoint for {} returned no usable token", provider.id);
    Err(AuthError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_provider_id_is_rejected() {
        let mut registry = ProviderRegistry::new();
        registry.register(Provider::github()).unwrap();
        let err = registry.register(Provider::github()).unwrap_err();
        assert!(matches!(err, AuthError::DuplicateProvider(id) if id == "github"));
        assert_eq!(registry.providers().len(), 1);
    }

    #[test]
    fn defaults_keep_insertion_order() {
        let registry = ProviderRegistry::with_defaults();
        let ids: Vec<&str> = registry.providers().iter().map(|p| p.id).collect();
        assert_eq!(ids, ["github", "google"]);
    }

    #[test]
    fn unknown_provider_lookup_is_none() {
        let registry = ProviderRegistry::with_defaults();
        assert!(registry.get("gitlab").is_none());
        assert_eq!(registry.get("google").map(|p| p.label), Some("Google"));
    }

    #[test]
    fn authorize_url_carries_the_code_flow_parameters() {
        let provider = Provider::github();
        let url = authorize_url(&provider, "client-1", "app://callback", "nonce").unwrap();
        assert_eq!(url.host_str(), Some("github.com"));
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("client_id".into(), "client-1".into())));
        assert!(query.contains(&("redirect_uri".into(), "app://callback".into())));
        assert!(query.contains(&("response_type".into(), "code".into())));
        assert!(query.contains(&("scope".into(), "read:user user:email".into())));
        assert!(query.contains(&("state".into(), "nonce".into())));
    }
}
