use std::collections::BTreeMap;
use std::time::Duration;

use base64::prelude::*;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::error::AuthError;
use crate::http::{HttpClient, HttpRequestParts};

const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// How client credentials are presented to the token endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AuthStyle {
    /// HTTP Basic `Authorization` header (the default).
    #[default]
    InHeader,
    /// `client_id`/`client_secret` fields in the form body.
    InParams,
}

#[derive(Debug)]
pub struct ClientCredentialsConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub scope: Option<String>,
    pub audience: Option<String>,
    pub auth_style: AuthStyle,
}

impl ClientCredentialsConfig {
    /// Build a config from optional raw parts, enforcing the required trio.
    pub fn from_parts(
        token_url: Option<&str>,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<Self, AuthError> {
        match (token_url, client_id, client_secret) {
            (Some(token_url), Some(client_id), Some(client_secret))
                if !token_url.is_empty() && !client_id.is_empty() =>
            {
                Ok(Self {
                    token_url: token_url.to_string(),
                    client_id: client_id.to_string(),
                    client_secret: SecretString::from(client_secret.to_string()),
                    scope: None,
                    audience: None,
                    auth_style: AuthStyle::default(),
                })
            }
            _ => Err(AuthError::IncompleteClientCredentials),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_auth_style(mut self, auth_style: AuthStyle) -> Self {
        self.auth_style = auth_style;
        self
    }
}

/// Fetch an access token via the OAuth2 client-credentials grant.
///
/// One POST with a form-encoded body; credentials go in a Basic header or in
/// the form fields depending on [`AuthStyle`].
pub async fn get_client_credentials_token(
    http: &dyn HttpClient,
    config: &ClientCredentialsConfig,
) -> Result<String, AuthError> {
    let url = Url::parse(&config.token_url)?;

    let mut form: Vec<(&str, String)> =
        vec![("grant_type", "client_credentials".to_string())];
    if let Some(scope) = &config.scope {
        form.push(("scope", scope.clone()));
    }
    if let Some(audience) = &config.audience {
        form.push(("audience", audience.clone()));
    }

    let mut headers = BTreeMap::from([(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    )]);

    match config.auth_style {
        AuthStyle::InHeader => {
            let raw = format!(
                "{}:{}",
                config.client_id,
                config.client_secret.expose_secret()
            );
            headers.insert(
                "Authorization".to_string(),
                format!("Basic {}", BASE64_STANDARD.encode(raw)),
            );
        }
        AuthStyle::InParams => {
            form.push(("client_id", config.client_id.clone()));
            form.push((
                "client_secret",
                config.client_secret.expose_secret().to_string(),
            ));
        }
    }

    tracing::debug!(token_url = %config.token_url, style = ?config.auth_style, "requesting client-credentials token");

    let req = HttpRequestParts {
        method: "POST".to_string(),
        url,
        headers,
        body: encode_form(&form).into_bytes(),
    };

    let resp = http.send(req, TOKEN_TIMEOUT).await?;
    if !resp.is_success() {
        return Err(AuthError::TokenRequestFailed {
            status: resp.status,
            reason: resp.reason,
        });
    }

    let json: Value = resp.body_json().map_err(AuthError::TokenResponseNotJson)?;
    match json.get("access_token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AuthError::MissingAccessToken),
    }
}

fn encode_form(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
