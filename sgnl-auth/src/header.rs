use std::collections::BTreeMap;

use base64::prelude::*;
use serde_json::Value;

use crate::context::ActionContext;
use crate::error::AuthError;
use crate::http::HttpClient;
use crate::oauth::{get_client_credentials_token, ClientCredentialsConfig};

const BEARER_AUTH_TOKEN: &str = "BEARER_AUTH_TOKEN";
const BASIC_USERNAME: &str = "BASIC_USERNAME";
const BASIC_PASSWORD: &str = "BASIC_PASSWORD";
const OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN: &str = "OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN";
const OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL: &str = "OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL";
const OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID: &str = "OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID";
const OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET: &str = "OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET";

/// Build an `Authorization` header value from whichever credential source the
/// context configures, tried in order: bearer secret, basic pair,
/// authorization-code token, client-credentials fetch.
pub async fn get_authorization_header(
    http: &dyn HttpClient,
    context: &ActionContext,
) -> Result<String, AuthError> {
    if let Some(token) = context.secret(BEARER_AUTH_TOKEN) {
        return Ok(bearer(token));
    }

    if let (Some(username), Some(password)) =
        (context.secret(BASIC_USERNAME), context.secret(BASIC_PASSWORD))
    {
        let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
        return Ok(format!("Basic {encoded}"));
    }

    if let Some(token) = context.secret(OAUTH2_AUTHORIZATION_CODE_ACCESS_TOKEN) {
        return Ok(bearer(token));
    }

    if let Some(client_secret) = context.secret(OAUTH2_CLIENT_CREDENTIALS_CLIENT_SECRET) {
        let (Some(token_url), Some(client_id)) = (
            context.env(OAUTH2_CLIENT_CREDENTIALS_TOKEN_URL),
            context.env(OAUTH2_CLIENT_CREDENTIALS_CLIENT_ID),
        ) else {
            return Err(AuthError::IncompleteClientCredentialsEnv);
        };
        tracing::debug!("no static credential configured; fetching client-credentials token");
        let config =
            ClientCredentialsConfig::from_parts(Some(token_url), Some(client_id), Some(client_secret))?;
        let token = get_client_credentials_token(http, &config).await?;
        return Ok(bearer(&token));
    }

    Err(AuthError::NoAuthConfigured)
}

/// JSON request headers with the resolved `Authorization` value.
pub async fn create_auth_headers(
    http: &dyn HttpClient,
    context: &ActionContext,
) -> Result<BTreeMap<String, String>, AuthError> {
    let authorization = get_authorization_header(http, context).await?;
    Ok(BTreeMap::from([
        ("Authorization".to_string(), authorization),
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]))
}

/// Pick the target base URL: the `address` parameter, else the `ADDRESS`
/// environment value, with a trailing slash trimmed.
pub fn get_base_url(params: Option<&Value>, context: &ActionContext) -> Result<String, AuthError> {
    let from_params = params
        .and_then(|p| p.get("address"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let url = match from_params {
        Some(url) => url,
        None => context
            .env("ADDRESS")
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingBaseUrl)?,
    };

    Ok(url.strip_suffix('/').unwrap_or(url).to_string())
}

fn bearer(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}
