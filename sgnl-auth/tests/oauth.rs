use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::*;
use serde_json::{json, Value};

use sgnl_auth::{
    get_client_credentials_token, AuthStyle, ClientCredentialsConfig, HttpClient, HttpError,
    HttpRequestParts, HttpResponseParts,
};

struct MockHttpClient {
    status: u16,
    reason: &'static str,
    body: Value,
    calls: Mutex<Vec<HttpRequestParts>>,
}

impl MockHttpClient {
    fn returning(status: u16, reason: &'static str, body: Value) -> Self {
        Self {
            status,
            reason,
            body,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<HttpRequestParts> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        self.calls.lock().unwrap().push(req);
        Ok(HttpResponseParts {
            status: self.status,
            reason: self.reason.to_string(),
            headers: BTreeMap::new(),
            body: serde_json::to_vec(&self.body).unwrap(),
        })
    }
}

fn valid_config() -> ClientCredentialsConfig {
    ClientCredentialsConfig::from_parts(
        Some("https://auth.example.com/oauth/token"),
        Some("test-client-id"),
        Some("test-client-secret"),
    )
    .unwrap()
}

#[tokio::test]
async fn fetches_token_with_in_header_auth_style() {
    let http = MockHttpClient::returning(200, "OK", json!({"access_token": "fetched-token-123"}));

    let token = get_client_credentials_token(&http, &valid_config())
        .await
        .unwrap();
    assert_eq!(token, "fetched-token-123");

    let calls = http.calls();
    assert_eq!(calls.len(), 1);
    let req = &calls[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.url.as_str(), "https://auth.example.com/oauth/token");
    assert_eq!(
        req.headers.get("Content-Type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
    let authorization = req.headers.get("Authorization").unwrap();
    let encoded = authorization.strip_prefix("Basic ").unwrap();
    let decoded = String::from_utf8(BASE64_STANDARD.decode(encoded).unwrap()).unwrap();
    assert_eq!(decoded, "test-client-id:test-client-secret");
    assert_eq!(req.body, b"grant_type=client_credentials");
}

#[tokio::test]
async fn fetches_token_with_in_params_auth_style() {
    let http = MockHttpClient::returning(200, "OK", json!({"access_token": "fetched-token-456"}));
    let config = valid_config().with_auth_style(AuthStyle::InParams);

    let token = get_client_credentials_token(&http, &config).await.unwrap();
    assert_eq!(token, "fetched-token-456");

    let calls = http.calls();
    let body = String::from_utf8(calls[0].body.clone()).unwrap();
    assert!(body.contains("client_id=test-client-id"));
    assert!(body.contains("client_secret=test-client-secret"));
    assert!(!calls[0].headers.contains_key("Authorization"));
}

#[tokio::test]
async fn includes_scope_when_provided() {
    let http = MockHttpClient::returning(200, "OK", json!({"access_token": "token"}));
    let config = valid_config().with_scope("https://graph.microsoft.com/.default");

    get_client_credentials_token(&http, &config).await.unwrap();

    let body = String::from_utf8(http.calls()[0].body.clone()).unwrap();
    assert!(body.contains("scope=https%3A%2F%2Fgraph.microsoft.com%2F.default"));
}

#[tokio::test]
async fn includes_audience_when_provided() {
    let http = MockHttpClient::returning(200, "OK", json!({"access_token": "token"}));
    let config = valid_config().with_audience("https://api.example.com");

    get_client_credentials_token(&http, &config).await.unwrap();

    let body = String::from_utf8(http.calls()[0].body.clone()).unwrap();
    assert!(body.contains("audience=https%3A%2F%2Fapi.example.com"));
}

#[test]
fn requires_token_url_client_id_and_client_secret() {
    for (token_url, client_id, client_secret) in [
        (None, Some("id"), Some("secret")),
        (Some("https://auth.example.com/token"), None, Some("secret")),
        (Some("https://auth.example.com/token"), Some("id"), None),
    ] {
        let err = ClientCredentialsConfig::from_parts(token_url, client_id, client_secret)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "OAuth2 Client Credentials flow requires tokenUrl, clientId, and clientSecret"
        );
    }
}

#[tokio::test]
async fn reports_failed_token_request() {
    let http = MockHttpClient::returning(401, "Unauthorized", json!({"error": "invalid_client"}));

    let err = get_client_credentials_token(&http, &valid_config())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "OAuth2 token request failed: 401 Unauthorized");
}

#[tokio::test]
async fn reports_missing_access_token() {
    let http = MockHttpClient::returning(200, "OK", json!({"token_type": "Bearer"}));

    let err = get_client_credentials_token(&http, &valid_config())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No access_token in OAuth2 response");
}
