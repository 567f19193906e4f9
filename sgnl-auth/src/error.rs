use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No recognized credential source is present in the context.
    #[error("No authentication configured")]
    NoAuthConfigured,
    /// The client-credentials trio is incomplete in explicit config.
    #[error("OAuth2 Client Credentials flow requires tokenUrl, clientId, and clientSecret")]
    IncompleteClientCredentials,
    /// The client-credentials secret is present but the environment half is not.
    #[error("OAuth2 Client Credentials flow requires TOKEN_URL and CLIENT_ID in env")]
    IncompleteClientCredentialsEnv,
    #[error("invalid token URL: {0}")]
    InvalidTokenUrl(#[from] url::ParseError),
    #[error("OAuth2 token request failed: {status} {reason}")]
    TokenRequestFailed { status: u16, reason: String },
    #[error("OAuth2 token response is not valid JSON: {0}")]
    TokenResponseNotJson(#[source] serde_json::Error),
    #[error("No access_token in OAuth2 response")]
    MissingAccessToken,
    #[error("No URL specified. Provide address parameter or ADDRESS environment variable")]
    MissingBaseUrl,
    #[error(transparent)]
    Http(#[from] HttpError),
}
