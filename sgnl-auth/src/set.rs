use async_trait::async_trait;
use serde_json::Value;

/// Claims stamped during signing and therefore stripped from caller payloads.
const RESERVED_CLAIMS: [&str; 5] = ["iss", "iat", "jti", "exp", "nbf"];

#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("SET payload must be a JSON object")]
    PayloadNotObject,
    #[error("signing failed: {0}")]
    Signing(String),
}

/// Capability for producing signed JWTs. The hosting runtime owns the key
/// material and algorithm; this crate only shapes the payload.
#[async_trait]
pub trait JwtSigner: Send + Sync {
    async fn sign_jwt(&self, claims: &Value, typ: &str) -> Result<String, SetError>;
}

/// Sign a Security Event Token (RFC 8417).
///
/// Reserved claims (`iss`, `iat`, `jti`, `exp`, `nbf`) are added during
/// signing; any the caller included are dropped from the payload first.
pub async fn sign_set(signer: &dyn JwtSigner, payload: &Value) -> Result<String, SetError> {
    let Value::Object(claims) = payload else {
        return Err(SetError::PayloadNotObject);
    };

    let mut clean = claims.clone();
    let mut dropped = Vec::new();
    for claim in RESERVED_CLAIMS {
        if clean.remove(claim).is_some() {
            dropped.push(claim);
        }
    }
    if !dropped.is_empty() {
        tracing::warn!(
            claims = ?dropped,
            "reserved claims are set automatically during signing and were ignored"
        );
    }

    signer.sign_jwt(&Value::Object(clean), "secevent+jwt").await
}
