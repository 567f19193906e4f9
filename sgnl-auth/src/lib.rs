#![forbid(unsafe_code)]

//! Authentication and signing helpers shared by SGNL actions.
//!
//! Actions receive an [`ActionContext`] (environment configuration plus
//! secrets) and use it to build an `Authorization` header from whichever
//! credential source is configured, pick a base URL, and sign Security Event
//! Tokens through an injected [`JwtSigner`].

pub mod context;
pub mod error;
pub mod header;
pub mod http;
pub mod oauth;
pub mod set;

pub use crate::context::ActionContext;
pub use crate::error::AuthError;
pub use crate::header::{create_auth_headers, get_authorization_header, get_base_url};
pub use crate::http::{
    HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient,
};
pub use crate::oauth::{get_client_credentials_token, AuthStyle, ClientCredentialsConfig};
pub use crate::set::{sign_set, JwtSigner, SetError};
