#![forbid(unsafe_code)]

//! Template resolution for SGNL action payloads.
//!
//! Strings inside a payload may embed `{$.path}` placeholders that are
//! resolved against a job context before the payload is used. [`resolve`] is
//! the single entry point; it never fails, collecting per-placeholder
//! diagnostics instead.

pub mod expressions;
pub mod namespace;
pub mod resolve;
pub mod types;

pub use crate::expressions::{parse_path_expr, PathExpr, PathExprError, PathSegment};
pub use crate::namespace::{
    augment_context, Clock, OsRandom, RandomSource, SystemClock, SGNL_NAMESPACE_KEY,
};
pub use crate::resolve::{resolve, resolve_with, Resolution, ResolveOptions, NO_VALUE};
pub use crate::types::AnyValue;
