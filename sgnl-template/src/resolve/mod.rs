mod format;
mod scan;

use serde_json::{Map, Value};

use crate::namespace::{augment_context, Clock, OsRandom, RandomSource, SystemClock};
use crate::types::AnyValue;

use scan::ResolvedText;

/// Literal substituted for a placeholder whose path did not resolve.
pub const NO_VALUE: &str = "{No Value}";

/// Options recognized by [`resolve`]; unrecognized keys in a deserialized
/// options object are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Merge `sgnl.*` defaults (current time, random uuid) into the context
    /// before resolution.
    #[serde(rename = "injectSGNLNamespace")]
    pub inject_sgnl_namespace: bool,
    /// Drop a mapping key or sequence element whose value is a single
    /// placeholder that did not resolve, instead of substituting `{No Value}`.
    pub omit_no_value_for_exact_templates: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            inject_sgnl_namespace: true,
            omit_no_value_for_exact_templates: false,
        }
    }
}

/// Result of one resolution pass: the substituted value plus every
/// placeholder diagnostic, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: AnyValue,
    pub errors: Vec<String>,
}

/// Resolve every `{$.path}` placeholder in `input` against `job_context`.
///
/// The output has the same shape as the input, minus any entries dropped by
/// the exact-template omission policy. Missing fields are diagnostics, never
/// failures; the call is total over any JSON value.
pub fn resolve(
    input: &AnyValue,
    job_context: Option<&AnyValue>,
    options: &ResolveOptions,
) -> Resolution {
    resolve_with(input, job_context, options, &SystemClock, &OsRandom)
}

/// [`resolve`] with explicit clock and randomness sources, so callers and
/// tests can substitute deterministic values for the injected namespace.
pub fn resolve_with(
    input: &AnyValue,
    job_context: Option<&AnyValue>,
    options: &ResolveOptions,
    clock: &dyn Clock,
    random: &dyn RandomSource,
) -> Resolution {
    let context = if options.inject_sgnl_namespace {
        augment_context(job_context, clock, random)
    } else {
        job_context.cloned().unwrap_or(Value::Null)
    };

    let mut errors = Vec::new();
    let result = match resolve_value(input, &context, options, &mut errors) {
        Resolved::Value(v) => v,
        // an omitted exact template with no parent container resolves to ""
        Resolved::Omitted => Value::String(String::new()),
    };
    Resolution { result, errors }
}

enum Resolved {
    Value(AnyValue),
    /// Exact template that failed to resolve while omission is enabled; the
    /// parent container drops the entry.
    Omitted,
}

fn resolve_value(
    value: &AnyValue,
    context: &AnyValue,
    options: &ResolveOptions,
    errors: &mut Vec<String>,
) -> Resolved {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => Resolved::Value(value.clone()),
        Value::String(s) => match scan::resolve_string(s, context, errors) {
            ResolvedText::Plain(text) => Resolved::Value(Value::String(text)),
            ResolvedText::ExactMissing => {
                if options.omit_no_value_for_exact_templates {
                    Resolved::Omitted
                } else {
                    Resolved::Value(Value::String(NO_VALUE.to_string()))
                }
            }
        },
        Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for v in arr {
                if let Resolved::Value(v) = resolve_value(v, context, options, errors) {
                    out.push(v);
                }
            }
            Resolved::Value(Value::Array(out))
        }
        Value::Object(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                if let Resolved::Value(v) = resolve_value(v, context, options, errors) {
                    out.insert(k.clone(), v);
                }
            }
            Resolved::Value(Value::Object(out))
        }
    }
}
