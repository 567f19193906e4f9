use crate::types::AnyValue;

/// Render a resolved value as text for splicing into a string.
///
/// Strings are spliced verbatim; arrays and objects use their compact JSON
/// serialization with keys and elements in original order.
pub(crate) fn format_value(value: &AnyValue) -> String {
    match value {
        AnyValue::String(s) => s.clone(),
        AnyValue::Bool(b) => b.to_string(),
        AnyValue::Number(n) => format_number(n),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Canonical decimal text. Integral floats render without a fractional part,
/// so `0.0` becomes `0`.
fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
