/// Any JSON-compatible value: payload inputs, job contexts, and resolved
/// outputs all share this representation.
pub type AnyValue = serde_json::Value;
