use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::types::AnyValue;

/// Reserved top-level context key for injected values.
pub const SGNL_NAMESPACE_KEY: &str = "sgnl";

/// Source of the current instant; injected so tests can pin it.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Source of fresh random identifiers; injected so tests can pin them.
pub trait RandomSource: Send + Sync {
    fn uuid(&self) -> Uuid;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Produce a new context with `sgnl.time.now` and `sgnl.random.uuid` filled
/// in at every path the caller did not already provide.
///
/// Caller-supplied values always win, including non-object values that block
/// injection below them. The caller's context is never mutated.
pub fn augment_context(
    context: Option<&AnyValue>,
    clock: &dyn Clock,
    random: &dyn RandomSource,
) -> AnyValue {
    let mut root = match context {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    let now = clock.now_utc().to_rfc3339_opts(SecondsFormat::Secs, true);
    let defaults = json!({
        "time": { "now": now },
        "random": { "uuid": random.uuid().to_string() },
    });

    let slot = root
        .entry(SGNL_NAMESPACE_KEY.to_string())
        .or_insert(Value::Object(Map::new()));
    merge_defaults(slot, &defaults);

    Value::Object(root)
}

/// Fill `defaults` into `target` without overwriting anything already set.
fn merge_defaults(target: &mut Value, defaults: &Value) {
    let Value::Object(defaults) = defaults else {
        return;
    };
    let Value::Object(target) = target else {
        // caller placed a non-object here; their value wins
        return;
    };
    for (key, default) in defaults {
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), default.clone());
            }
            Some(existing) => merge_defaults(existing, default),
        }
    }
}
