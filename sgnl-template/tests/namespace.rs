use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::json;
use uuid::Uuid;

use sgnl_template::{
    augment_context, resolve, resolve_with, Clock, RandomSource, ResolveOptions,
};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

struct FixedRandom(Uuid);

impl RandomSource for FixedRandom {
    fn uuid(&self) -> Uuid {
        self.0
    }
}

fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 12, 4, 17, 30, 0).unwrap())
}

fn fixed_random() -> FixedRandom {
    FixedRandom(Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap())
}

#[test]
fn injects_time_now_in_rfc3339_without_subseconds() {
    let input = json!({"timestamp": "{$.sgnl.time.now}"});
    let ctx = json!({});
    let r = resolve(&input, Some(&ctx), &ResolveOptions::default());

    let pattern = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap();
    assert!(pattern.is_match(r.result["timestamp"].as_str().unwrap()));
    assert!(r.errors.is_empty());
}

#[test]
fn injects_random_uuid() {
    let input = json!({"requestId": "{$.sgnl.random.uuid}"});
    let ctx = json!({});
    let r = resolve(&input, Some(&ctx), &ResolveOptions::default());

    let pattern =
        Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap();
    assert!(pattern.is_match(r.result["requestId"].as_str().unwrap()));
    assert!(r.errors.is_empty());
}

#[test]
fn injection_can_be_disabled() {
    let input = json!({"timestamp": "{$.sgnl.time.now}"});
    let ctx = json!({});
    let options = ResolveOptions {
        inject_sgnl_namespace: false,
        ..ResolveOptions::default()
    };
    let r = resolve(&input, Some(&ctx), &options);

    assert_eq!(r.result["timestamp"], json!("{No Value}"));
    assert_eq!(r.errors.len(), 1);
}

#[test]
fn preserves_caller_values_under_namespace() {
    let input = json!({"custom": "{$.sgnl.custom.value}"});
    let ctx = json!({"sgnl": {"custom": {"value": "my-custom-value"}}});
    let r = resolve(&input, Some(&ctx), &ResolveOptions::default());

    assert_eq!(r.result["custom"], json!("my-custom-value"));
    assert!(r.errors.is_empty());
}

#[test]
fn caller_time_now_wins_over_injected_default() {
    let input = json!({"timestamp": "{$.sgnl.time.now}"});
    let ctx = json!({"sgnl": {"time": {"now": "frozen"}}});
    let r = resolve(&input, Some(&ctx), &ResolveOptions::default());

    assert_eq!(r.result["timestamp"], json!("frozen"));
    assert!(r.errors.is_empty());
}

#[test]
fn fixed_sources_produce_deterministic_values() {
    let input = json!({
        "timestamp": "{$.sgnl.time.now}",
        "requestId": "{$.sgnl.random.uuid}",
    });
    let ctx = json!({});
    let r = resolve_with(
        &input,
        Some(&ctx),
        &ResolveOptions::default(),
        &fixed_clock(),
        &fixed_random(),
    );

    assert_eq!(r.result["timestamp"], json!("2025-12-04T17:30:00Z"));
    assert_eq!(
        r.result["requestId"],
        json!("6ba7b810-9dad-11d1-80b4-00c04fd430c8")
    );
    assert!(r.errors.is_empty());
}

#[test]
fn augment_fills_only_missing_paths() {
    let ctx = json!({"sgnl": {"time": {"now": "frozen"}}, "name": "world"});
    let augmented = augment_context(Some(&ctx), &fixed_clock(), &fixed_random());

    assert_eq!(augmented["sgnl"]["time"]["now"], json!("frozen"));
    assert_eq!(
        augmented["sgnl"]["random"]["uuid"],
        json!("6ba7b810-9dad-11d1-80b4-00c04fd430c8")
    );
    assert_eq!(augmented["name"], json!("world"));
}

#[test]
fn augment_does_not_descend_into_caller_scalars() {
    let ctx = json!({"sgnl": "opaque"});
    let augmented = augment_context(Some(&ctx), &fixed_clock(), &fixed_random());
    assert_eq!(augmented["sgnl"], json!("opaque"));
}

#[test]
fn augment_treats_missing_context_as_empty() {
    let augmented = augment_context(None, &fixed_clock(), &fixed_random());
    assert_eq!(augmented["sgnl"]["time"]["now"], json!("2025-12-04T17:30:00Z"));
}

#[test]
fn augment_never_mutates_caller_context() {
    let ctx = json!({"a": 1});
    let before = ctx.clone();
    let _ = augment_context(Some(&ctx), &fixed_clock(), &fixed_random());
    assert_eq!(ctx, before);
}
