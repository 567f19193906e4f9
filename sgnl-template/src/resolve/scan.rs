use crate::expressions::{parse_path_expr, PathExpr};
use crate::resolve::format::format_value;
use crate::resolve::NO_VALUE;
use crate::types::AnyValue;

/// Outcome of resolving one string leaf.
pub(crate) enum ResolvedText {
    Plain(String),
    /// The whole string was a single placeholder that did not resolve; the
    /// walker decides between `{No Value}` and omission.
    ExactMissing,
}

/// Resolve every placeholder in `s` against `context`, innermost-first and
/// left to right.
///
/// The scan keeps a stack of open-brace offsets into the output buffer. Each
/// `}` closes the most recent unmatched `{`; if the candidate between them
/// (trimmed) parses as a path expression it is substituted in place.
/// Substituted text stays visible to still-open outer candidates but is never
/// rescanned for new openers. Unmatched braces and non-expression candidates
/// (`{}`, `{name}`, literal JSON) remain literal.
pub(crate) fn resolve_string(
    s: &str,
    context: &AnyValue,
    errors: &mut Vec<String>,
) -> ResolvedText {
    if let Some((expr, expr_text)) = exact_template(s) {
        return match render_expr(&expr, &expr_text, context, errors) {
            Some(rendered) => ResolvedText::Plain(rendered),
            None => ResolvedText::ExactMissing,
        };
    }

    let mut out = String::new();
    let mut open: Vec<usize> = Vec::new();
    for ch in s.chars() {
        match ch {
            '{' => {
                open.push(out.len());
                out.push('{');
            }
            '}' => match open.pop() {
                None => out.push('}'),
                Some(start) => {
                    let trimmed = out[start + 1..].trim();
                    match parse_path_expr(trimmed) {
                        Ok(expr) => {
                            let rendered = render_expr(&expr, trimmed, context, errors)
                                .unwrap_or_else(|| NO_VALUE.to_string());
                            out.truncate(start);
                            out.push_str(&rendered);
                        }
                        Err(_) => out.push('}'),
                    }
                }
            },
            other => out.push(other),
        }
    }

    ResolvedText::Plain(out)
}

/// Evaluate and render one placeholder, recording diagnostics.
///
/// `None` means the path did not resolve; an empty-string value still renders
/// (as the empty string) but is reported under its own error class.
fn render_expr(
    expr: &PathExpr,
    expr_text: &str,
    context: &AnyValue,
    errors: &mut Vec<String>,
) -> Option<String> {
    match expr.evaluate(context) {
        Some(value) => {
            if value.as_str().is_some_and(str::is_empty) {
                errors.push(format!("field is empty: '{expr_text}'"));
            }
            Some(format_value(value))
        }
        None => {
            errors.push(format!("failed to extract field '{expr_text}'"));
            None
        }
    }
}

/// A string is an exact template when its entire content is one placeholder:
/// outer braces, no nested braces, and a path expression inside.
fn exact_template(s: &str) -> Option<(PathExpr, String)> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    if inner.contains(['{', '}']) {
        return None;
    }
    let trimmed = inner.trim();
    let expr = parse_path_expr(trimmed).ok()?;
    Some((expr, trimmed.to_string()))
}
