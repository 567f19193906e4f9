use std::sync::LazyLock;

use regex::Regex;

use crate::types::AnyValue;

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid regex"));

/// One access step of a path expression.
///
/// Kept as an enum so further segment kinds (wildcards, filters) can be added
/// without touching the resolution walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Mapping lookup by key: `.name`, `['name']`, or `["name"]`.
    Key(String),
    /// Sequence lookup by non-negative index: `[0]`.
    Index(usize),
}

/// A parsed path expression, anchored at the context root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub segments: Vec<PathSegment>,
}

impl PathExpr {
    /// Walk `context` segment by segment.
    ///
    /// Absent keys, out-of-range indices, and steps into non-containers all
    /// yield `None`. A final value of `null` also yields `None`; null is
    /// indistinguishable from missing for substitution purposes.
    pub fn evaluate<'a>(&self, context: &'a AnyValue) -> Option<&'a AnyValue> {
        let mut cur = context;
        for seg in &self.segments {
            cur = match seg {
                PathSegment::Key(k) => cur.as_object()?.get(k)?,
                PathSegment::Index(i) => cur.as_array()?.get(*i)?,
            };
        }
        if cur.is_null() {
            return None;
        }
        Some(cur)
    }
}

/// Parse `$.<segment>(.<ident>|[<index>]|['<key>']|["<key>"])*`.
///
/// Anything without the leading `$.` is not a path expression; callers treat
/// such strings as literal text.
pub fn parse_path_expr(input: &str) -> Result<PathExpr, PathExprError> {
    let s = input.trim();
    let rest = s
        .strip_prefix("$.")
        .ok_or(PathExprError::MissingRootPrefix)?;

    let mut segments = Vec::new();
    let (ident, mut cur) = take_ident(rest)?;
    segments.push(PathSegment::Key(ident));

    while let Some(ch) = cur.chars().next() {
        match ch {
            '.' => {
                let (ident, tail) = take_ident(&cur[1..])?;
                segments.push(PathSegment::Key(ident));
                cur = tail;
            }
            '[' => {
                let (seg, tail) = take_bracket(&cur[1..])?;
                segments.push(seg);
                cur = tail;
            }
            other => return Err(PathExprError::UnexpectedChar(other)),
        }
    }

    Ok(PathExpr { segments })
}

fn take_ident(s: &str) -> Result<(String, &str), PathExprError> {
    let end = s.find(['.', '[']).unwrap_or(s.len());
    let (ident, tail) = s.split_at(end);
    if ident.is_empty() {
        return Err(PathExprError::EmptySegment);
    }
    if !IDENT_RE.is_match(ident) {
        return Err(PathExprError::InvalidSegment(ident.to_string()));
    }
    Ok((ident.to_string(), tail))
}

/// Parse the remainder of a bracket segment; `s` starts just after the `[`.
fn take_bracket(s: &str) -> Result<(PathSegment, &str), PathExprError> {
    if let Some(quote) = s.chars().next().filter(|c| matches!(c, '\'' | '"')) {
        let body = &s[1..];
        let close = body.find(quote).ok_or(PathExprError::UnterminatedBracket)?;
        let key = &body[..close];
        let tail = body[close + 1..]
            .strip_prefix(']')
            .ok_or(PathExprError::UnterminatedBracket)?;
        if key.is_empty() {
            return Err(PathExprError::EmptySegment);
        }
        return Ok((PathSegment::Key(key.to_string()), tail));
    }

    let close = s.find(']').ok_or(PathExprError::UnterminatedBracket)?;
    let digits = &s[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathExprError::InvalidIndex(digits.to_string()));
    }
    let index: usize = digits
        .parse()
        .map_err(|_| PathExprError::InvalidIndex(digits.to_string()))?;
    Ok((PathSegment::Index(index), &s[close + 1..]))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathExprError {
    #[error("path expression must start with '$.'")]
    MissingRootPrefix,
    #[error("path segment must not be empty")]
    EmptySegment,
    #[error("invalid path segment: {0}")]
    InvalidSegment(String),
    #[error("invalid index segment: [{0}]")]
    InvalidIndex(String),
    #[error("unterminated bracket segment")]
    UnterminatedBracket,
    #[error("unexpected character in path expression: '{0}'")]
    UnexpectedChar(char),
}
