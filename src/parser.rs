//! Scheme URI parsing.
//!
//! Grammar for the wire format:
//!
//! ```text
//! <protocol>://<action>[?<name>=<value>(&<name>=<value>)*]
//! ```
//!
//! Parsing is pure and side-effect-free. No percent-decoding is performed;
//! callers are responsible for producing values free of `&`, `=` and `?`.
//!
//! # Example
//!
//! ```
//! use scheme_router::parser::parse;
//!
//! let parts = parse("app://profile?user_id=42&edit=1").unwrap();
//! assert_eq!(parts.protocol, "app");
//! assert_eq!(parts.action, "profile");
//! assert_eq!(parts.query("user_id"), Some("42"));
//! ```

use crate::error::{Result, SchemeError};

/// Protocol/action separator.
const SEPARATOR: &str = "://";

/// Raw parts of a parsed scheme URI.
///
/// `queries` preserves insertion order; a duplicate name overwrites the
/// value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScheme {
    /// Everything before the first `://`.
    pub protocol: String,
    /// Everything between `://` and the first `?` (or end of string).
    pub action: String,
    /// Ordered `name -> raw value` pairs from the query section.
    pub queries: Vec<(String, String)>,
    /// The original input string.
    pub origin: String,
}

impl ParsedScheme {
    /// Look up a raw query value by name.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.queries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a query key is present.
    #[inline]
    pub fn has_query(&self, name: &str) -> bool {
        self.query(name).is_some()
    }

    /// Re-render `protocol://action?queries` in stored order.
    ///
    /// Stable under repeated parse/render cycles for well-formed input.
    pub fn render(&self) -> String {
        let mut out = format!("{}{}{}", self.protocol, SEPARATOR, self.action);
        if !self.queries.is_empty() {
            out.push('?');
            for (i, (name, value)) in self.queries.iter().enumerate() {
                if i > 0 {
                    out.push('&');
                }
                out.push_str(name);
                out.push('=');
                out.push_str(value);
            }
        }
        out
    }
}

/// Parse a scheme URI string into its raw parts.
///
/// # Errors
///
/// Returns [`SchemeError::Parse`] when the `://` separator is missing or at
/// position 0, or when the action is empty (`?` immediately follows `://`).
/// A query pair missing its `=value` yields an empty-string value, never an
/// error.
pub fn parse(input: &str) -> Result<ParsedScheme> {
    let sep = input.find(SEPARATOR).ok_or_else(|| SchemeError::Parse {
        origin: input.to_string(),
        reason: "missing '://' separator".to_string(),
    })?;
    if sep == 0 {
        return Err(SchemeError::Parse {
            origin: input.to_string(),
            reason: "empty protocol".to_string(),
        });
    }

    let protocol = &input[..sep];
    let rest = &input[sep + SEPARATOR.len()..];

    let (action, raw_query) = match rest.find('?') {
        Some(q) => (&rest[..q], Some(&rest[q + 1..])),
        None => (rest, None),
    };
    if action.is_empty() {
        return Err(SchemeError::Parse {
            origin: input.to_string(),
            reason: "empty action".to_string(),
        });
    }

    let mut queries: Vec<(String, String)> = Vec::new();
    if let Some(raw) = raw_query {
        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = match pair.find('=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, ""),
            };
            match queries.iter_mut().find(|(k, _)| k == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => queries.push((name.to_string(), value.to_string())),
            }
        }
    }

    Ok(ParsedScheme {
        protocol: protocol.to_string(),
        action: action.to_string(),
        queries,
        origin: input.to_string(),
    })
}
