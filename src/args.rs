//! Typed argument values and coercion from raw query strings.
//!
//! Every route argument carries an [`ArgKind`] that selects the parser used
//! to coerce the raw query value, and arguments travel through the engine as
//! [`ArgValue`]s. Rendering back to wire form goes through `Display`:
//! booleans become `1`/`0`, numbers use their standard textual form, and
//! strings pass through verbatim.
//!
//! # Example
//!
//! ```
//! use scheme_router::args::{ArgKind, ArgValue};
//!
//! let v = ArgKind::Int.parse("count", "42").unwrap();
//! assert_eq!(v, ArgValue::Int(42));
//! assert_eq!(v.to_string(), "42");
//!
//! // Empty string is truthy for booleans (`?flag` with no value).
//! assert_eq!(ArgKind::Bool.parse("flag", "").unwrap(), ArgValue::Bool(true));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemeError};

/// Parser selector for a declared argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// `""`, `"1"`, `"true"` → true; `"0"`, `"false"` → false.
    Bool,
    /// Base-10 `i32`.
    Int,
    /// Base-10 `i64`.
    Long,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// Identity, never fails.
    Str,
}

impl ArgKind {
    /// Coerce a raw query value into a typed [`ArgValue`].
    ///
    /// `name` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::Coercion`] when the raw value does not parse
    /// as the selected kind.
    pub fn parse(self, name: &str, raw: &str) -> Result<ArgValue> {
        match self {
            ArgKind::Bool => match raw {
                "" | "1" | "true" => Ok(ArgValue::Bool(true)),
                "0" | "false" => Ok(ArgValue::Bool(false)),
                _ => Err(coercion(name, raw, "bool")),
            },
            ArgKind::Int => raw
                .parse::<i32>()
                .map(ArgValue::Int)
                .map_err(|_| coercion(name, raw, "i32")),
            ArgKind::Long => raw
                .parse::<i64>()
                .map(ArgValue::Long)
                .map_err(|_| coercion(name, raw, "i64")),
            ArgKind::Float => raw
                .parse::<f32>()
                .map(ArgValue::Float)
                .map_err(|_| coercion(name, raw, "f32")),
            ArgKind::Double => raw
                .parse::<f64>()
                .map(ArgValue::Double)
                .map_err(|_| coercion(name, raw, "f64")),
            ArgKind::Str => Ok(ArgValue::Str(raw.to_string())),
        }
    }
}

fn coercion(name: &str, raw: &str, expected: &'static str) -> SchemeError {
    SchemeError::Coercion {
        name: name.to_string(),
        raw: raw.to_string(),
        expected,
    }
}

/// A typed argument value.
///
/// `Display` renders the wire form used in scheme URIs and codec payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean, rendered as `1`/`0`.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// String, rendered verbatim.
    Str(String),
}

impl ArgValue {
    /// The [`ArgKind`] this value belongs to.
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Long(_) => ArgKind::Long,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Double(_) => ArgKind::Double,
            ArgValue::Str(_) => ArgKind::Str,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(true) => f.write_str("1"),
            ArgValue::Bool(false) => f.write_str("0"),
            ArgValue::Int(v) => write!(f, "{}", v),
            ArgValue::Long(v) => write!(f, "{}", v),
            ArgValue::Float(v) => write!(f, "{}", v),
            ArgValue::Double(v) => write!(f, "{}", v),
            ArgValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Long(v)
    }
}

impl From<f32> for ArgValue {
    fn from(v: f32) -> Self {
        ArgValue::Float(v)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Double(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}
