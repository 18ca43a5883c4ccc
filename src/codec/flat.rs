//! Flat `name=value&name=value` codec for structured records.
//!
//! Encodes a [`Record`] into the same flat shape route query strings use,
//! so structured payloads can ride inside a scheme URI's query section.
//!
//! Booleans encode as `1`/`0`, matching the decode side. Null fields are
//! dropped from the output entirely rather than written as an explicit
//! token; `decode(encode(x)) == x` therefore holds exactly when x's null
//! fields are trailing in schema order (their schema default must be null).
//!
//! # Example
//!
//! ```
//! use scheme_router::args::ArgKind;
//! use scheme_router::codec::{FieldSpec, FlatCodec, Record, RecordSchema};
//!
//! let schema = RecordSchema::new(vec![
//!     FieldSpec::new("b", ArgKind::Bool, false),
//!     FieldSpec::new("i", ArgKind::Int, 80),
//! ]);
//! let mut record = Record::from_defaults(&schema);
//! record.set(&schema, "i", 101);
//!
//! let encoded = FlatCodec::encode(&schema, &record).unwrap();
//! assert_eq!(encoded, "b=0&i=101");
//! assert_eq!(FlatCodec::decode(&schema, &encoded).unwrap(), record);
//! ```

use super::schema::{Record, RecordSchema};
use crate::error::{Result, SchemeError};

/// Literal token a null value decodes from.
const NULL_TOKEN: &str = "null";

/// Codec between [`Record`]s and flat `name=value&...` strings.
///
/// Implemented as a marker struct with static methods; the schema is passed
/// per call and no state is held between operations.
pub struct FlatCodec;

impl FlatCodec {
    /// Encode a record in schema declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::Serialization`] when the record is not aligned
    /// to the schema or a value's type does not match its field spec.
    pub fn encode(schema: &RecordSchema, record: &Record) -> Result<String> {
        if record.values().len() != schema.len() {
            return Err(SchemeError::Serialization(format!(
                "record has {} values, schema declares {} fields",
                record.values().len(),
                schema.len()
            )));
        }

        let mut out = String::new();
        for (field, value) in schema.fields().iter().zip(record.values()) {
            // Remember where this field starts so a null value can be
            // trimmed back to the previous separator.
            let mark = out.len();
            out.push_str(&field.name);
            out.push('=');
            match value {
                Some(v) => {
                    if v.kind() != field.kind {
                        return Err(SchemeError::Serialization(format!(
                            "field '{}' declared {:?} but value is {:?}",
                            field.name,
                            field.kind,
                            v.kind()
                        )));
                    }
                    out.push_str(&v.to_string());
                    out.push('&');
                }
                None => out.truncate(mark),
            }
        }
        if out.ends_with('&') {
            out.pop();
        }
        Ok(out)
    }

    /// Decode a flat string against a schema.
    ///
    /// Fields are resolved by name against the schema descriptor, not by
    /// position, so missing trailing fields simply keep their schema
    /// default. A raw value equal to the literal `null` decodes as a null
    /// value. Chunks whose name is not declared are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::Coercion`] when a raw value does not parse as
    /// its field's declared kind.
    pub fn decode(schema: &RecordSchema, input: &str) -> Result<Record> {
        let mut record = Record::from_defaults(schema);
        for chunk in input.split('&') {
            if chunk.is_empty() {
                continue;
            }
            let (name, raw) = match chunk.find('=') {
                Some(eq) => (&chunk[..eq], &chunk[eq + 1..]),
                None => (chunk, ""),
            };
            let Some(idx) = schema.index_of(name) else {
                continue;
            };
            let field = &schema.fields()[idx];
            record.values_mut()[idx] = if raw == NULL_TOKEN {
                None
            } else {
                Some(field.kind.parse(&field.name, raw)?)
            };
        }
        Ok(record)
    }
}
