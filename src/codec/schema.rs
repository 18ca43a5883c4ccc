//! Record shape descriptors for the flat query codec.
//!
//! A [`RecordSchema`] is an ordered list of named, typed fields known at
//! both encode and decode time. Schemas are supplied by the caller per
//! operation; the codec keeps no state of its own.

use crate::args::{ArgKind, ArgValue};

/// One named, typed field in a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name, used as the query key.
    pub name: String,
    /// Parser used to coerce the raw value on decode.
    pub kind: ArgKind,
    /// Value a missing field decodes to. `None` marks the field nullable
    /// with a null default.
    pub default: Option<ArgValue>,
}

impl FieldSpec {
    /// A field with a concrete default.
    pub fn new(name: &str, kind: ArgKind, default: impl Into<ArgValue>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: Some(default.into()),
        }
    }

    /// A nullable field whose default is null.
    ///
    /// Place nullable fields after all fields that must be positionally
    /// recoverable: a dropped null cannot be told apart from
    /// declared-but-absent once a later field has been written.
    pub fn nullable(name: &str, kind: ArgKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: None,
        }
    }
}

/// Ordered record shape. Field order is the encode order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Create a schema from its fields, in declaration order.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of declared fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a field by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A record instance aligned to a [`RecordSchema`].
///
/// Values are stored in schema order; `None` is a null value.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Option<ArgValue>>,
}

impl Record {
    /// A record with every field at its schema default.
    pub fn from_defaults(schema: &RecordSchema) -> Self {
        Self {
            values: schema.fields.iter().map(|f| f.default.clone()).collect(),
        }
    }

    /// Set a field by name. Unknown names are ignored.
    pub fn set(&mut self, schema: &RecordSchema, name: &str, value: impl Into<ArgValue>) {
        if let Some(idx) = schema.index_of(name) {
            self.values[idx] = Some(value.into());
        }
    }

    /// Null out a field by name. Unknown names are ignored.
    pub fn set_null(&mut self, schema: &RecordSchema, name: &str) {
        if let Some(idx) = schema.index_of(name) {
            self.values[idx] = None;
        }
    }

    /// Read a field by name. Returns `None` for unknown names or null values.
    pub fn get<'a>(&'a self, schema: &RecordSchema, name: &str) -> Option<&'a ArgValue> {
        schema
            .index_of(name)
            .and_then(|idx| self.values[idx].as_ref())
    }

    /// The values, in schema order.
    #[inline]
    pub fn values(&self) -> &[Option<ArgValue>] {
        &self.values
    }

    /// Mutable access for the decoder.
    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [Option<ArgValue>] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> RecordSchema {
        RecordSchema::new(vec![
            FieldSpec::new("b", ArgKind::Bool, false),
            FieldSpec::new("i", ArgKind::Int, 80),
            FieldSpec::nullable("note", ArgKind::Str),
        ])
    }

    #[test]
    fn test_index_of() {
        let s = schema();
        assert_eq!(s.index_of("b"), Some(0));
        assert_eq!(s.index_of("note"), Some(2));
        assert_eq!(s.index_of("missing"), None);
    }

    #[test]
    fn test_from_defaults() {
        let s = schema();
        let r = Record::from_defaults(&s);
        assert_eq!(r.get(&s, "b"), Some(&ArgValue::Bool(false)));
        assert_eq!(r.get(&s, "i"), Some(&ArgValue::Int(80)));
        assert_eq!(r.get(&s, "note"), None);
    }

    #[test]
    fn test_set_and_get() {
        let s = schema();
        let mut r = Record::from_defaults(&s);
        r.set(&s, "i", 101);
        r.set(&s, "note", "hi");
        assert_eq!(r.get(&s, "i"), Some(&ArgValue::Int(101)));
        assert_eq!(r.get(&s, "note"), Some(&ArgValue::Str("hi".to_string())));
    }

    #[test]
    fn test_set_unknown_name_is_ignored() {
        let s = schema();
        let mut r = Record::from_defaults(&s);
        r.set(&s, "nope", 1);
        assert_eq!(r, Record::from_defaults(&s));
    }

    #[test]
    fn test_set_null() {
        let s = schema();
        let mut r = Record::from_defaults(&s);
        r.set(&s, "note", "x");
        r.set_null(&s, "note");
        assert_eq!(r.get(&s, "note"), None);
    }
}
