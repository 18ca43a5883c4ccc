//! Codec module - flat-string serialization for structured payloads.
//!
//! This module provides the record shape descriptors and the codec that
//! turns a structured record into the flat `name=value&name=value` form
//! consumed by route query strings:
//!
//! - [`RecordSchema`] / [`FieldSpec`] - the ordered, typed record shape
//! - [`Record`] - a value instance aligned to a schema
//! - [`FlatCodec`] - encode/decode between records and flat strings
//!
//! # Design
//!
//! The codec is a marker struct with static methods rather than a trait
//! object. Schemas are supplied by the caller per operation; nothing is
//! persisted between calls.

mod flat;
mod schema;

pub use flat::FlatCodec;
pub use schema::{FieldSpec, Record, RecordSchema};
