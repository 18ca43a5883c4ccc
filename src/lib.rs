//! # scheme-router
//!
//! In-process scheme URI ("deep link") routing and dispatch engine.
//!
//! Any part of an application can request navigation to a named destination
//! by constructing and dispatching a compact `protocol://action?query` URI,
//! without knowing which concrete handler serves that destination.
//!
//! ## Architecture
//!
//! - **Parser**: scheme string → protocol/action/raw-query parts
//! - **Registry**: resolves parts to a route definition plus typed arguments
//! - **Codec**: flat-string serialization for structured payloads riding in
//!   the query section
//! - **Builder**: fluent accumulation of typed arguments into a canonical URI
//! - **Dispatch client**: dedup, in-flight-job strategies, interceptors, and
//!   transactional batches against an external handler boundary
//!
//! ## Example
//!
//! ```ignore
//! use scheme_router::builder::SchemeBuilder;
//! use scheme_router::dispatch::DispatchClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = DispatchClient::builder(registry, handler, factory).build();
//!
//!     let uri = SchemeBuilder::new("app", "profile")
//!         .arg("user_id", 42i64)
//!         .to_string();
//!     client.dispatch(&uri).await.unwrap();
//! }
//! ```

pub mod args;
pub mod builder;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod parser;
pub mod registry;

pub use builder::SchemeBuilder;
pub use dispatch::{DispatchClient, JobStrategy};
pub use error::SchemeError;
pub use registry::{RouteDefinition, RouteRegistry};
