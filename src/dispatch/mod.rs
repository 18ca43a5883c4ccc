//! Dispatch module - the stateful engine and its external boundary.
//!
//! Provides:
//! - [`DispatchClient`] - dedup, in-flight-job strategies, batch execution
//! - [`SchemeHandler`] / [`Transaction`] / [`TransactionFactory`] - the
//!   externally implemented execution boundary
//! - [`Interceptor`] - chain links that wrap the terminal handler
//!
//! # Example
//!
//! ```ignore
//! use scheme_router::dispatch::{DispatchClient, FnHandler, JobStrategy};
//!
//! let client = DispatchClient::builder(registry, handler, factory).build();
//! client.dispatch("app://profile?user_id=42").await?;
//! client
//!     .dispatch_with("app://home", JobStrategy::CancelPrevAndRun)
//!     .await?;
//! ```

mod client;
mod handler;
mod interceptor;

pub use client::{
    DispatchClient, DispatchClientBuilder, DispatchConfig, JobStrategy, DEFAULT_DEDUP_WINDOW,
};
pub use handler::{BoxFuture, FnHandler, SchemeHandler, Transaction, TransactionFactory};
pub use interceptor::{FnInterceptor, Interceptor};
