//! External handler and transaction boundary.
//!
//! The dispatch client never performs navigation itself; it sequences calls
//! into two externally implemented abstractions:
//!
//! - [`SchemeHandler`] - turns a (transaction, resolved scheme) pair into a
//!   boolean success
//! - [`Transaction`] - the execution context performing the actual side
//!   effect, with an explicit `finish` commit for batches
//!
//! Handlers are registered explicitly as concrete references (a capability
//! table), never looked up by string name at runtime.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::registry::ResolvedScheme;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// External execution context for one or more matched routes.
///
/// A transaction is one-shot for single dispatch and shared across all
/// schemes of a batch. `finish` commits the accumulated effects; a batch
/// only succeeds once `finish` returns `true`.
pub trait Transaction: Send + Sync + 'static {
    /// Finalize/commit the accumulated effects.
    fn finish(&self) -> BoxFuture<'static, bool>;
}

/// Creates the transaction context for each dispatch.
pub trait TransactionFactory: Send + Sync + 'static {
    /// Begin a fresh transaction.
    fn begin(&self) -> Arc<dyn Transaction>;
}

impl<F> TransactionFactory for F
where
    F: Fn() -> Arc<dyn Transaction> + Send + Sync + 'static,
{
    fn begin(&self) -> Arc<dyn Transaction> {
        (self)()
    }
}

/// Trait for route execution handlers.
pub trait SchemeHandler: Send + Sync + 'static {
    /// Execute a resolved scheme against a transaction, reporting success.
    fn call(&self, txn: Arc<dyn Transaction>, scheme: ResolvedScheme) -> BoxFuture<'static, bool>;
}

/// Wrapper that lets plain async closures act as handlers.
pub struct FnHandler<F> {
    handler: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Arc<dyn Transaction>, ResolvedScheme) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    /// Wrap a closure as a [`SchemeHandler`].
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F, Fut> SchemeHandler for FnHandler<F>
where
    F: Fn(Arc<dyn Transaction>, ResolvedScheme) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    fn call(&self, txn: Arc<dyn Transaction>, scheme: ResolvedScheme) -> BoxFuture<'static, bool> {
        Box::pin((self.handler)(txn, scheme))
    }
}
