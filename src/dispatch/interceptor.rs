//! Interceptor chain around the terminal handler.
//!
//! Each interceptor wraps the rest of the chain and decides whether to
//! invoke it, which allows short-circuiting, logging, or policy enforcement
//! before dispatch proceeds. The chain is folded once at client build time;
//! the first registered interceptor sits outermost.
//!
//! # Example
//!
//! ```ignore
//! client_builder.intercept(FnInterceptor::new(|txn, scheme, next| async move {
//!     if scheme.route.target == "AdminScreen" {
//!         return false; // short-circuit: never reaches the handler
//!     }
//!     next.call(txn, scheme).await
//! }))
//! ```

use std::future::Future;
use std::sync::Arc;

use super::handler::{BoxFuture, SchemeHandler, Transaction};
use crate::registry::ResolvedScheme;

/// Trait for dispatch interceptors.
pub trait Interceptor: Send + Sync + 'static {
    /// Inspect a resolved scheme and either delegate to `next` or settle
    /// the dispatch directly.
    fn call(
        &self,
        txn: Arc<dyn Transaction>,
        scheme: ResolvedScheme,
        next: Arc<dyn SchemeHandler>,
    ) -> BoxFuture<'static, bool>;
}

/// Wrapper that lets plain async closures act as interceptors.
pub struct FnInterceptor<F> {
    interceptor: F,
}

impl<F, Fut> FnInterceptor<F>
where
    F: Fn(Arc<dyn Transaction>, ResolvedScheme, Arc<dyn SchemeHandler>) -> Fut
        + Send
        + Sync
        + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    /// Wrap a closure as an [`Interceptor`].
    pub fn new(interceptor: F) -> Self {
        Self { interceptor }
    }
}

impl<F, Fut> Interceptor for FnInterceptor<F>
where
    F: Fn(Arc<dyn Transaction>, ResolvedScheme, Arc<dyn SchemeHandler>) -> Fut
        + Send
        + Sync
        + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    fn call(
        &self,
        txn: Arc<dyn Transaction>,
        scheme: ResolvedScheme,
        next: Arc<dyn SchemeHandler>,
    ) -> BoxFuture<'static, bool> {
        Box::pin((self.interceptor)(txn, scheme, next))
    }
}

/// One link of the folded chain.
struct InterceptedHandler {
    interceptor: Arc<dyn Interceptor>,
    next: Arc<dyn SchemeHandler>,
}

impl SchemeHandler for InterceptedHandler {
    fn call(&self, txn: Arc<dyn Transaction>, scheme: ResolvedScheme) -> BoxFuture<'static, bool> {
        self.interceptor.call(txn, scheme, self.next.clone())
    }
}

/// Fold interceptors around a terminal handler, first interceptor outermost.
pub(crate) fn chain(
    terminal: Arc<dyn SchemeHandler>,
    interceptors: &[Arc<dyn Interceptor>],
) -> Arc<dyn SchemeHandler> {
    interceptors.iter().rev().fold(terminal, |next, interceptor| {
        Arc::new(InterceptedHandler {
            interceptor: interceptor.clone(),
            next,
        })
    })
}
