//! Dispatch client - the stateful engine behind scheme navigation.
//!
//! The client deduplicates repeated dispatches, arbitrates concurrent
//! requests via a per-call job strategy, runs the interceptor chain, and
//! executes single or transactional multi-scheme batches through the
//! external handler/transaction boundary.
//!
//! # Concurrency model
//!
//! All client state (the single in-flight job slot and the last-dispatched
//! memo) lives in one owned cell behind an async mutex that is only taken at
//! the dispatch entry point. The lock is held across strategy arbitration,
//! so later callers queue at the entry and the handler/transaction boundary
//! never sees two executions active concurrently against the same client.
//! Jobs themselves run in a spawned task and report back over a oneshot;
//! cancelling a job aborts the task and joins it before the next job starts.
//!
//! # Example
//!
//! ```ignore
//! let client = DispatchClient::builder(registry, handler, factory)
//!     .dedup_window(Duration::from_millis(300))
//!     .build();
//!
//! let ok = client.dispatch("app://profile?user_id=42").await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::handler::{SchemeHandler, Transaction, TransactionFactory};
use super::interceptor::{chain, Interceptor};
use crate::builder::BAD_PAYLOAD_KEY;
use crate::error::{Result, SchemeError};
use crate::parser::parse;
use crate::registry::RouteRegistry;

/// Default duplicate-suppression window.
pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_millis(500);

/// Strategy applied when a dispatch request arrives while a previous job is
/// still in flight. Selected per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobStrategy {
    /// Wait for the in-flight job to finish, then run.
    #[default]
    WaitPrevAndRun,
    /// Cancel the in-flight job, await its teardown, then run.
    CancelPrevAndRun,
    /// Drop the new request and report success, trusting the in-flight job
    /// to satisfy it.
    ContinuePrevOrRun,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Window during which an identical repeated dispatch is treated as
    /// already satisfied.
    pub dedup_window: Duration,
    /// Debug mode surfaces routing errors as raised failures; production
    /// mode logs and returns `false` so malformed URIs never crash the
    /// host application.
    pub debug: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            dedup_window: DEFAULT_DEDUP_WINDOW,
            debug: false,
        }
    }
}

/// Builder for configuring and creating a dispatch client.
pub struct DispatchClientBuilder {
    registry: Arc<RouteRegistry>,
    handler: Arc<dyn SchemeHandler>,
    transactions: Arc<dyn TransactionFactory>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    config: DispatchConfig,
}

impl DispatchClientBuilder {
    /// Append an interceptor. The first appended sits outermost.
    pub fn intercept(mut self, interceptor: impl Interceptor) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Set the duplicate-suppression window. Default: 500 ms.
    pub fn dedup_window(mut self, window: Duration) -> Self {
        self.config.dedup_window = window;
        self
    }

    /// Toggle debug mode. Default: off.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the client, folding the interceptor chain around the handler.
    pub fn build(self) -> DispatchClient {
        DispatchClient {
            registry: self.registry,
            chain: chain(self.handler, &self.interceptors),
            transactions: self.transactions,
            config: self.config,
            state: Mutex::new(ClientState {
                in_flight: None,
                last: None,
            }),
        }
    }
}

/// Memo of the last accepted dispatch, for duplicate suppression.
struct DispatchMemo {
    schemes: Vec<String>,
    at: Instant,
}

/// Mutable client state, written only at the dispatch entry point.
struct ClientState {
    /// The single tracked in-flight job.
    in_flight: Option<JoinHandle<()>>,
    /// Last dispatched scheme list and acceptance time.
    last: Option<DispatchMemo>,
}

/// The dispatch engine. Cheap to share behind an `Arc`.
pub struct DispatchClient {
    registry: Arc<RouteRegistry>,
    /// Interceptor chain folded around the terminal handler.
    chain: Arc<dyn SchemeHandler>,
    transactions: Arc<dyn TransactionFactory>,
    config: DispatchConfig,
    state: Mutex<ClientState>,
}

impl DispatchClient {
    /// Create a builder from the three required collaborators.
    pub fn builder(
        registry: RouteRegistry,
        handler: impl SchemeHandler,
        transactions: impl TransactionFactory,
    ) -> DispatchClientBuilder {
        DispatchClientBuilder {
            registry: Arc::new(registry),
            handler: Arc::new(handler),
            transactions: Arc::new(transactions),
            interceptors: Vec::new(),
            config: DispatchConfig::default(),
        }
    }

    /// Dispatch a single scheme with the default strategy
    /// ([`JobStrategy::WaitPrevAndRun`]).
    pub async fn dispatch(&self, scheme: &str) -> Result<bool> {
        self.dispatch_with(scheme, JobStrategy::default()).await
    }

    /// Dispatch a single scheme with an explicit strategy.
    pub async fn dispatch_with(&self, scheme: &str, strategy: JobStrategy) -> Result<bool> {
        self.run(vec![scheme.to_string()], strategy, false).await
    }

    /// Dispatch an ordered batch with the default strategy.
    ///
    /// All schemes execute against one shared transaction, in order; the
    /// first failure aborts the rest and fails the whole batch.
    pub async fn dispatch_batch(&self, schemes: &[&str]) -> Result<bool> {
        self.dispatch_batch_with(schemes, JobStrategy::default())
            .await
    }

    /// Dispatch an ordered batch with an explicit strategy.
    pub async fn dispatch_batch_with(
        &self,
        schemes: &[&str],
        strategy: JobStrategy,
    ) -> Result<bool> {
        let schemes: Vec<String> = schemes.iter().map(|s| s.to_string()).collect();
        self.run(schemes, strategy, true).await
    }

    /// Single entry point: dedup check, strategy arbitration, job spawn.
    async fn run(&self, schemes: Vec<String>, strategy: JobStrategy, batch: bool) -> Result<bool> {
        if schemes.is_empty() {
            return self.settle(Err(SchemeError::EmptyBatch));
        }

        let mut state = self.state.lock().await;

        if let Some(memo) = &state.last {
            if memo.schemes == schemes && memo.at.elapsed() < self.config.dedup_window {
                tracing::debug!(schemes = ?schemes, "Duplicate dispatch suppressed");
                return Ok(true);
            }
        }

        match strategy {
            JobStrategy::WaitPrevAndRun => {
                if let Some(prev) = state.in_flight.take() {
                    let _ = prev.await;
                }
            }
            JobStrategy::CancelPrevAndRun => {
                if let Some(prev) = state.in_flight.take() {
                    prev.abort();
                    // Join the teardown before the next job starts.
                    let _ = prev.await;
                    tracing::debug!("Cancelled in-flight dispatch job");
                }
            }
            JobStrategy::ContinuePrevOrRun => {
                if let Some(prev) = &state.in_flight {
                    if !prev.is_finished() {
                        tracing::debug!("In-flight job trusted to satisfy request");
                        return Ok(true);
                    }
                    state.in_flight = None;
                }
            }
        }

        state.last = Some(DispatchMemo {
            schemes: schemes.clone(),
            at: Instant::now(),
        });

        let (tx, rx) = oneshot::channel();
        let registry = self.registry.clone();
        let chain = self.chain.clone();
        let transactions = self.transactions.clone();
        let handle = tokio::spawn(async move {
            let result = execute(registry, chain, transactions, schemes, batch).await;
            let _ = tx.send(result);
        });
        state.in_flight = Some(handle);
        drop(state);

        match rx.await {
            Ok(result) => self.settle(result),
            // Sender dropped: the job was cancelled by a later request.
            Err(_) => {
                tracing::debug!("Dispatch cancelled before completion");
                Ok(false)
            }
        }
    }

    /// Apply the failure policy: debug raises, production logs and
    /// degrades to `false`.
    fn settle(&self, result: Result<bool>) -> Result<bool> {
        match result {
            Ok(ok) => Ok(ok),
            Err(e) if self.config.debug => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Dispatch failed");
                Ok(false)
            }
        }
    }
}

/// Execute a scheme list against one transaction. Runs inside the spawned
/// job task; everything it starts is awaited inline so aborting the task
/// cancels the whole job.
async fn execute(
    registry: Arc<RouteRegistry>,
    chain: Arc<dyn SchemeHandler>,
    transactions: Arc<dyn TransactionFactory>,
    schemes: Vec<String>,
    batch: bool,
) -> Result<bool> {
    let txn: Arc<dyn Transaction> = transactions.begin();

    for scheme in &schemes {
        let parts = parse(scheme)?;
        if parts.has_query(BAD_PAYLOAD_KEY) {
            tracing::warn!(scheme = %scheme, "Refusing scheme carrying bad-payload marker");
            return Ok(false);
        }
        let resolved = registry.resolve(&parts)?;

        if !chain.call(txn.clone(), resolved).await {
            if batch {
                return Err(SchemeError::Transaction(scheme.clone()));
            }
            return Ok(false);
        }
    }

    if txn.finish().await {
        Ok(true)
    } else if batch {
        Err(SchemeError::Transaction("finish".to_string()))
    } else {
        Ok(false)
    }
}
