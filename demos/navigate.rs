//! Navigation demo - dispatching scheme URIs against a toy handler.
//!
//! This example demonstrates:
//! - Populating a route registry from a JSON table
//! - Building a scheme URI with typed arguments
//! - Dispatching single schemes and a transactional batch

use std::sync::Arc;

use scheme_router::builder::SchemeBuilder;
use scheme_router::dispatch::{BoxFuture, DispatchClient, FnHandler, Transaction};
use scheme_router::registry::{ResolvedScheme, RouteRegistry};

/// Transaction that just prints the commit.
struct PrintTransaction;

impl Transaction for PrintTransaction {
    fn finish(&self) -> BoxFuture<'static, bool> {
        Box::pin(async {
            println!("transaction committed");
            true
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // An external loader would normally produce this table.
    let registry = RouteRegistry::from_json(
        r#"[
            {"id": 1, "action": "home", "target": "HomeScreen"},
            {"id": 2, "action": "profile", "target": "ProfileScreen",
             "arguments": [{"name": "user_id", "kind": "long", "default": 0}]}
        ]"#,
    )?;

    let handler = FnHandler::new(|_txn, scheme: ResolvedScheme| async move {
        println!(
            "navigating to {} (args: {:?})",
            scheme.route.target, scheme.args
        );
        true
    });
    let factory = || Arc::new(PrintTransaction) as Arc<dyn Transaction>;

    let client = DispatchClient::builder(registry, handler, factory).build();

    // Single dispatch from a built URI.
    let uri = SchemeBuilder::new("app", "profile")
        .arg("user_id", 42i64)
        .to_string();
    println!("dispatching {uri}");
    client.dispatch(&uri).await?;

    // A batch shares one transaction.
    client
        .dispatch_batch(&["app://home", "app://profile?user_id=7"])
        .await?;

    Ok(())
}
