//! Integration tests for scheme-router.
//!
//! These tests verify the integration between different modules: builder
//! output through the parser and registry, codec payloads riding inside
//! URIs, and full dispatch flows against a recording handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use scheme_router::args::{ArgKind, ArgValue};
use scheme_router::builder::SchemeBuilder;
use scheme_router::codec::{FieldSpec, FlatCodec, Record, RecordSchema};
use scheme_router::dispatch::{
    BoxFuture, DispatchClient, FnHandler, FnInterceptor, JobStrategy, SchemeHandler, Transaction,
    TransactionFactory,
};
use scheme_router::parser::parse;
use scheme_router::registry::{ArgumentDefinition, RouteDefinition, RouteRegistry};

struct RecordingTransaction {
    finished: Arc<AtomicUsize>,
}

impl Transaction for RecordingTransaction {
    fn finish(&self) -> BoxFuture<'static, bool> {
        self.finished.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { true })
    }
}

struct RecordingFactory {
    finished: Arc<AtomicUsize>,
}

impl TransactionFactory for RecordingFactory {
    fn begin(&self) -> Arc<dyn Transaction> {
        Arc::new(RecordingTransaction {
            finished: self.finished.clone(),
        })
    }
}

fn registry() -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    registry
        .register(
            RouteDefinition::new(1, "detail", "ItemDetail").with_arguments(vec![
                ArgumentDefinition::special("mode", ArgKind::Int, 1),
                ArgumentDefinition::new("item_id", ArgKind::Long, 0i64),
            ]),
        )
        .unwrap();
    registry
        .register(
            RouteDefinition::new(2, "detail", "OrderDetail").with_arguments(vec![
                ArgumentDefinition::special("mode", ArgKind::Int, 2),
                ArgumentDefinition::new("order_id", ArgKind::Long, 0i64),
            ]),
        )
        .unwrap();
    registry
        .register(RouteDefinition::new(3, "home", "HomeScreen"))
        .unwrap();
    registry
}

/// Client whose handler records the matched target per dispatched scheme.
fn recording_client(
    targets: Arc<Mutex<Vec<String>>>,
    finished: Arc<AtomicUsize>,
    fail_target: &'static str,
) -> DispatchClient {
    let handler = FnHandler::new(move |_txn, scheme: scheme_router::registry::ResolvedScheme| {
        let targets = targets.clone();
        async move {
            targets.lock().unwrap().push(scheme.route.target.clone());
            scheme.route.target != fail_target
        }
    });
    DispatchClient::builder(registry(), handler, RecordingFactory { finished }).build()
}

/// Built URI → parse → resolve, end to end.
#[test]
fn test_builder_output_resolves_through_registry() {
    let uri = SchemeBuilder::new("app", "detail")
        .arg("mode", 2)
        .arg("order_id", 9000i64)
        .to_string();

    let parts = parse(&uri).unwrap();
    let resolved = registry().resolve(&parts).unwrap();

    assert_eq!(resolved.route.target, "OrderDetail");
    assert_eq!(resolved.arg("order_id"), Some(&ArgValue::Long(9000)));
    assert_eq!(resolved.arg("mode"), Some(&ArgValue::Int(2)));
}

/// Codec payload rides inside a URI and survives the full trip.
#[test]
fn test_codec_payload_inside_uri() {
    let schema = RecordSchema::new(vec![
        FieldSpec::new("b", ArgKind::Bool, false),
        FieldSpec::new("i", ArgKind::Int, 80),
        FieldSpec::new("l", ArgKind::Long, 0i64),
        FieldSpec::new("f", ArgKind::Float, 0.0f32),
        FieldSpec::new("str", ArgKind::Str, ""),
    ]);
    let mut record = Record::from_defaults(&schema);
    record.set(&schema, "l", 1000i64);
    record.set(&schema, "f", 3.14f32);
    record.set(&schema, "str", "haha");

    let uri = SchemeBuilder::new("app", "home")
        .model(&schema, &record)
        .unwrap()
        .to_string();
    assert_eq!(uri, "app://home?b=0&i=80&l=1000&f=3.14&str=haha");

    // The query section decodes back to the identical record.
    let flat = &uri[uri.find('?').unwrap() + 1..];
    let decoded = FlatCodec::decode(&schema, flat).unwrap();
    assert_eq!(decoded, record);
}

/// Repeated parse/render cycles are stable.
#[test]
fn test_parse_render_fixpoint() {
    let uri = SchemeBuilder::new("app", "detail")
        .arg("mode", 1)
        .arg("item_id", 5i64)
        .to_string();

    let mut current = uri.clone();
    for _ in 0..3 {
        current = parse(&current).unwrap().render();
        assert_eq!(current, uri);
    }
}

#[tokio::test]
async fn test_dispatch_selects_route_by_special_argument() {
    let targets = Arc::new(Mutex::new(Vec::new()));
    let finished = Arc::new(AtomicUsize::new(0));
    let client = recording_client(targets.clone(), finished.clone(), "-");

    assert!(client
        .dispatch("app://detail?mode=1&item_id=5")
        .await
        .unwrap());
    assert!(client
        .dispatch("app://detail?mode=2&order_id=6")
        .await
        .unwrap());

    assert_eq!(*targets.lock().unwrap(), ["ItemDetail", "OrderDetail"]);
    assert_eq!(finished.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_batch_is_all_or_nothing() {
    let targets = Arc::new(Mutex::new(Vec::new()));
    let finished = Arc::new(AtomicUsize::new(0));
    let client = recording_client(targets.clone(), finished.clone(), "OrderDetail");

    let ok = client
        .dispatch_batch(&[
            "app://home",
            "app://detail?mode=2", // handler fails here
            "app://detail?mode=1",
        ])
        .await
        .unwrap();

    assert!(!ok);
    // The third scheme's handler is never invoked, nothing commits.
    assert_eq!(*targets.lock().unwrap(), ["HomeScreen", "OrderDetail"]);
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bad_payload_from_builder_refused_by_client() {
    let schema = RecordSchema::new(vec![FieldSpec::new("n", ArgKind::Int, 0)]);
    let mut record = Record::from_defaults(&schema);
    record.set(&schema, "n", "not an int");

    // Production-mode builder downgrades the failure to a marker.
    let uri = SchemeBuilder::new("app", "home")
        .model(&schema, &record)
        .unwrap()
        .to_string();

    let targets = Arc::new(Mutex::new(Vec::new()));
    let finished = Arc::new(AtomicUsize::new(0));
    let client = recording_client(targets.clone(), finished.clone(), "-");

    assert!(!client.dispatch(&uri).await.unwrap());
    assert!(targets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_interceptor_policy_blocks_target() {
    let targets = Arc::new(Mutex::new(Vec::new()));
    let finished = Arc::new(AtomicUsize::new(0));

    let handler = {
        let targets = targets.clone();
        FnHandler::new(move |_txn, scheme: scheme_router::registry::ResolvedScheme| {
            let targets = targets.clone();
            async move {
                targets.lock().unwrap().push(scheme.route.target.clone());
                true
            }
        })
    };
    let client = DispatchClient::builder(registry(), handler, RecordingFactory { finished })
        .intercept(FnInterceptor::new(
            |txn,
             scheme: scheme_router::registry::ResolvedScheme,
             next: Arc<dyn SchemeHandler>| async move {
                if scheme.route.target == "OrderDetail" {
                    return false;
                }
                next.call(txn, scheme).await
            },
        ))
        .build();

    assert!(!client.dispatch("app://detail?mode=2").await.unwrap());
    assert!(client.dispatch("app://detail?mode=1").await.unwrap());
    assert_eq!(*targets.lock().unwrap(), ["ItemDetail"]);
}

#[tokio::test]
async fn test_json_route_table_end_to_end() {
    let json = r#"[
        {"id": 1, "action": "profile", "target": "ProfileScreen",
         "arguments": [
            {"name": "user_id", "kind": "long", "default": 0},
            {"name": "edit", "kind": "bool", "default": false}
         ],
         "transitions": {"enter": 1, "exit": 2, "pop_enter": 3, "pop_exit": 4}}
    ]"#;
    let registry = RouteRegistry::from_json(json).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let handler = {
        let seen = seen.clone();
        FnHandler::new(move |_txn, scheme: scheme_router::registry::ResolvedScheme| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push((
                    scheme.route.transitions.enter,
                    scheme.arg("user_id").cloned(),
                    scheme.arg("edit").cloned(),
                ));
                true
            }
        })
    };
    let finished = Arc::new(AtomicUsize::new(0));
    let client = DispatchClient::builder(registry, handler, RecordingFactory { finished }).build();

    let uri = SchemeBuilder::new("app", "profile")
        .arg("user_id", 42i64)
        .arg("edit", true)
        .to_string();
    assert!(client.dispatch(&uri).await.unwrap());

    assert_eq!(
        *seen.lock().unwrap(),
        [(1, Some(ArgValue::Long(42)), Some(ArgValue::Bool(true)))]
    );
}

#[tokio::test]
async fn test_cancel_then_redispatch() {
    let targets = Arc::new(Mutex::new(Vec::new()));
    let finished = Arc::new(AtomicUsize::new(0));

    let gate = Arc::new(tokio::sync::Notify::new());
    let handler = {
        let targets = targets.clone();
        let gate = gate.clone();
        FnHandler::new(move |_txn, scheme: scheme_router::registry::ResolvedScheme| {
            let targets = targets.clone();
            let gate = gate.clone();
            async move {
                targets.lock().unwrap().push(scheme.route.target.clone());
                if scheme.route.target == "ItemDetail" {
                    // Parks until cancelled.
                    gate.notified().await;
                }
                true
            }
        })
    };
    let client = Arc::new(
        DispatchClient::builder(registry(), handler, RecordingFactory { finished }).build(),
    );

    let first = {
        let client = client.clone();
        tokio::spawn(async move { client.dispatch("app://detail?mode=1&item_id=5").await })
    };
    while targets.lock().unwrap().is_empty() {
        tokio::task::yield_now().await;
    }

    let second = client
        .dispatch_with("app://home", JobStrategy::CancelPrevAndRun)
        .await
        .unwrap();
    assert!(second);
    assert!(!first.await.unwrap().unwrap());
    assert_eq!(*targets.lock().unwrap(), ["ItemDetail", "HomeScreen"]);
}
