//! Tests for middleware ordering around the dispatch pipeline
//!
//! - Global middleware runs before the chain's interceptors
//! - `after` hooks run in reverse order
//! - An early response skips the handler but still unwinds every `before` that ran

use brrtrouter_backing::binding::{Arguments, MethodParameter};
use brrtrouter_backing::context::RequestContext;
use brrtrouter_backing::dispatcher::Dispatcher;
use brrtrouter_backing::handler::{FnHandler, HandlerResponse};
use brrtrouter_backing::mapping::StaticMappingProvider;
use brrtrouter_backing::middleware::{Middleware, TracingMiddleware};
use brrtrouter_backing::object::{ObjectRef, ParameterType};
use brrtrouter_backing::router::BackingPathResolver;
use brrtrouter_backing::runtime_config::RuntimeConfig;
use brrtrouter_backing::store;
use http::Method;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Journal = Arc<Mutex<Vec<String>>>;

struct Recorder {
    name: &'static str,
    journal: Journal,
    reject: bool,
}

impl Middleware for Recorder {
    fn before(&self, ctx: &mut RequestContext) -> Option<HandlerResponse> {
        let exposed = store::backing_object(ctx).is_some();
        self.journal
            .lock()
            .push(format!("before:{}:{exposed}", self.name));
        self.reject
            .then(|| HandlerResponse::error(403, "rejected"))
    }

    fn after(&self, _ctx: &RequestContext, res: &mut HandlerResponse, _latency: Duration) {
        self.journal
            .lock()
            .push(format!("after:{}:{}", self.name, res.status));
        res.set_header("x-seen-by", self.name.to_string());
    }
}

fn recorder(name: &'static str, journal: &Journal, reject: bool) -> Arc<dyn Middleware> {
    Arc::new(Recorder {
        name,
        journal: Arc::clone(journal),
        reject,
    })
}

fn dispatcher(calls: &Arc<AtomicUsize>) -> Dispatcher {
    let provider = StaticMappingProvider::new().with("/page", ObjectRef::new(7u32));
    let calls = Arc::clone(calls);
    let handler = FnHandler::new(
        "page",
        vec![MethodParameter::backing("content", ParameterType::of::<u32>())],
        move |_: &RequestContext, args: Arguments| {
            calls.fetch_add(1, Ordering::SeqCst);
            let value = args.get_as::<u32>("content").map(|v| *v);
            HandlerResponse::ok_json(json!({ "value": value }))
        },
    );
    let mut d = Dispatcher::from_config(&RuntimeConfig::default());
    d.add_mapping(Arc::new(BackingPathResolver::new(
        Arc::new(provider),
        Arc::new(handler),
    )));
    d
}

#[test]
fn test_globals_run_before_exposure_and_unwind_in_reverse() {
    let journal: Journal = Arc::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut d = dispatcher(&calls);
    d.add_middleware(recorder("outer", &journal, false));
    d.add_middleware(recorder("inner", &journal, false));

    let resp = d.dispatch(&mut RequestContext::new(Method::GET, "/page"));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["value"], 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *journal.lock(),
        vec![
            "before:outer:false",
            "before:inner:false",
            "after:inner:200",
            "after:outer:200",
        ]
    );
    // Last writer is the outermost after hook
    assert_eq!(resp.get_header("x-seen-by"), Some("outer"));
}

#[test]
fn test_early_response_skips_handler_and_later_middleware() {
    let journal: Journal = Arc::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut d = dispatcher(&calls);
    d.add_middleware(recorder("first", &journal, false));
    d.add_middleware(recorder("gate", &journal, true));
    d.add_middleware(recorder("never", &journal, false));

    let mut ctx = RequestContext::new(Method::GET, "/page");
    let resp = d.dispatch(&mut ctx);
    assert_eq!(resp.status, 403);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        *journal.lock(),
        vec![
            "before:first:false",
            "before:gate:false",
            "after:gate:403",
            "after:first:403",
        ]
    );
    // Chain interceptors come after the globals, so nothing was exposed
    assert!(store::backing_object(&ctx).is_none());
}

#[test]
fn test_tracing_middleware_is_transparent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut d = dispatcher(&calls);
    d.add_middleware(Arc::new(TracingMiddleware));

    let resp = d.dispatch(&mut RequestContext::new(Method::GET, "/page"));
    assert_eq!(resp.status, 200);
    let resp = d.dispatch(&mut RequestContext::new(Method::GET, "/missing"));
    assert_eq!(resp.status, 404);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_binding_failure_still_unwinds_with_error_status() {
    let journal: Journal = Arc::default();
    let provider = StaticMappingProvider::new().with("/page", ObjectRef::new(7u32));
    let handler = FnHandler::new(
        "wants_text",
        vec![MethodParameter::backing("content", ParameterType::of::<String>())],
        |_: &RequestContext, _: Arguments| HandlerResponse::ok_json(json!(null)),
    );
    let mut d = Dispatcher::from_config(&RuntimeConfig::default());
    d.add_mapping(Arc::new(BackingPathResolver::new(
        Arc::new(provider),
        Arc::new(handler),
    )));
    d.add_middleware(recorder("outer", &journal, false));

    let resp = d.dispatch(&mut RequestContext::new(Method::GET, "/page"));
    assert_eq!(resp.status, 500);
    assert_eq!(*journal.lock(), vec!["before:outer:false", "after:outer:500"]);
}
