#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use routematch::hot_reload::{reload_manifest, watch_manifest};
use routematch::manifest::RouteManifest;
use routematch::router::{Router, SharedRouter};
use routematch::runtime_config::RouterConfig;

const MANIFEST_V1: &str = r#"
routes:
  - method: GET
    path: /foo
    handler: foo_one
"#;

const MANIFEST_V2: &str = r#"
routes:
  - method: GET
    path: /foo
    handler: foo_two
  - method: POST
    path: /bar
    handler: bar
"#;

fn temp_manifest(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("routematch_reload_")
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn handler_at(shared: &SharedRouter, method: &str, path: &str) -> Option<String> {
    shared
        .match_route(method, path)
        .into_match()
        .map(|m| m.route.handler.to_string())
}

#[test]
fn test_watch_manifest_reload() {
    let file = temp_manifest(MANIFEST_V1);
    let router = RouteManifest::load(file.path())
        .unwrap()
        .build_router(RouterConfig::default())
        .unwrap();
    let shared = Arc::new(SharedRouter::new(router));

    let updates: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let updates_clone = updates.clone();

    let watcher = watch_manifest(
        file.path(),
        shared.clone(),
        RouterConfig::default(),
        move |router| {
            let names = router
                .routes()
                .iter()
                .map(|r| r.handler.to_string())
                .collect();
            updates_clone.lock().unwrap().push(names);
        },
    )
    .expect("watch_manifest");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(file.path(), MANIFEST_V2).unwrap();

    // wait for callback to receive update
    for _ in 0..40 {
        {
            let ups = updates.lock().unwrap();
            if ups.iter().any(|v| v.contains(&"foo_two".to_string())) {
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    let ups = updates.lock().unwrap();
    assert!(ups.iter().any(|v| v.contains(&"foo_two".to_string())));
    assert_eq!(handler_at(&shared, "GET", "/foo").as_deref(), Some("foo_two"));
    assert_eq!(handler_at(&shared, "POST", "/bar").as_deref(), Some("bar"));

    drop(watcher);
}

#[test]
fn test_reload_manifest_publishes_new_table() {
    let file = temp_manifest(MANIFEST_V1);
    let shared = SharedRouter::default();

    let published = reload_manifest(file.path(), &shared, RouterConfig::default()).unwrap();
    assert_eq!(published.len(), 1);
    assert!(Arc::ptr_eq(&published, &shared.load()));
    assert_eq!(handler_at(&shared, "GET", "/foo").as_deref(), Some("foo_one"));

    // a later publish does not change what an earlier reload handed back
    shared.publish(Router::new());
    assert_eq!(published.len(), 1);
    assert!(!Arc::ptr_eq(&published, &shared.load()));
    assert_eq!(handler_at(&shared, "GET", "/foo"), None);
}

#[test]
fn test_broken_manifest_keeps_previous_table() {
    let file = temp_manifest(MANIFEST_V1);
    let shared = SharedRouter::default();
    reload_manifest(file.path(), &shared, RouterConfig::default()).unwrap();

    std::fs::write(
        file.path(),
        "routes:\n  - method: GET\n    path: /foo/{a{b}}\n    handler: broken\n",
    )
    .unwrap();
    assert!(reload_manifest(file.path(), &shared, RouterConfig::default()).is_err());
    assert_eq!(handler_at(&shared, "GET", "/foo").as_deref(), Some("foo_one"));
}

#[test]
fn test_strict_conflicts_reject_reload() {
    let file = temp_manifest(
        r#"
routes:
  - { method: GET, path: "/users/{id}", handler: by_id }
  - { method: GET, path: "/users/{name}", handler: by_name }
"#,
    );
    let shared = SharedRouter::default();

    let lenient = RouterConfig::default();
    reload_manifest(file.path(), &shared, lenient).unwrap();
    assert_eq!(handler_at(&shared, "GET", "/users/1").as_deref(), Some("by_id"));

    let strict = RouterConfig {
        strict_conflicts: true,
        ..RouterConfig::default()
    };
    let empty = SharedRouter::default();
    assert!(reload_manifest(file.path(), &empty, strict).is_err());
    assert!(empty.load().is_empty());
}
