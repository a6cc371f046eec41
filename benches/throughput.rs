use criterion::{criterion_group, criterion_main, Criterion};
use routematch::manifest::RouteManifest;
use routematch::router::Router;
use routematch::runtime_config::RouterConfig;
use std::hint::black_box;

fn verb_zoo() -> &'static str {
    r#"
routes:
  - { method: GET, path: /, handler: root_handler }
  - { method: GET, path: /zoo/animals, handler: get_animals }
  - { method: POST, path: /zoo/animals, handler: create_animal }
  - { method: GET, path: /zoo/animals/{id}, handler: get_animal }
  - { method: PUT, path: /zoo/animals/{id}, handler: update_animal }
  - { method: PATCH, path: /zoo/animals/{id}, handler: patch_animal }
  - { method: DELETE, path: /zoo/animals/{id}, handler: delete_animal }
  - { method: GET, path: "/zoo/animals/{id}/toys/{toy_id}", handler: animal_toy }
  - method: GET
    path: "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}"
    handler: habitat_section
  - method: POST
    path: "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}"
    handler: post_item_batch
  - method: GET
    path: "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}"
    handler: complex_many_params
  - { methods: [HEAD, OPTIONS, TRACE], path: /zoo/health, handler: health_check }
"#
}

fn zoo_router() -> Router {
    RouteManifest::from_yaml_str(verb_zoo())
        .and_then(|m| m.build_router(RouterConfig::default()))
        .expect("failed to build router")
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = zoo_router();
    c.bench_function("route_match", |b| {
        let test_paths = [
            ("GET", "/zoo/animals/123"),
            ("GET", "/zoo/animals/123/toys/456"),
            ("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
            ("POST", "/inventory/1/feeds/2/items/3/batches/4"),
            ("GET", "/complex/1/2/3/4/5/6/7/8/9"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.match_route(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_miss_paths(c: &mut Criterion) {
    let router = zoo_router();
    c.bench_function("route_miss", |b| {
        let test_paths = [
            ("DELETE", "/zoo/animals"),
            ("GET", "/zoo/animals/123/toys"),
            ("GET", "/aquarium/fish"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                black_box(router.match_route(method, path));
            }
        })
    });
}

fn bench_large_table(c: &mut Criterion) {
    let mut router = Router::new();
    for i in 0..1000 {
        router
            .get(&format!("/api/v1/resource{i}/{{id}}"), format!("handler_{i}"))
            .expect("valid pattern");
    }
    c.bench_function("route_match_1000_routes", |b| {
        b.iter(|| black_box(router.match_route("GET", black_box("/api/v1/resource999/42"))))
    });
}

criterion_group!(benches, bench_route_throughput, bench_miss_paths, bench_large_table);
criterion_main!(benches);
