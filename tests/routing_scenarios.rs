//! End-to-end routing scenarios against YAML configurations.

use path_router::routing::{DelayTable, RouteTable};
use path_router::Router;

mod common;

#[test]
fn test_find_path() {
    let router = common::yaml_router(
        r#"
paths:
  /pb33f/test/**:
    target: /
    secure: false
    pathRewrite:
      '^/pb33f/test/': ''
"#,
    );

    assert_eq!(router.find_routes("/pb33f/test/123").len(), 1);
    assert_eq!(router.find_routes("/pb33f/test/123/sing/song").len(), 1);
    assert_eq!(router.find_routes("/pb33f/no-match/wrong").len(), 0);
}

#[test]
fn test_rewrite_path() {
    let router = common::yaml_router(
        r#"
paths:
  /pb33f/test/**:
    target: localhost:9093/
    secure: false
    pathRewrite:
      '^/pb33f/test/': ''
"#,
    );

    let outcome = router.route("/pb33f/test/123/slap/a/chap");
    assert!(outcome.matched());
    assert_eq!(outcome.url(), Some("http://localhost:9093/123/slap/a/chap"));
}

#[test]
fn test_rewrite_path_secure() {
    let router = common::yaml_router(
        r#"
paths:
  /pb33f/*/test/**:
    target: localhost:9093
    secure: true
    pathRewrite:
      '^/pb33f/(\w+)/test/': '/flat/jam/'
"#,
    );

    assert_eq!(
        router.route("/pb33f/cakes/test/123/smelly/jelly").url(),
        Some("https://localhost:9093/flat/jam/123/smelly/jelly")
    );
}

#[test]
fn test_rewrite_path_secure_with_variables() {
    let router = common::yaml_router(
        r#"
paths:
  /pb33f/*/test/*/321/**:
    target: localhost:9093
    secure: true
    pathRewrite:
      '^/pb33f/(\w+)/test/(\w+)/(\d+)/': '/slippy/$1/whip/$3/$2/'
"#,
    );

    assert_eq!(
        router.route("/pb33f/cakes/test/lemons/321/smelly/jelly").url(),
        Some("https://localhost:9093/slippy/cakes/whip/321/lemons/smelly/jelly")
    );
}

const BURGERD: &str = r#"
paths:
  /en-US/burgerd/__raw/*:
    target: localhost:80
    pathRewrite:
      '^/en-US/burgerd/__raw/(\w+)/nobody/': '$1/-/'
  /en-US/burgerd/services/*:
    target: locahost:80
    pathRewrite:
      '^/en-US/burgerd/services': '/services'
"#;

#[test]
fn test_rewrite_path_case_sensitive() {
    let router = common::yaml_router(BURGERD);

    assert_eq!(
        router.route("/en-US/burgerd/__raw/noKetchupPlease/nobody/").url(),
        Some("http://localhost:80/noKetchupPlease/-/")
    );
    assert!(!router.route("/en-us/burgerd/__raw/noKetchupPlease/nobody/").matched());
}

#[test]
fn test_rewrite_path_keeps_query() {
    let router = common::yaml_router(BURGERD);

    assert_eq!(
        router
            .route("/en-US/burgerd/__raw/noKetchupPlease/nobody/yummy/yum?onions=true")
            .url(),
        Some("http://localhost:80/noKetchupPlease/-/yummy/yum?onions=true")
    );
    assert_eq!(
        router.route("/en-US/burgerd/services/menu?size=xl").url(),
        Some("http://locahost:80/services/menu?size=xl")
    );
}

#[test]
fn test_locate_path_delay() {
    let router = common::yaml_router(
        r#"
pathDelays:
  /pb33f/test/**: 1000
  /pb33f/cakes/123: 2000
  /*/test/123: 3000
"#,
    );

    assert_eq!(router.find_delay("/pb33f/test/burgers/fries?1234=no"), 1000);
    assert_eq!(router.find_delay("/pb33f/cakes/123"), 2000);
    assert_eq!(router.find_delay("/roastbeef/test/123"), 3000);
    assert_eq!(router.find_delay("/not-registered"), 0);
}

#[test]
fn test_toml_matches_yaml() {
    let yaml = common::yaml_router(
        r#"
paths:
  /pb33f/*/test/**:
    target: localhost:9093
    secure: true
    pathRewrite:
      '^/pb33f/(\w+)/test/': '/flat/jam/'
pathDelays:
  /pb33f/**: 50
"#,
    );
    let toml_config = path_router::config::parse_config(
        r#"
[paths."/pb33f/*/test/**"]
target = "localhost:9093"
secure = true
pathRewrite = { '^/pb33f/(\w+)/test/' = "/flat/jam/" }

[pathDelays]
"/pb33f/**" = 50
"#,
        path_router::config::ConfigFormat::Toml,
    )
    .unwrap();
    let toml = Router::from_config(&toml_config).unwrap();

    for path in ["/pb33f/cakes/test/1", "/pb33f/x", "/nope"] {
        assert_eq!(yaml.route(path).into_url(), toml.route(path).into_url(), "{path}");
        assert_eq!(yaml.find_delay(path), toml.find_delay(path), "{path}");
    }
}

#[test]
fn test_compile_is_idempotent() {
    let config = common::yaml_config(BURGERD);
    let first = Router::from_config(&config).unwrap();
    let second = Router::from_config(&config).unwrap();

    let paths = [
        "/en-US/burgerd/__raw/a/nobody/b",
        "/en-US/burgerd/services/x",
        "/en-US/other",
        "",
    ];
    for path in paths {
        assert_eq!(first.route(path).into_url(), second.route(path).into_url());
        assert_eq!(first.find_delay(path), second.find_delay(path));
    }

    let routes = RouteTable::compile(&config.paths).unwrap();
    let delays = DelayTable::compile(&config.path_delays).unwrap();
    let rebuilt = Router::new(routes, delays);
    for path in paths {
        assert_eq!(first.route(path).into_url(), rebuilt.route(path).into_url());
    }
}

#[test]
fn test_selection_is_deterministic_with_overlap() {
    let router = common::yaml_router(
        r#"
paths:
  /api/**:
    target: first:80
  /api/v1/**:
    target: second:80
  /**:
    target: third:80
pathDelays:
  /api/**: 10
  /api/v1/**: 20
"#,
    );

    for _ in 0..100 {
        assert_eq!(router.route("/api/v1/users").url(), Some("http://first:80/api/v1/users"));
        assert_eq!(router.find_delay("/api/v1/users"), 10);
    }
    let targets: Vec<_> = router
        .find_routes("/api/v1/users")
        .into_iter()
        .map(|r| r.target())
        .collect();
    assert_eq!(targets, vec!["first:80", "second:80", "third:80"]);
}

#[test]
fn test_route_without_matching_rewrite_is_forwarded_unchanged() {
    let router = common::yaml_router(
        r#"
paths:
  /assets/**:
    target: cdn.local
    pathRewrite:
      '^/api/': '/'
"#,
    );
    assert_eq!(
        router.route("/assets/app.js?v=3").url(),
        Some("http://cdn.local/assets/app.js?v=3")
    );
}

#[test]
fn test_invalid_rewrite_fails_compile_with_context() {
    let config = common::yaml_config(
        r#"
paths:
  /good/**:
    target: good:80
  /bad/**:
    target: bad:80
    pathRewrite:
      '^/bad/(\d+': '/'
"#,
    );

    let err = Router::from_config(&config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/bad/**"), "{message}");
    assert!(message.contains(r"^/bad/(\d+"), "{message}");
}
