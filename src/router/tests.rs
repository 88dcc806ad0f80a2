use super::{MatchOutcome, Router};
use crate::routes::{build_routes, RouteTable};
use http::Method;
use serde_json::json;

fn table(value: serde_json::Value) -> Vec<crate::routes::RouteMeta> {
    let table: RouteTable = serde_json::from_value(value).expect("valid table");
    build_routes(&table).expect("table compiles")
}

#[test]
fn test_path_to_regex_extracts_params() {
    let (regex, params) = Router::path_to_regex("/users/{id}/posts/{post}");
    assert_eq!(
        params.iter().map(|p| p.as_ref()).collect::<Vec<_>>(),
        vec!["id", "post"]
    );
    assert!(regex.is_match("/users/42/posts/7"));
    assert!(!regex.is_match("/users/42/posts"));
}

#[test]
fn test_root_path_matches_exactly() {
    let (regex, params) = Router::path_to_regex("/");
    assert!(params.is_empty());
    assert!(regex.is_match("/"));
    assert!(!regex.is_match("/x"));
}

#[test]
fn test_route_found_with_params() {
    let router = Router::new(table(json!({
        "/": [
            { "method": "GET", "uri": "/users/{id}", "controller": "users", "action": "show" }
        ]
    })));
    match router.route(&Method::GET, "/users/42") {
        MatchOutcome::Found(m) => {
            assert_eq!(m.get_path_param("id"), Some("42"));
            assert_eq!(m.route.controller, "users");
        }
        other => panic!("expected Found, got {other:?}"),
    }
}

#[test]
fn test_route_not_found() {
    let router = Router::new(table(json!({
        "/": [
            { "method": "GET", "uri": "/users", "controller": "users", "action": "index" }
        ]
    })));
    assert!(matches!(
        router.route(&Method::GET, "/nope"),
        MatchOutcome::NotFound
    ));
}

#[test]
fn test_method_not_allowed_collects_methods() {
    let router = Router::new(table(json!({
        "/": [
            { "method": "POST", "uri": "/items", "controller": "items", "action": "create" },
            { "method": "PUT", "uri": "/items", "controller": "items", "action": "replace" }
        ]
    })));
    match router.route(&Method::GET, "/items") {
        MatchOutcome::MethodNotAllowed { allowed } => {
            assert_eq!(allowed, vec![Method::POST, Method::PUT]);
        }
        other => panic!("expected MethodNotAllowed, got {other:?}"),
    }
}

#[test]
fn test_declaration_order_wins() {
    let router = Router::new(table(json!({
        "/": [
            { "method": "GET", "uri": "/pets/{id}", "controller": "pets", "action": "show" },
            { "method": "GET", "uri": "/pets/{name}", "controller": "pets", "action": "by_name" }
        ]
    })));
    match router.route(&Method::GET, "/pets/rex") {
        MatchOutcome::Found(m) => assert_eq!(m.route.action, "show"),
        other => panic!("expected Found, got {other:?}"),
    }
}

#[test]
fn test_duplicate_param_names_last_write_wins() {
    let router = Router::new(table(json!({
        "/": [
            { "method": "GET", "uri": "/org/{id}/user/{id}", "controller": "orgs", "action": "user" }
        ]
    })));
    match router.route(&Method::GET, "/org/1/user/2") {
        MatchOutcome::Found(m) => assert_eq!(m.get_path_param("id"), Some("2")),
        other => panic!("expected Found, got {other:?}"),
    }
}
