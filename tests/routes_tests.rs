//! Tests for route-table compilation and loading: method normalization,
//! prefix joining, structural defaults, and the YAML/JSON loaders.

use routeflow::{build_routes, load_routes, RouteTable, RouteTableError};
use serde_json::json;
use std::io::Write;

fn table(value: serde_json::Value) -> RouteTable {
    serde_json::from_value(value).expect("valid route table")
}

#[test]
fn test_method_case_normalized_at_registration() {
    let routes = build_routes(&table(json!({
        "/": [
            { "method": "post", "uri": "/items", "controller": "items", "action": "create" }
        ]
    })))
    .unwrap();
    assert_eq!(routes[0].method, http::Method::POST);
}

#[test]
fn test_invalid_method_rejected() {
    let err = build_routes(&table(json!({
        "/": [
            { "method": "B@D", "uri": "/items", "controller": "items", "action": "create" }
        ]
    })))
    .unwrap_err();
    assert!(matches!(err, RouteTableError::InvalidMethod { method, .. } if method == "B@D"));
}

#[test]
fn test_group_prefix_joined_once() {
    let routes = build_routes(&table(json!({
        "/admin": [
            { "method": "GET", "uri": "/users", "controller": "admin", "action": "users" }
        ]
    })))
    .unwrap();
    assert_eq!(routes[0].path_pattern, "/admin/users");
}

#[test]
fn test_root_prefix_not_duplicated() {
    let routes = build_routes(&table(json!({
        "/": [
            { "method": "GET", "uri": "/login", "controller": "auth", "action": "login" }
        ]
    })))
    .unwrap();
    assert_eq!(routes[0].path_pattern, "/login");
}

#[test]
fn test_missing_controller_rejected() {
    let err = build_routes(&table(json!({
        "/": [
            { "method": "GET", "uri": "/x", "controller": "", "action": "a" }
        ]
    })))
    .unwrap_err();
    assert!(matches!(err, RouteTableError::MissingController { .. }));
}

#[test]
fn test_validations_preserve_rule_order() {
    let routes = build_routes(&table(json!({
        "/": [
            {
                "method": "POST", "uri": "/items", "controller": "items", "action": "create",
                "accept": ["name"],
                "validations": {
                    "name": [
                        { "validator": "required", "message": "Name is required" },
                        { "validator": "min_length", "params": { "min": 3 },
                          "message": "At least {{min}} chars" }
                    ]
                }
            }
        ]
    })))
    .unwrap();
    let rules = routes[0].rules_for("name").unwrap();
    assert_eq!(rules[0].validator, "required");
    assert_eq!(rules[1].validator, "min_length");
    assert_eq!(rules[1].params.get("min"), Some(&json!(3)));
}

#[test]
fn test_load_routes_yaml() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    writeln!(
        file,
        r#"
"/":
  - method: GET
    uri: /pets/{{id}}
    controller: pets
    action: show
    is_public: true
"/admin":
  - method: POST
    uri: /settings
    controller: admin
    action: update
    middlewares: [auth]
"#
    )
    .unwrap();

    let routes = load_routes(file.path().to_str().unwrap()).unwrap();
    assert_eq!(routes.len(), 2);
    let pet = routes.iter().find(|r| r.controller == "pets").unwrap();
    assert_eq!(pet.path_pattern, "/pets/{id}");
    assert!(pet.is_public);
    let admin = routes.iter().find(|r| r.controller == "admin").unwrap();
    assert_eq!(admin.path_pattern, "/admin/settings");
    assert_eq!(admin.middlewares, vec!["auth".to_string()]);
}

#[test]
fn test_load_routes_json() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        file,
        r#"{{ "/": [ {{ "method": "GET", "uri": "/", "controller": "home", "action": "index" }} ] }}"#
    )
    .unwrap();

    let routes = load_routes(file.path().to_str().unwrap()).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].path_pattern, "/");
}
