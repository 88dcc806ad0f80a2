use super::build::build_routes;
use super::types::{RouteMeta, RouteTable};

/// Load a route table from a YAML or JSON file and compile it.
///
/// The file extension decides the format: `.yaml`/`.yml` is parsed with
/// serde_yaml, everything else as JSON.
pub fn load_routes(file_path: &str) -> anyhow::Result<Vec<RouteMeta>> {
    let content = std::fs::read_to_string(file_path)?;
    let table: RouteTable = if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(build_routes(&table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_deserializes_with_defaults() {
        let table: RouteTable = serde_json::from_value(json!({
            "/": [
                { "method": "get", "uri": "/", "controller": "home", "action": "index" }
            ]
        }))
        .expect("route table should deserialize");
        let routes = build_routes(&table).expect("table should compile");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].method, http::Method::GET);
        assert_eq!(routes[0].path_pattern, "/");
        assert!(!routes[0].is_public);
        assert!(routes[0].accept.is_empty());
        assert!(routes[0].middlewares.is_empty());
    }
}
