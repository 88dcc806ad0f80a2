use super::types::{FieldRules, RouteDef, RouteMeta, RouteTable};
use crate::error::RouteTableError;
use http::Method;
use tracing::info;

/// Compile a declarative route table into immutable route metadata.
///
/// Methods are case-normalized to uppercase and parsed into [`Method`] here,
/// so an unparseable method is rejected at construction time rather than at
/// dispatch time. The group prefix is concatenated with each member path
/// exactly once; the `"/"` prefix is not duplicated.
pub fn build_routes(table: &RouteTable) -> Result<Vec<RouteMeta>, RouteTableError> {
    let mut routes = Vec::new();
    for (prefix, defs) in table {
        for def in defs {
            routes.push(build_route(prefix, def)?);
        }
    }
    info!(routes_count = routes.len(), "Route table compiled");
    Ok(routes)
}

fn build_route(prefix: &str, def: &RouteDef) -> Result<RouteMeta, RouteTableError> {
    let method = Method::from_bytes(def.method.to_ascii_uppercase().as_bytes()).map_err(|_| {
        RouteTableError::InvalidMethod {
            method: def.method.clone(),
            uri: def.uri.clone(),
        }
    })?;
    if def.controller.is_empty() {
        return Err(RouteTableError::MissingController {
            uri: def.uri.clone(),
        });
    }
    if def.action.is_empty() {
        return Err(RouteTableError::MissingAction {
            uri: def.uri.clone(),
        });
    }

    let validations = def
        .validations
        .iter()
        .map(|(field, rules)| FieldRules {
            field: field.clone(),
            rules: rules.clone(),
        })
        .collect();

    Ok(RouteMeta {
        method,
        path_pattern: join_prefix(prefix, &def.uri),
        controller: def.controller.clone(),
        action: def.action.clone(),
        is_public: def.is_public,
        template: def.template.clone(),
        accept: def.accept.clone(),
        validations,
        middlewares: def.middlewares.clone(),
    })
}

/// Join a group prefix with a member path. `"/"` is a special case: it is
/// not duplicated in front of the member path.
fn join_prefix(prefix: &str, uri: &str) -> String {
    let full = if prefix == "/" {
        uri.to_string()
    } else {
        format!("{prefix}{uri}")
    };
    if full.is_empty() {
        "/".to_string()
    } else {
        full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_prefix_not_duplicated() {
        assert_eq!(join_prefix("/", "/login"), "/login");
        assert_eq!(join_prefix("/", ""), "/");
        assert_eq!(join_prefix("/admin", "/users"), "/admin/users");
    }
}
