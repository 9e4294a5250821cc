//! crates/contract_openapi/src/flatten.rs
//!
//! Walks a (possibly nested) route table and yields one entry per leaf route,
//! depth-first and in declaration order.

use crate::route::{RouteDefinition, RouteNode, RouteTable};
use regex::Regex;
use std::sync::LazyLock;

static PATH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/:(\w+)").expect("path parameter pattern is valid"));

/// A leaf route located within the table.
#[derive(Debug, Clone)]
pub struct FlattenedPath<'a> {
    /// The route's own name.
    pub id: String,
    /// Namespace names leading to the route, outermost first.
    pub breadcrumb: Vec<String>,
    /// The route path in OpenAPI template form (`/signals/{eserviceId}`).
    pub path: String,
    pub route: &'a RouteDefinition,
}

/// Flattens `table` into its leaf routes. Duplicate ids are kept; detecting
/// them is the job of [`crate::operation_id::OperationIdIndex`].
pub fn flatten(table: &RouteTable) -> Vec<FlattenedPath<'_>> {
    let mut out = Vec::new();
    walk(table, &mut Vec::new(), &mut out);
    out
}

fn walk<'a>(table: &'a RouteTable, breadcrumb: &mut Vec<String>, out: &mut Vec<FlattenedPath<'a>>) {
    for (name, node) in table.entries() {
        match node {
            RouteNode::Route(route) => out.push(FlattenedPath {
                id: name.to_string(),
                breadcrumb: breadcrumb.clone(),
                path: to_openapi_path(&route.path),
                route,
            }),
            RouteNode::Router(nested) => {
                breadcrumb.push(name.to_string());
                walk(nested, breadcrumb, out);
                breadcrumb.pop();
            }
        }
    }
}

/// Rewrites express-style `:param` segments into `{param}`. A colon inside a
/// segment is left alone.
pub fn to_openapi_path(path: &str) -> String {
    PATH_PARAM.replace_all(path, "/{$1}").into_owned()
}
