//! crates/contract_openapi/src/route.rs
//!
//! The declarative route table: one `RouteDefinition` per REST operation,
//! arranged in a tree of named namespaces. Built once at startup and only
//! read afterwards.

use crate::schema::SchemaRef;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// HTTP method of a route definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// RouteDefinition
//=========================================================================================

/// Declarative description of one HTTP operation.
///
/// `path` uses express-style placeholders (`/signals/:eserviceId`); the
/// parameter names are expected to match the fields of `path_params`.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub tags: Vec<String>,
    pub path_params: Option<SchemaRef>,
    pub query: Option<SchemaRef>,
    pub headers: Option<SchemaRef>,
    /// Only meaningful for non-GET methods.
    pub body: Option<SchemaRef>,
    /// Status code to response schema. `None` means the response has no body.
    pub responses: BTreeMap<u16, Option<SchemaRef>>,
    pub metadata: Map<String, Value>,
}

impl RouteDefinition {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: None,
            deprecated: false,
            tags: Vec::new(),
            path_params: None,
            query: None,
            headers: None,
            body: None,
            responses: BTreeMap::new(),
            metadata: Map::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn path_params(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.path_params = Some(schema.into());
        self
    }

    pub fn query(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.query = Some(schema.into());
        self
    }

    pub fn headers(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.headers = Some(schema.into());
        self
    }

    pub fn body(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.body = Some(schema.into());
        self
    }

    /// Declares a response with a JSON body.
    pub fn response(mut self, status: u16, schema: impl Into<SchemaRef>) -> Self {
        self.responses.insert(status, Some(schema.into()));
        self
    }

    /// Declares a response without a body.
    pub fn no_body_response(mut self, status: u16) -> Self {
        self.responses.insert(status, None);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

//=========================================================================================
// RouteTable
//=========================================================================================

/// A node of the route table: either an operation or a nested namespace.
#[derive(Debug, Clone)]
pub enum RouteNode {
    Route(RouteDefinition),
    Router(RouteTable),
}

/// An ordered tree of named route definitions.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(String, RouteNode)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route under `name`.
    pub fn route(self, name: impl Into<String>, route: RouteDefinition) -> Self {
        self.insert(name.into(), RouteNode::Route(route))
    }

    /// Nests a whole table under the namespace `name`.
    pub fn nest(self, name: impl Into<String>, table: RouteTable) -> Self {
        self.insert(name.into(), RouteNode::Router(table))
    }

    // Re-declaring a name replaces the node but keeps its original position.
    fn insert(mut self, name: String, node: RouteNode) -> Self {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((name, node)),
        }
        self
    }

    /// Entries of this level, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RouteNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn get(&self, name: &str) -> Option<&RouteNode> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_declaration_order() {
        let table = RouteTable::new()
            .route("b", RouteDefinition::get("/b"))
            .route("a", RouteDefinition::get("/a"));
        let names: Vec<&str> = table.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_redeclared_name_replaces_in_place() {
        let table = RouteTable::new()
            .route("first", RouteDefinition::get("/old"))
            .route("second", RouteDefinition::get("/second"))
            .route("first", RouteDefinition::post("/new"));

        let names: Vec<&str> = table.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first", "second"]);
        match table.get("first") {
            Some(RouteNode::Route(route)) => {
                assert_eq!(route.method, HttpMethod::Post);
                assert_eq!(route.path, "/new");
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn test_route_builder_collects_responses_and_metadata() {
        let route = RouteDefinition::delete("/items/:id")
            .summary("Delete an item")
            .no_body_response(204)
            .metadata("auth", true);

        assert_eq!(route.method.to_string(), "DELETE");
        assert_eq!(route.summary.as_deref(), Some("Delete an item"));
        assert!(matches!(route.responses.get(&204), Some(None)));
        assert_eq!(route.metadata.get("auth"), Some(&Value::Bool(true)));
    }
}
