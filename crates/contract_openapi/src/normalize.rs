//! crates/contract_openapi/src/normalize.rs
//!
//! Converts one flattened route into the documentation-ready record that is
//! stored in the registry.

use crate::flatten::FlattenedPath;
use crate::operation_id::OperationIdMode;
use crate::responses::{build_responses, ResponseEntry};
use crate::route::HttpMethod;
use crate::schema::SchemaRef;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The only media type request and response bodies are documented with.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A JSON request body.
#[derive(Debug, Clone)]
pub struct RequestBodySpec {
    pub schema: SchemaRef,
    pub description: String,
    pub required: bool,
}

/// The request side of an operation.
#[derive(Debug, Clone, Default)]
pub struct RequestShape {
    pub body: Option<RequestBodySpec>,
    pub query: Option<SchemaRef>,
    pub headers: Option<SchemaRef>,
    pub params: Option<SchemaRef>,
}

/// A normalized path + operation record.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub method: HttpMethod,
    /// OpenAPI template form (`/signals/{eserviceId}`).
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub tags: Vec<String>,
    pub metadata: Map<String, Value>,
    pub request: RequestShape,
    pub responses: BTreeMap<u16, ResponseEntry>,
}

/// Normalizes one route.
pub fn normalize_route(path: &FlattenedPath<'_>, mode: OperationIdMode) -> RouteConfig {
    let route = path.route;

    // GET requests never document a body, whatever the definition says.
    let body = match route.method {
        HttpMethod::Get => None,
        _ => route.body.clone().map(|schema| RequestBodySpec {
            schema,
            description: String::new(),
            required: true,
        }),
    };

    RouteConfig {
        method: route.method,
        path: path.path.clone(),
        operation_id: mode.operation_id(path),
        summary: route.summary.clone(),
        description: route.description.clone(),
        deprecated: route.deprecated,
        tags: route.tags.clone(),
        metadata: route.metadata.clone(),
        request: RequestShape {
            body,
            query: route.query.clone(),
            headers: normalize_headers(route.headers.as_ref()),
            params: route.path_params.clone(),
        },
        responses: build_responses(&route.responses),
    }
}

/// A header schema without fields is the same as no header schema.
fn normalize_headers(headers: Option<&SchemaRef>) -> Option<SchemaRef> {
    headers.filter(|h| !h.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::route::{RouteDefinition, RouteTable};
    use crate::schema::OpenApiSchema;
    use std::sync::Arc;
    use utoipa::openapi::schema::{ObjectBuilder, Type};
    use utoipa::openapi::{RefOr, Schema};

    fn object(fields: &[&str]) -> OpenApiSchema {
        let builder = fields.iter().fold(ObjectBuilder::new(), |b, field| {
            b.property(*field, ObjectBuilder::new().schema_type(Type::String))
                .required(*field)
        });
        OpenApiSchema::new(RefOr::T(Schema::Object(builder.build())))
    }

    fn normalize_single(route: RouteDefinition, mode: OperationIdMode) -> RouteConfig {
        let table = RouteTable::new().route("op", route);
        let flat = flatten(&table);
        normalize_route(&flat[0], mode)
    }

    #[test]
    fn test_get_routes_never_have_a_body() {
        let config = normalize_single(
            RouteDefinition::get("/things").body(object(&["name"])),
            OperationIdMode::Off,
        );
        assert!(config.request.body.is_none());
    }

    #[test]
    fn test_non_get_body_is_required_with_empty_description() {
        for route in [
            RouteDefinition::post("/things"),
            RouteDefinition::put("/things"),
            RouteDefinition::patch("/things"),
            RouteDefinition::delete("/things"),
        ] {
            let config = normalize_single(route.body(object(&["name"])), OperationIdMode::Off);
            let body = config.request.body.expect("body should be documented");
            assert!(body.required);
            assert_eq!(body.description, "");
            assert_eq!(body.schema.shape().len(), 1);
        }
    }

    #[test]
    fn test_empty_headers_are_dropped() {
        let config = normalize_single(
            RouteDefinition::get("/things").headers(object(&[])),
            OperationIdMode::Off,
        );
        assert!(config.request.headers.is_none());

        let headers = object(&["authorization"]).into_ref();
        let config = normalize_single(
            RouteDefinition::get("/things").headers(headers.clone()),
            OperationIdMode::Off,
        );
        let kept = config.request.headers.expect("headers should be kept");
        assert!(Arc::ptr_eq(&kept, &headers));
    }

    #[test]
    fn test_query_and_params_pass_through() {
        let query = object(&["size"]).into_ref();
        let params = object(&["id"]).into_ref();
        let config = normalize_single(
            RouteDefinition::get("/things/:id")
                .query(query.clone())
                .path_params(params.clone()),
            OperationIdMode::BareId,
        );
        assert!(Arc::ptr_eq(config.request.query.as_ref().unwrap(), &query));
        assert!(Arc::ptr_eq(config.request.params.as_ref().unwrap(), &params));
        assert_eq!(config.path, "/things/{id}");
        assert_eq!(config.operation_id.as_deref(), Some("op"));
    }
}
