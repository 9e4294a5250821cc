//! crates/contract_openapi/src/lib.rs
//!
//! Turns a declarative table of HTTP route definitions into an OpenAPI
//! document.

pub mod document;
pub mod error;
pub mod flatten;
pub mod generator;
pub mod normalize;
pub mod operation_id;
pub mod registry;
pub mod responses;
pub mod route;
pub mod schema;

pub use document::{
    documentation_file_name, render_document, to_yaml, write_documentation, DocumentMetadata,
    OperationMapper,
};
pub use error::{ContractError, ContractResult};
pub use flatten::{flatten, to_openapi_path, FlattenedPath};
pub use generator::{generate_component_from_contract, generate_open_api, GeneratorOptions};
pub use normalize::{normalize_route, RequestBodySpec, RequestShape, RouteConfig, JSON_CONTENT_TYPE};
pub use operation_id::{OperationIdIndex, OperationIdMode};
pub use registry::OpenApiRegistry;
pub use responses::{build_responses, ResponseEntry};
pub use route::{HttpMethod, RouteDefinition, RouteNode, RouteTable};
pub use schema::{ContractSchema, OpenApiSchema, SchemaField, SchemaRef};
