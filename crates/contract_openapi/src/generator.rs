//! crates/contract_openapi/src/generator.rs
//!
//! Entry points tying the stages together:
//! route table → flatten → operation-id guard → normalize → registry → document.

use crate::document::{DocumentMetadata, OperationMapper};
use crate::error::ContractResult;
use crate::flatten::flatten;
use crate::normalize::{normalize_route, RouteConfig};
use crate::operation_id::{OperationIdIndex, OperationIdMode};
use crate::registry::OpenApiRegistry;
use crate::route::RouteTable;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::openapi::path::Operation;
use utoipa::openapi::OpenApi;

/// Options controlling how a route table is turned into operations.
#[derive(Clone, Default)]
pub struct GeneratorOptions {
    pub operation_id: OperationIdMode,
    pub operation_mapper: Option<OperationMapper>,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation_id(mut self, mode: OperationIdMode) -> Self {
        self.operation_id = mode;
        self
    }

    pub fn operation_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(Operation, &RouteConfig) -> Operation + Send + Sync + 'static,
    {
        self.operation_mapper = Some(Arc::new(mapper));
        self
    }
}

/// Registers every route of `table` into `registry`.
///
/// Stops at the first duplicate operation id when ids are enforced; routes
/// before it stay registered.
pub fn generate_component_from_contract(
    table: &RouteTable,
    options: &GeneratorOptions,
    registry: &mut OpenApiRegistry,
) -> ContractResult<()> {
    let paths = flatten(table);
    let mut operation_ids = OperationIdIndex::new();

    for path in &paths {
        if options.operation_id.enforces_uniqueness() {
            operation_ids.check(path)?;
        }
        let route = normalize_route(path, options.operation_id);
        debug!(
            id = %path.id,
            has_body = route.request.body.is_some(),
            "Normalized route"
        );
        registry.register_path(route)?;
    }

    if let Some(mapper) = &options.operation_mapper {
        registry.set_operation_mapper(mapper.clone());
    }
    Ok(())
}

/// Generates a document from `table` using a registry private to this call.
pub fn generate_open_api(
    table: &RouteTable,
    metadata: &DocumentMetadata,
    options: &GeneratorOptions,
) -> ContractResult<OpenApi> {
    let mut registry = OpenApiRegistry::new();
    generate_component_from_contract(table, options, &mut registry)?;
    let document = registry.render(metadata);
    info!(
        title = %metadata.title,
        version = %metadata.version,
        operations = registry.definitions().len(),
        "Generated OpenAPI document"
    );
    Ok(document)
}
