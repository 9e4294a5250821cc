//! crates/contract_openapi/src/registry.rs
//!
//! The append-only accumulator of normalized operations. A registry belongs
//! to one generation call; nothing about it is process-wide.

use crate::document::{render_document, DocumentMetadata, OperationMapper};
use crate::error::{ContractError, ContractResult};
use crate::normalize::RouteConfig;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;
use utoipa::openapi::path::Operation;
use utoipa::openapi::OpenApi;

static TEMPLATE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}/]*\}").expect("template parameter pattern is valid"));

/// `/items/{id}` and `/items/{itemId}` describe the same path.
fn template_key(path: &str) -> String {
    TEMPLATE_PARAM.replace_all(path, "{}").into_owned()
}

#[derive(Default)]
pub struct OpenApiRegistry {
    definitions: Vec<RouteConfig>,
    operation_mapper: Option<OperationMapper>,
}

impl OpenApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a hook that may rewrite each rendered operation.
    pub fn with_operation_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(Operation, &RouteConfig) -> Operation + Send + Sync + 'static,
    {
        self.operation_mapper = Some(std::sync::Arc::new(mapper));
        self
    }

    pub fn set_operation_mapper(&mut self, mapper: OperationMapper) {
        self.operation_mapper = Some(mapper);
    }

    /// Appends one operation.
    ///
    /// A second registration for the same path and method is rejected and
    /// leaves the registry untouched. Paths differing only in parameter
    /// names count as the same path.
    pub fn register_path(&mut self, route: RouteConfig) -> ContractResult<()> {
        let key = template_key(&route.path);
        if self
            .definitions
            .iter()
            .any(|r| r.method == route.method && template_key(&r.path) == key)
        {
            return Err(ContractError::DuplicateRoute {
                method: route.method.to_string(),
                path: route.path,
            });
        }
        debug!(method = %route.method, path = %route.path, "Registered path");
        self.definitions.push(route);
        Ok(())
    }

    /// Everything registered so far, in registration order.
    pub fn definitions(&self) -> &[RouteConfig] {
        &self.definitions
    }

    /// Renders every registered operation. The registry is not cleared.
    pub fn render(&self, metadata: &DocumentMetadata) -> OpenApi {
        render_document(&self.definitions, metadata, self.operation_mapper.as_ref())
    }
}

impl fmt::Debug for OpenApiRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenApiRegistry")
            .field("definitions", &self.definitions)
            .field("operation_mapper", &self.operation_mapper.is_some())
            .finish()
    }
}
