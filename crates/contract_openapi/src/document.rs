//! crates/contract_openapi/src/document.rs
//!
//! Renders registered operations into an OpenAPI document and persists it.
//!
//! Object-shaped path, query and header schemas are expanded into one
//! parameter per field. Schemas carrying a component name are published in
//! `components.schemas` and referenced with `$ref` everywhere they are used.

use crate::error::ContractResult;
use crate::normalize::{RouteConfig, JSON_CONTENT_TYPE};
use crate::route::HttpMethod;
use crate::schema::{SchemaField, SchemaRef};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use utoipa::openapi::content::{Content, ContentBuilder};
use utoipa::openapi::info::{Contact, InfoBuilder, License};
use utoipa::openapi::path::{
    Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItem, PathsBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ComponentsBuilder, Ref, Schema};
use utoipa::openapi::security::SecurityScheme;
use utoipa::openapi::server::Server;
use utoipa::openapi::{Deprecated, OpenApi, OpenApiBuilder, RefOr, Required};

/// A caller hook applied to every rendered operation.
pub type OperationMapper = Arc<dyn Fn(Operation, &RouteConfig) -> Operation + Send + Sync>;

//=========================================================================================
// Document metadata
//=========================================================================================

/// Top-level document information, copied into the output verbatim.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub servers: Vec<Server>,
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn terms_of_service(mut self, terms: impl Into<String>) -> Self {
        self.terms_of_service = Some(terms.into());
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    pub fn license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }

    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn security_scheme(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.into(), scheme);
        self
    }
}

//=========================================================================================
// Rendering
//=========================================================================================

/// Renders `routes` into one document, grouped by path then method.
pub fn render_document(
    routes: &[RouteConfig],
    metadata: &DocumentMetadata,
    mapper: Option<&OperationMapper>,
) -> OpenApi {
    let mut schemas: BTreeMap<String, RefOr<Schema>> = BTreeMap::new();
    let mut items: BTreeMap<String, PathItem> = BTreeMap::new();

    for route in routes {
        let mut operation = build_operation(route, &mut schemas);
        if let Some(mapper) = mapper {
            operation = mapper(operation, route);
        }
        let item = items.entry(route.path.clone()).or_default();
        match route.method {
            HttpMethod::Get => item.get = Some(operation),
            HttpMethod::Post => item.post = Some(operation),
            HttpMethod::Put => item.put = Some(operation),
            HttpMethod::Delete => item.delete = Some(operation),
            HttpMethod::Patch => item.patch = Some(operation),
        }
    }

    let paths = items
        .into_iter()
        .fold(PathsBuilder::new(), |paths, (path, item)| paths.path(path, item))
        .build();

    let components = if schemas.is_empty() && metadata.security_schemes.is_empty() {
        None
    } else {
        let mut builder = ComponentsBuilder::new();
        for (name, schema) in schemas {
            builder = builder.schema(name, schema);
        }
        for (name, scheme) in &metadata.security_schemes {
            builder = builder.security_scheme(name.clone(), scheme.clone());
        }
        Some(builder.build())
    };

    let info = InfoBuilder::new()
        .title(metadata.title.clone())
        .version(metadata.version.clone())
        .description(metadata.description.clone())
        .terms_of_service(metadata.terms_of_service.clone())
        .contact(metadata.contact.clone())
        .license(metadata.license.clone())
        .build();

    let servers = (!metadata.servers.is_empty()).then(|| metadata.servers.clone());

    OpenApiBuilder::new()
        .info(info)
        .servers(servers)
        .paths(paths)
        .components(components)
        .build()
}

fn build_operation(route: &RouteConfig, schemas: &mut BTreeMap<String, RefOr<Schema>>) -> Operation {
    let mut builder = OperationBuilder::new()
        .operation_id(route.operation_id.clone())
        .summary(route.summary.clone())
        .description(route.description.clone());
    if route.deprecated {
        builder = builder.deprecated(Some(Deprecated::True));
    }
    for tag in &route.tags {
        builder = builder.tag(tag.clone());
    }

    let request = &route.request;
    let locations = [
        (ParameterIn::Path, &request.params),
        (ParameterIn::Query, &request.query),
        (ParameterIn::Header, &request.headers),
    ];
    for (location, schema) in locations {
        let Some(schema) = schema else { continue };
        collect_components(schema, schemas);
        for field in schema.shape() {
            builder = builder.parameter(build_parameter(field, location.clone()));
        }
    }

    if let Some(body) = &request.body {
        let required = if body.required { Required::True } else { Required::False };
        let request_body = RequestBodyBuilder::new()
            .description(Some(body.description.clone()))
            .content(JSON_CONTENT_TYPE, json_content(&body.schema, schemas))
            .required(Some(required))
            .build();
        builder = builder.request_body(Some(request_body));
    }

    for (status, entry) in &route.responses {
        let mut response = ResponseBuilder::new().description(entry.description.clone());
        if let Some(schema) = &entry.content {
            response = response.content(JSON_CONTENT_TYPE, json_content(schema, schemas));
        }
        builder = builder.response(status.to_string(), RefOr::T(response.build()));
    }

    builder.build()
}

fn build_parameter(field: SchemaField, location: ParameterIn) -> Parameter {
    // Path parameters are always required by OpenAPI.
    let required = if field.required || matches!(location, ParameterIn::Path) {
        Required::True
    } else {
        Required::False
    };
    ParameterBuilder::new()
        .name(field.name)
        .parameter_in(location)
        .required(required)
        .description(field.description)
        .schema(Some(field.schema))
        .build()
}

fn json_content(schema: &SchemaRef, schemas: &mut BTreeMap<String, RefOr<Schema>>) -> Content {
    collect_components(schema, schemas);
    let schema = match schema.component_name() {
        Some(name) => {
            schemas
                .entry(name.to_string())
                .or_insert_with(|| schema.to_openapi());
            RefOr::Ref(Ref::from_schema_name(name))
        }
        None => schema.to_openapi(),
    };
    ContentBuilder::new().schema(Some(schema)).build()
}

// First registration of a component name wins.
fn collect_components(schema: &SchemaRef, schemas: &mut BTreeMap<String, RefOr<Schema>>) {
    for (name, dependency) in schema.components() {
        schemas.entry(name).or_insert(dependency);
    }
}

//=========================================================================================
// Persistence
//=========================================================================================

/// Serializes the document to YAML.
pub fn to_yaml(document: &OpenApi) -> ContractResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// File name a document is persisted under: `<name>_<version>_.yaml`.
pub fn documentation_file_name(name: &str, document: &OpenApi) -> String {
    format!("{}_{}_.yaml", name, document.info.version)
}

/// Writes the document as YAML into `dir`, replacing any previous file of the
/// same name, and returns the written path.
pub fn write_documentation(document: &OpenApi, dir: &Path, name: &str) -> ContractResult<PathBuf> {
    let path = dir.join(documentation_file_name(name, document));
    std::fs::write(&path, to_yaml(document)?)?;
    info!("OpenAPI document written to {}", path.display());
    Ok(path)
}
