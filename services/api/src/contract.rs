//! services/api/src/contract.rs
//!
//! The pull-signal REST contract: payload types, the route table that
//! describes every endpoint, and the metadata of the generated document.

use contract_openapi::{
    generate_open_api, ContractResult, DocumentMetadata, GeneratorOptions, OpenApiSchema,
    OperationIdMode, RouteConfig, RouteDefinition, RouteTable,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::openapi::path::Operation;
use utoipa::openapi::schema::{ObjectBuilder, Type};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::openapi::{OpenApi, RefOr, Schema};
use utoipa::ToSchema;

pub const API_TITLE: &str = "Pull-signal";
pub const API_VERSION: &str = "0.1.1";
pub const BEARER_AUTH: &str = "bearerAuth";

pub const STATUS_PATH: &str = "/status";
pub const SIGNALS_PATH: &str = "/signals";
pub const PULL_SIGNALS_PATH: &str = "/signals/:eserviceId";

pub const MAX_PAGE_SIZE: i64 = 100;

//=========================================================================================
// Payloads
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Create,
    Update,
    Delete,
    SeedUpdate,
}

/// A change notification about an object published by an e-service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub signal_type: SignalType,
    pub object_id: String,
    pub eservice_id: String,
    pub signal_id: i64,
    pub object_type: String,
}

/// The identifier assigned to a pushed signal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalPushResponse {
    pub signal_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalPullResponse {
    pub signals: Vec<Signal>,
    pub last_signal_id: Option<i64>,
}

// Error body shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub status: u16,
    pub title: String,
    pub correlation_id: Option<String>,
    pub detail: String,
    pub errors: Vec<ProblemError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProblemError {
    pub code: String,
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuthHeaders {
    pub authorization: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EserviceParams {
    pub eservice_id: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PullQuery {
    #[serde(default)]
    #[schema(minimum = 0, default = 0)]
    pub signal_id: i64,
    #[serde(default = "default_page_size")]
    #[schema(minimum = 1, maximum = 100, default = 10)]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

impl PullQuery {
    /// Checks the bounds the query schema documents.
    pub fn validate(&self) -> Result<(), String> {
        if self.signal_id < 0 {
            return Err(format!("signalId must be >= 0, got {}", self.signal_id));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.size) {
            return Err(format!(
                "size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.size
            ));
        }
        Ok(())
    }
}

//=========================================================================================
// Route table
//=========================================================================================

/// The literal `"OK"` returned by the health check.
fn ok_literal() -> OpenApiSchema {
    OpenApiSchema::new(RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(["OK"]))
            .build(),
    )))
}

pub fn contract() -> RouteTable {
    let problem = OpenApiSchema::component::<Problem>().into_ref();

    RouteTable::new()
        .route(
            "getStatus",
            RouteDefinition::get(STATUS_PATH)
                .summary("Health status endpoint")
                .description("Should return OK")
                .response(200, ok_literal()),
        )
        .route(
            "pushSignal",
            RouteDefinition::post(SIGNALS_PATH)
                .summary("Push Signal")
                .description("Insert a signal")
                .headers(OpenApiSchema::inline::<AuthHeaders>())
                .metadata("auth", true)
                .metadata("role", "user")
                .body(OpenApiSchema::inline::<Signal>())
                .response(200, OpenApiSchema::component::<SignalPushResponse>())
                .response(400, problem.clone())
                .response(401, problem.clone())
                .response(403, problem.clone())
                .response(500, problem),
        )
        .route(
            "pullSignal",
            RouteDefinition::get(PULL_SIGNALS_PATH)
                .summary("Get a list of signals")
                .description(
                    "Retrieve a list of signals on a specific eservice starting from signalId",
                )
                .path_params(OpenApiSchema::inline::<EserviceParams>())
                .headers(OpenApiSchema::inline::<AuthHeaders>())
                .query(OpenApiSchema::inline::<PullQuery>())
                .response(200, OpenApiSchema::component::<SignalPullResponse>())
                .response(206, OpenApiSchema::inline::<SignalPullResponse>()),
        )
}

//=========================================================================================
// Document
//=========================================================================================

pub fn document_metadata() -> DocumentMetadata {
    let bearer = HttpBuilder::new()
        .scheme(HttpAuthScheme::Bearer)
        .bearer_format("JWT")
        .description(Some(
            "A bearer token in the format of a JWS and conformed to the specifications included in [RFC8725](https://tools.ietf.org/html/RFC8725).",
        ))
        .build();

    DocumentMetadata::new(API_TITLE, API_VERSION)
        .description("Push and pull signals about e-service objects")
        .server(Server::new("v1"))
        .security_scheme(BEARER_AUTH, SecurityScheme::Http(bearer))
}

pub fn generator_options() -> GeneratorOptions {
    GeneratorOptions::new()
        .operation_id(OperationIdMode::BareId)
        .operation_mapper(require_bearer_auth)
}

/// Routes flagged with `auth: true` in their metadata require the bearer scheme.
fn require_bearer_auth(mut operation: Operation, route: &RouteConfig) -> Operation {
    if route.metadata.get("auth").and_then(Value::as_bool) == Some(true) {
        operation.security = Some(vec![SecurityRequirement::new(
            BEARER_AUTH,
            Vec::<String>::new(),
        )]);
    }
    operation
}

/// Generates the OpenAPI document of the contract.
pub fn openapi() -> ContractResult<OpenApi> {
    generate_open_api(&contract(), &document_metadata(), &generator_options())
}
