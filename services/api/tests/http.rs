use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use signals_api::{
    config::Config,
    contract::{self, Problem},
    web::{create_app, OPENAPI_JSON_PATH},
};

fn server() -> TestServer {
    let config = Config::from_vars(|_| None).unwrap();
    let app = create_app(&config, contract::openapi().unwrap());
    TestServer::new(app).unwrap()
}

fn bearer() -> HeaderValue {
    HeaderValue::from_static("Bearer token")
}

fn signal() -> Value {
    json!({
        "signalType": "CREATE",
        "objectId": "object-1",
        "eserviceId": "eservice-1",
        "signalId": 7,
        "objectType": "ESERVICE"
    })
}

#[tokio::test]
async fn test_status_endpoint() {
    let response = server().get("/status").await;

    response.assert_status_ok();
    response.assert_json(&json!("OK"));
}

#[tokio::test]
async fn test_push_signal_requires_authorization() {
    let response = server().post("/signals").json(&signal()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let problem: Problem = response.json();
    assert_eq!(problem.status, 401);
    assert_eq!(problem.errors[0].code, "unauthorized");
    assert!(problem.correlation_id.is_some());
}

#[tokio::test]
async fn test_push_signal_acknowledges_the_signal_id() {
    let response = server()
        .post("/signals")
        .add_header(AUTHORIZATION, bearer())
        .json(&signal())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "signalId": 7 }));
}

#[tokio::test]
async fn test_push_signal_rejects_malformed_bodies() {
    let mut body = signal();
    body["signalType"] = json!("RENAME");

    let response = server()
        .post("/signals")
        .add_header(AUTHORIZATION, bearer())
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let problem: Problem = response.json();
    assert_eq!(problem.problem_type, "about:blank");
    assert_eq!(problem.title, "Bad Request");
}

#[tokio::test]
async fn test_pull_signals_returns_a_page() {
    let response = server()
        .get("/signals/eservice-1")
        .add_query_param("signalId", 0)
        .add_query_param("size", 25)
        .add_header(AUTHORIZATION, bearer())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "signals": [], "lastSignalId": null }));
}

#[tokio::test]
async fn test_pull_signals_validates_page_size() {
    let server = server();

    let too_large = server
        .get("/signals/eservice-1")
        .add_query_param("size", 101)
        .add_header(AUTHORIZATION, bearer())
        .await;
    too_large.assert_status(StatusCode::BAD_REQUEST);

    let not_a_number = server
        .get("/signals/eservice-1")
        .add_query_param("signalId", "latest")
        .add_header(AUTHORIZATION, bearer())
        .await;
    not_a_number.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_echo_returns_the_query_string() {
    let response = server()
        .get("/test")
        .add_query_param("name", "signal")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "name": "signal" }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = server().get(OPENAPI_JSON_PATH).await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert_eq!(doc["info"]["title"], "Pull-signal");
    assert_eq!(doc["info"]["version"], "0.1.1");
    assert_eq!(
        doc["paths"]["/signals/{eserviceId}"]["get"]["operationId"],
        "pullSignal"
    );
    assert_eq!(doc["servers"][0]["url"], "v1");
}
