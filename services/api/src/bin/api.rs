//! services/api/src/bin/api.rs

use contract_openapi::write_documentation;
use signals_api::{
    config::Config,
    contract,
    error::ApiError,
    web::{create_app, SWAGGER_UI_PATH},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Generate the OpenAPI Document ---
    let openapi = contract::openapi()?;
    write_documentation(
        &openapi,
        &config.openapi_output_dir,
        &config.openapi_file_prefix,
    )?;

    // --- 3. Create the Web Router ---
    let app = create_app(&config, openapi);

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}{}",
        config.bind_address, SWAGGER_UI_PATH
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
