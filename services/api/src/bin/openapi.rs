//! services/api/src/bin/openapi.rs
//!
//! This binary generates the OpenAPI document of the pull-signal contract
//! and saves it as `<prefix>_<version>_.yaml` in the configured directory.

use signals_api::{config::Config, contract};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let openapi = contract::openapi()?;
    let path = contract_openapi::write_documentation(
        &openapi,
        &config.openapi_output_dir,
        &config.openapi_file_prefix,
    )?;
    println!("OpenAPI document generated at {}", path.display());
    Ok(())
}
