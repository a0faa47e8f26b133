//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the interview REST API, stamped with the crate
//! version. Usage: `openapi [OUTPUT_PATH]` (defaults to `openapi.json`).

use api_lib::{error::ApiError, web::rest::ApiDoc};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn interview_api_document() -> utoipa::openapi::OpenApi {
    let mut document = ApiDoc::openapi();
    document.info.version = env!("CARGO_PKG_VERSION").to_string();
    document
}

fn main() -> Result<(), ApiError> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let document = interview_api_document();
    let json = document
        .to_pretty_json()
        .map_err(|e| ApiError::Internal(format!("Failed to serialize OpenAPI document: {}", e)))?;
    std::fs::write(&output, json)?;

    println!(
        "Wrote OpenAPI document for {} paths to {}",
        document.paths.paths.len(),
        output
    );
    Ok(())
}
