//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI specification for the fridge API to `openapi.json`,
//! or to the path given as the first argument.

use api_lib::web::ApiDoc;
use utoipa::OpenApi;

fn write_openapi(
    api_doc: utoipa::openapi::OpenApi,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec_json = api_doc.to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    println!("OpenAPI specification generated at {}", path);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    write_openapi(ApiDoc::openapi(), &path)
}
