//! Print the OpenAPI document as JSON.

#![expect(clippy::print_stdout, reason = "CLI output goes to stdout")]

use citas_backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    println!("{}", ApiDoc::openapi().to_json()?);
    Ok(())
}
