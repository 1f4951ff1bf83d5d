//! services/web/src/bin/openapi.rs
//!
//! Dumps the OpenAPI document of the JSON API. The output path is the first
//! argument (`openapi.json` when omitted); `-` writes to stdout.

use std::io::Write;
use utoipa::OpenApi;
use web_lib::web::rest::ApiDoc;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let api = ApiDoc::openapi();
    let document = api.to_pretty_json()?;

    if target == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", document)?;
    } else {
        std::fs::write(&target, document)?;
        eprintln!("Wrote {} API paths to {}", api.paths.paths.len(), target);
    }
    Ok(())
}
