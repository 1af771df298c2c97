//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use razewatch::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;
    io::stdout().write_all(json.as_bytes())
}
