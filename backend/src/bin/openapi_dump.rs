//! Print the repair desk OpenAPI document as JSON.

use std::io::{self, Write};

use techfix::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::other(format!("serialise OpenAPI document: {err}")))?;
    writeln!(io::stdout().lock(), "{json}")
}
