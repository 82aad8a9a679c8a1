use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::debug;
use xbfload_core::{StaticMetadata, XbfDocument};

pub type CliResult<T> = Result<T, Box<dyn Error>>;

/// The JSON document both commands read: a type table and the decoded streams.
#[derive(Deserialize, Debug)]
pub struct InputFile {
    #[serde(default)]
    pub metadata: StaticMetadata,
    pub document: XbfDocument,
}

pub fn read_input(path: &Path) -> CliResult<InputFile> {
    let text = fs::read_to_string(path).map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let input: InputFile =
        serde_json::from_str(&text).map_err(|err| format!("invalid input {}: {err}", path.display()))?;
    debug!(path = %path.display(), streams = input.document.streams.len(), "read input document");
    Ok(input)
}
