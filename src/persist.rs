//! Store and load response trees as JSON files.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::codec::{self, CodecError};
use crate::schema::FieldResponse;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("codec: {0}")]
    Codec(#[from] CodecError),
}

/// Write a response tree to `path` as pretty-printed JSON.
pub fn dump(path: impl AsRef<Path>, response: &FieldResponse) -> Result<(), PersistError> {
    let path = path.as_ref();
    let value = codec::encode_field_response(response);
    let text = serde_json::to_string_pretty(&value)?;
    fs::write(path, text)?;
    debug!(
        path = %path.display(),
        planes = response.planes.len(),
        "wrote field response"
    );
    Ok(())
}

/// Read a response tree from a JSON file written by [`dump`] (or by the
/// upstream field calculation).
pub fn load(path: impl AsRef<Path>) -> Result<FieldResponse, PersistError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let response = codec::decode_field_response(&value)?;
    debug!(
        path = %path.display(),
        planes = response.planes.len(),
        "loaded field response"
    );
    Ok(response)
}
