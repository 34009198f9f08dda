//! Reading the query text.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::error::InputError;

/// Read the query from `file`, or from stdin when `file` is `None` or `-`.
///
/// Surrounding whitespace is trimmed; an empty query is an [`InputError`].
pub fn read_query(file: Option<&Path>) -> Result<String> {
    let raw = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read query from stdin")?;
            buf
        }
    };

    let query = raw.trim();
    if query.is_empty() {
        return Err(InputError("query is empty".to_string()).into());
    }
    Ok(query.to_string())
}
