//! Writing command output to stdout or a file

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Open the output target: the given file (created or truncated) or stdout
pub fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write bytes to the output target and flush
pub fn write_output(out: Option<&Path>, bytes: &[u8]) -> Result<()> {
    let mut writer = open_output(out)?;
    writer.write_all(bytes).context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Pretty-print a value as 2-space indented JSON with a trailing newline
pub fn to_json_document<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    json.push('\n');
    Ok(json)
}
