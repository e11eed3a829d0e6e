//! JSON Export
//!
//! Writes reports for plotting and animation tools.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Write `value` as pretty JSON, creating parent directories as needed
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)
}
