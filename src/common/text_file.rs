//! Text-file collaborator. Messages travel as raw bytes so files that are not valid
//! UTF-8 still round-trip unchanged.

use std::fs;
use std::path::Path;

use crate::common::error::Result;

/// Read the whole message file.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Write the recovered message, creating parent directories as needed.
pub fn write_text<P: AsRef<Path>>(path: P, text: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}
