//! Reads `.santa` source files for the CLI.
use std::fs;
use std::io;
use std::path::Path;

/// Reads a source file as UTF-8 and strips CR bytes so every newline is LF.
pub fn load_source(path: &Path) -> io::Result<String> {
    let raw = fs::read_to_string(path)?;
    Ok(raw.replace('\r', ""))
}
