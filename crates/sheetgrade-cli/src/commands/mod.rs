pub mod answers;
pub mod grade;
pub mod init;
pub mod multi_set;
pub mod questions;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

/// Shown when a parser recognizes nothing in its input.
pub const NOTHING_RECOGNIZED: &str = "no records recognized, check formatting";

/// Read a text input file.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Output formats shared by the parsing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => anyhow::bail!("unknown format '{other}', expected text or json"),
        }
    }
}
