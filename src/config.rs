// ⚙️ Runtime configuration: where the data lives and how loud to log

use crate::db::NeoDatabase;
use crate::parser::{load_approaches, load_neos};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_NEO_FILE: &str = "data/neos.csv";
pub const DEFAULT_CAD_FILE: &str = "data/cad.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// NEO catalog CSV
    pub neo_file: PathBuf,
    /// Close-approach JSON
    pub cad_file: PathBuf,
    /// Default log level; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            neo_file: PathBuf::from(DEFAULT_NEO_FILE),
            cad_file: PathBuf::from(DEFAULT_CAD_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load both data files and link them
    pub fn load_database(&self) -> Result<NeoDatabase> {
        let neos = load_neos(&self.neo_file)?;
        let approaches = load_approaches(&self.cad_file)?;
        NeoDatabase::new(neos, approaches).context("Failed to link close approaches to NEOs")
    }
}
