use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, InternalResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Crate whose page hosts the panel; its own impls are already on the page.
    #[serde(default)]
    pub current_crate: Option<String>,

    /// Prefix for crate-relative links.
    #[serde(default = "default_root_path")]
    pub root_path: String,

    /// Drop synthetic impls whose type was already listed.
    #[serde(default = "default_true")]
    pub dedupe_synthetic: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            current_crate: None,
            root_path: default_root_path(),
            dedupe_synthetic: default_true(),
        }
    }
}

impl PanelConfig {
    pub fn with_current_crate<S: Into<String>>(mut self, current_crate: S) -> Self {
        self.current_crate = Some(current_crate.into());
        self
    }

    pub fn with_root_path<S: Into<String>>(mut self, root_path: S) -> Self {
        self.root_path = root_path.into();
        self
    }
}

fn default_root_path() -> String {
    "../".to_string()
}

fn default_true() -> bool {
    true
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::Config(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}
