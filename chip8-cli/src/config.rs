//! YAML configuration file.
//!
//! ```yaml
//! clock_frequency: 750
//! rng_seed: 42
//! subn_borrow_flag: false
//! keymap:
//!   - chip8: 5
//!     key: i
//! ```
use std::{fs, path::Path};

use chip8::prelude::*;
use serde::Deserialize;

use crate::error::CliError;

/// Every field is optional. Missing fields keep the VM defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub clock_frequency: Option<u64>,
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub subn_borrow_flag: bool,
    #[serde(default)]
    pub keymap: Vec<KeyBinding>,
}

impl CliConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let file = fs::File::open(path.as_ref())?;
        let config: CliConfig = serde_yaml::from_reader(file)?;
        log::debug!("loaded config {}: {config:?}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn into_conf(self) -> Result<Chip8Conf, CliError> {
        Ok(Chip8Conf {
            clock_frequency: self.clock_frequency.map(Hz),
            rng_seed: self.rng_seed,
            quirks: Quirks {
                subn_borrow_flag: self.subn_borrow_flag,
            },
            keymap: KeyMap::from_bindings(&self.keymap)?,
        })
    }
}
