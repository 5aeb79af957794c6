pub mod builder;
pub mod defaults;
pub mod env;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use env::Environment;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load the optional YAML config file. A missing file yields an empty input.
pub fn load_config(config_file: &str) -> Result<ConfigInput> {
    let path = Path::new(config_file);
    if !path.exists() {
        return Ok(ConfigInput::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", config_file))?;
    let config_input = serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", config_file))?;

    Ok(config_input)
}
