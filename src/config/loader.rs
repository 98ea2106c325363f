use std::path::Path;

use super::{ConfigError, DonutConfig};

/// Load configuration from a YAML file; keys left out keep their defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DonutConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: DonutConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}
