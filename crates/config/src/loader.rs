use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::models::StorageConfig;
use std::path::Path;

impl StorageConfig {
    /// Loads configuration from a file, creating a commented default
    /// config when the file does not exist yet.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            create_default_config(path).await?;
            tracing::info!("Created default storage config at {}", path.display());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: StorageConfig = toml::from_str(&content)?;

        Ok(config)
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}
