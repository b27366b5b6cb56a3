//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_config_error() {
        let mut config = ClientConfig::default();
        config.display.timezone = Some("Nowhere/Else".to_string());
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().starts_with("configuration error: [display] timezone"));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&ClientConfig::default()).is_ok());
        assert!(dump(&ClientConfig::default()).is_ok());
    }
}
