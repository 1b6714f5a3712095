//! Integration tests for configuration management
//!
//! These tests verify that the configuration system works correctly
//! across module boundaries.

use r_moviecli::config::Settings;
use std::error::Error;
use tempfile::tempdir;

#[cfg(test)]
mod config_integration_tests {
    use super::*;

    /// Test complete configuration workflow
    #[test]
    fn test_config_lifecycle() -> Result<(), Box<dyn Error>> {
        // Create a temporary directory for test
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");

        // Create settings with test values
        let mut settings = Settings::default();
        settings.server_url = "https://streaming-backend.example.com".to_string();
        settings.image_base_url = "https://images.example.com/w500".to_string();

        // Validate and save settings
        settings.validate()?;
        settings.save(&config_path)?;

        // Load settings back
        let loaded_settings = Settings::load(&config_path)?;

        // Verify loaded settings match what we saved
        assert_eq!(
            loaded_settings.server_url,
            "https://streaming-backend.example.com"
        );
        assert_eq!(
            loaded_settings.image_base_url,
            "https://images.example.com/w500"
        );

        // Test overriding settings
        let mut updated_settings = loaded_settings;
        updated_settings.server_url = "https://updated-backend.example.com".to_string();
        updated_settings.save(&config_path)?;

        // Load again and verify updates
        let reloaded_settings = Settings::load(&config_path)?;
        assert_eq!(
            reloaded_settings.server_url,
            "https://updated-backend.example.com"
        );

        Ok(())
    }

    /// Test invalid configuration handling
    #[test]
    fn test_invalid_config_validation() {
        // Test with empty server URL
        let mut invalid_settings = Settings::default();
        invalid_settings.server_url = "".to_string();

        let result = invalid_settings.validate();
        assert!(result.is_err());

        if let Err(e) = result {
            assert!(e.to_string().contains("URL cannot be empty"));
        }

        // Test with a server URL that does not parse
        let mut malformed_settings = Settings::default();
        malformed_settings.server_url = "not a url at all".to_string();
        assert!(malformed_settings.validate().is_err());
    }
}
