//! Console configuration
//!
//! The defaults are embedded in the binary. The API base URL can be overridden
//! per browser with a `localStorage` entry (see `ApiConfig::base_url_storage_key`).

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub records: RecordsConfig,
    pub bulk_upload: BulkUploadConfig,
    pub toast: ToastConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend port on the same host as the console
    pub port: u16,
    pub base_url_storage_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecordsConfig {
    /// Largest selection deleted record by record
    pub per_record_delete_max: usize,
    /// Largest selection sent as one bulk delete
    pub bulk_delete_max: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BulkUploadConfig {
    pub batch_size: usize,
    pub close_delay_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToastConfig {
    pub duration_ms: u32,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
base_url_storage_key = "api_base_url"

[records]
per_record_delete_max = 10
bulk_delete_max = 100

[bulk_upload]
batch_size = 1000
close_delay_ms = 2000

[toast]
duration_ms = 4000
"#;

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                port: 3000,
                base_url_storage_key: "api_base_url".to_string(),
            },
            records: RecordsConfig {
                per_record_delete_max: 10,
                bulk_delete_max: 100,
            },
            bulk_upload: BulkUploadConfig {
                batch_size: 1000,
                close_delay_ms: 2000,
            },
            toast: ToastConfig { duration_ms: 4000 },
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(|| match AppConfig::parse(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::error!("Embedded config is invalid, using built-in defaults: {}", e);
        AppConfig::default()
    }
});

/// Loaded configuration
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::parse(DEFAULT_CONFIG);
        assert!(config.is_ok());
        assert_eq!(config.unwrap(), AppConfig::default());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(AppConfig::parse("[api]\nport = 8080\n").is_err());
    }
}
