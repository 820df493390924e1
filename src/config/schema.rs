//! Configuration schema types
//!
//! One explicit, injected configuration structure for the whole pipeline:
//! service endpoint, poll interval, layer plan, well-known filenames, and
//! logging. Everything the original hardcoded globally lives here so tests
//! can substitute fixtures.

use crate::adapters::board::{Layer, LayerPlanStep};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main push configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PushConfig {
    /// AISLER service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PushConfig {
    /// Loads configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::domain::Result<Self> {
        super::loader::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.service.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// AISLER service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the fabrication service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client tag sent with new-project requests
    #[serde(default = "default_client_ref")]
    pub client_ref: String,

    /// Delay between build-progress polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Open the redirect URL in a browser when the remote build finishes.
    /// Disable for headless hosts.
    #[serde(default = "default_true")]
    pub open_redirect: bool,
}

impl ServiceConfig {
    /// Poll delay as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid service.base_url '{}': {e}", self.base_url))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "Invalid service.base_url '{}': scheme must be http or https",
                self.base_url
            ));
        }
        if self.client_ref.trim().is_empty() {
            return Err("service.client_ref must not be empty".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("service.poll_interval_ms must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_ref: default_client_ref(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_seconds: default_timeout_seconds(),
            open_redirect: true,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Index of the designated title-block comment line holding the
    /// project linkage
    #[serde(default)]
    pub comment_line: usize,

    /// Design property key that routes the export to a local path
    #[serde(default = "default_local_export_property")]
    pub local_export_property: String,

    /// Filename of the bare-board netlist inside the package
    #[serde(default = "default_netlist_filename")]
    pub netlist_filename: String,

    /// Filename of the component catalog inside the package
    #[serde(default = "default_components_filename")]
    pub components_filename: String,

    /// Ordered layer plan; each enabled layer is rendered in this order
    #[serde(default = "default_layer_plan")]
    pub layer_plan: Vec<LayerPlanStep>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_export_property.trim().is_empty() {
            return Err("export.local_export_property must not be empty".to_string());
        }
        if self.netlist_filename.trim().is_empty() {
            return Err("export.netlist_filename must not be empty".to_string());
        }
        if self.components_filename.trim().is_empty() {
            return Err("export.components_filename must not be empty".to_string());
        }
        if self.layer_plan.is_empty() {
            return Err("export.layer_plan must contain at least one layer".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            comment_line: 0,
            local_export_property: default_local_export_property(),
            netlist_filename: default_netlist_filename(),
            components_filename: default_components_filename(),
            layer_plan: default_layer_plan(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON-formatted logs instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_base_url() -> String {
    "https://aisler.net".to_string()
}

fn default_client_ref() -> String {
    "KiCadPush".to_string()
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_export_property() -> String {
    "aisler_export_locally".to_string()
}

fn default_netlist_filename() -> String {
    "netlist.d356".to_string()
}

fn default_components_filename() -> String {
    "components.json".to_string()
}

/// The fixed ordered layer plan of the original exporter
fn default_layer_plan() -> Vec<LayerPlanStep> {
    vec![
        LayerPlanStep::new(Layer::FrontCopper, "CuTop", "Top layer"),
        LayerPlanStep::new(Layer::BackCopper, "CuBottom", "Bottom layer"),
        LayerPlanStep::new(Layer::BackPaste, "PasteBottom", "Paste bottom"),
        LayerPlanStep::new(Layer::FrontPaste, "PasteTop", "Paste top"),
        LayerPlanStep::new(Layer::FrontSilk, "SilkTop", "Silk top"),
        LayerPlanStep::new(Layer::BackSilk, "SilkBottom", "Silk bottom"),
        LayerPlanStep::new(Layer::BackMask, "MaskBottom", "Mask bottom"),
        LayerPlanStep::new(Layer::FrontMask, "MaskTop", "Mask top"),
        LayerPlanStep::new(Layer::EdgeCuts, "EdgeCuts", "Board outline"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PushConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_service_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "https://aisler.net");
        assert_eq!(config.client_ref, "KiCadPush");
        assert_eq!(config.poll_interval_ms, 3000);
        assert!(config.open_redirect);
    }

    #[test]
    fn test_default_layer_plan_order() {
        let plan = default_layer_plan();
        assert_eq!(plan.len(), 9);
        assert_eq!(plan[0].suffix, "CuTop");
        assert_eq!(plan[8].layer, Layer::EdgeCuts);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = PushConfig {
            service: ServiceConfig {
                base_url: "not a url".to_string(),
                ..ServiceConfig::default()
            },
            ..PushConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let config = PushConfig {
            service: ServiceConfig {
                base_url: "ftp://aisler.net".to_string(),
                ..ServiceConfig::default()
            },
            ..PushConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = PushConfig {
            service: ServiceConfig {
                poll_interval_ms: 0,
                ..ServiceConfig::default()
            },
            ..PushConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_layer_plan_rejected() {
        let config = PushConfig {
            export: ExportConfig {
                layer_plan: Vec::new(),
                ..ExportConfig::default()
            },
            ..PushConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let config = PushConfig {
            logging: LoggingConfig {
                level: "verbose".to_string(),
                json: false,
            },
            ..PushConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: PushConfig = toml::from_str("").unwrap();
        assert_eq!(config.service.base_url, "https://aisler.net");
        assert_eq!(config.export.components_filename, "components.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PushConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: PushConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.export.layer_plan, config.export.layer_plan);
    }
}
