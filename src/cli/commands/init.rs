//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use crate::config::PushConfig;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "aisler-push.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = Self::generate_default_config()?;

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: aisler-push validate-config");
                println!("  3. Push a design: aisler-push push <board.json>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Renders the default configuration as commented TOML
    fn generate_default_config() -> anyhow::Result<String> {
        let body = toml::to_string_pretty(&PushConfig::default())?;
        Ok(format!(
            "# aisler-push configuration file\n\
             #\n\
             # All values below are the defaults; delete anything you do not\n\
             # want to override. Brace-wrapped environment variable\n\
             # references (dollar sign, braces, variable name) are\n\
             # substituted at load time and must be set when used.\n\n{body}"
        ))
    }
}
