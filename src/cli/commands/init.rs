//! Init command implementation
//!
//! Writes a starter configuration file. The minimal template lists the settings most
//! people change; `--with-examples` writes every setting with the built-in catalog.

use crate::config::MockConfig;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "rws-mock.toml")]
    pub output: String,

    /// Write every setting, including the full default catalog
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing RWS mock configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_full_config()?
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your studies and catalog", self.output);
                println!("  2. Validate configuration: rws-mock validate-config");
                println!("  3. Start the mock: rws-mock serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# RWS Mock Configuration File
# Every setting has a default; delete anything you do not need.

[application]
log_level = "info"

[server]
host = "0.0.0.0"
port = 3000

[rws]
version = "1.8.0"

[auth.basic]
enabled = true
allow_any_credentials = true

[auth.mauth]
enabled = true
header = "X-MWS-Authentication"

# Only checked when allow_any_credentials = false
# [[auth.test_credentials]]
# username = "tester"
# password = "${RWS_MOCK_TEST_PASSWORD}"

[odm]
version = "1.3"
default_file_type = "Snapshot"

[odm.default_study]
study_name = "Mock Study"
study_description = "Mock study metadata"
protocol_name = "MOCK-001"

# [[odm.test_studies]]
# study_oid = "STUDY001"
# study_name = "Study One"
# study_description = "First study"
# protocol_name = "P-001"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate the full configuration from the built-in defaults
    fn generate_full_config() -> anyhow::Result<String> {
        let body = toml::to_string_pretty(&MockConfig::default())?;
        Ok(format!(
            "# RWS Mock Configuration File\n# All settings with their default values.\n\n{body}"
        ))
    }
}
