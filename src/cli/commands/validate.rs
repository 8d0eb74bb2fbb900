//! Validate config command implementation
//!
//! Loads and validates the configuration file, then reports catalog references that
//! do not resolve. Dangling references are warnings, not failures.

use crate::config::load_config;
use crate::domain::OdmCatalog;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let catalog = OdmCatalog::from_config(&config);

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen: {}", config.server.bind_addr());
        println!("  RWS Version: {}", config.rws.version);
        println!("  ODM Version: {}", catalog.odm_version());
        println!("  Default File Type: {}", catalog.default_file_type());
        println!("  Default Study: {}", catalog.default_study().name);
        println!("  Study Overrides: {}", config.odm.test_studies.len());
        println!("  Study Events: {}", catalog.study_events().len());
        println!("  Forms: {}", catalog.forms().len());
        println!("  Item Groups: {}", catalog.item_groups().len());
        println!("  Items: {}", catalog.items().len());
        println!("  CSV Datasets: {}", config.csv_datasets.len());
        println!("  Reason Codes: {}", config.responses.error_codes.len());

        let unresolved = catalog.unresolved_references();
        if !unresolved.is_empty() {
            println!();
            println!("⚠️  {} unresolved reference(s):", unresolved.len());
            for reference in unresolved {
                tracing::warn!(%reference, "Unresolved catalog reference");
                println!("   - {reference}");
            }
        }
        println!();

        Ok(0)
    }
}
