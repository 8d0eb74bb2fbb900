//! Serve command implementation
//!
//! Loads the configuration, materializes the catalog once, and serves the mock API
//! until a shutdown signal arrives.

use crate::config::{load_config, MockConfig};
use crate::domain::MockError;
use crate::server::{build_router, AppState};
use clap::Args;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Resolves the configuration to serve with
    ///
    /// A missing file is not an error here: the built-in defaults are used instead.
    /// Returns `Err` with an exit code when the configuration is unusable.
    pub fn resolve_config(&self, config_path: &str) -> Result<MockConfig, i32> {
        let mut config = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(config) => config,
                Err(e) => {
                    println!("❌ Failed to load configuration file");
                    println!("   Error: {e}");
                    return Err(2);
                }
            }
        } else {
            tracing::warn!(
                config_path = %config_path,
                "Configuration file not found, using built-in defaults"
            );
            MockConfig::default()
        };

        if let Some(host) = &self.host {
            tracing::info!(host = %host, "Overriding bind host from CLI");
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            tracing::info!(port, "Overriding bind port from CLI");
            config.server.port = port;
        }

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Err(2);
        }

        Ok(config)
    }

    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting serve command");

        let config = match self.resolve_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let state = match AppState::from_config(&config) {
            Ok(state) => state,
            Err(e) => {
                println!("❌ Invalid configuration");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        for reference in state.catalog.unresolved_references() {
            tracing::warn!(%reference, "Unresolved catalog reference");
        }

        tracing::info!(
            study_events = state.catalog.study_events().len(),
            forms = state.catalog.forms().len(),
            item_groups = state.catalog.item_groups().len(),
            items = state.catalog.items().len(),
            "ODM catalog loaded"
        );

        let addr = config.server.bind_addr();
        let listener = bind_listener(&addr).await?;
        tracing::info!(addr = %addr, "Server listening");
        println!("🚀 RWS mock listening on http://{addr}");

        axum::serve(listener, build_router(state))
            .with_graceful_shutdown(wait_for_shutdown(shutdown_signal))
            .await
            .map_err(|e| MockError::Server(format!("Server failed: {e}")))?;

        tracing::info!("Server stopped");
        println!("👋 Server stopped");
        Ok(0)
    }
}

/// Resolves once `true` is sent on the shutdown channel
///
/// A closed channel never resolves: losing the signal handler must not stop the server.
pub async fn wait_for_shutdown(mut shutdown_signal: watch::Receiver<bool>) {
    loop {
        if *shutdown_signal.borrow_and_update() {
            return;
        }
        if shutdown_signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Binds the listener for `addr`
///
/// # Errors
///
/// Returns [`MockError::Server`] if the address is invalid or already in use.
pub async fn bind_listener(addr: &str) -> crate::domain::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| MockError::Server(format!("Failed to bind {addr}: {e}")))
}
