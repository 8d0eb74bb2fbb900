// RWS Mock - Mock Rave Web Services API
// Copyright (c) 2025 RWS Mock Contributors
// Licensed under the MIT License

//! # RWS Mock - Mock Rave Web Services API
//!
//! RWS Mock stands in for Medidata Rave Web Services during integration tests. It
//! answers the RWS endpoints with CDISC ODM 1.3 documents generated from a configurable
//! catalog, accepts ODM uploads behind a structural gate, and never persists anything.
//!
//! ## Overview
//!
//! - **Metadata**: study metadata with study events, forms, item groups, and items
//! - **Clinical data**: empty `ClinicalData` envelopes, audit records included
//! - **Imports**: ODM uploads checked for shape and required attributes
//! - **CSV**: header-only datasets
//! - **Auth stub**: any Basic pair or an MAuth header gets in
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP routes, auth middleware, and response helpers
//! - [`core`] - Document tree, builders, upload validation, CSV headers
//! - [`domain`] - Catalog, identifiers, response envelopes, and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rws_mock::config::load_config;
//! use rws_mock::server::{build_router, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("rws-mock.toml")?;
//!     let state = AppState::from_config(&config)?;
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_addr()).await?;
//!     axum::serve(listener, build_router(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Building Documents
//!
//! The builders are plain functions of the catalog, usable without the server:
//!
//! ```rust
//! use rws_mock::core::builders::ClinicalEnvelopeBuilder;
//! use rws_mock::domain::OdmCatalog;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = OdmCatalog::default();
//! let builder = ClinicalEnvelopeBuilder::new(&catalog);
//! let xml = builder
//!     .build_error("RWS00003", "Invalid ODM structure", None)
//!     .to_xml()?;
//!
//! assert!(xml.contains("ReasonCode=\"RWS00003\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library errors use [`domain::MockError`]; CLI commands return exit codes through
//! `anyhow::Result<i32>`.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
