//! HTTP surface of the mock
//!
//! An axum [`Router`](axum::Router) over a shared, read-only [`AppState`]. Handlers
//! call the core builders directly and answer every request-level failure with an
//! ODM document rather than an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use rws_mock::config::MockConfig;
//! use rws_mock::server::{build_router, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MockConfig::default();
//! let app = build_router(AppState::from_config(&config)?);
//!
//! let listener = tokio::net::TcpListener::bind(config.server.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use auth::{AuthMethod, AuthPolicy};
pub use router::build_router;
pub use state::AppState;
