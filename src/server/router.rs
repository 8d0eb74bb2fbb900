//! Router construction

use super::auth::require_auth;
use super::handlers::{clinical_data, datasets, system};
use super::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builds the full router with every route and middleware
///
/// `/` and `/health` are public. Everything under `/RaveWebServices` goes through the
/// authentication stub; unknown paths answer 404 without asking for credentials.
pub fn build_router(state: AppState) -> Router {
    // Routes behind the auth stub
    let protected = Router::new()
        .route("/RaveWebServices", post(clinical_data::import_odm))
        .route(
            "/RaveWebServices/ClinicalData",
            post(clinical_data::import_clinical_data),
        )
        .route("/RaveWebServices/version", get(system::version))
        .route("/RaveWebServices/WebService.aspx", get(system::cache_flush))
        .route("/RaveWebServices/datasets/:dataset", get(datasets::get_dataset))
        .route_layer(axum_mw::from_fn_with_state(state.clone(), require_auth));

    // Public routes
    let public = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health));

    let body_limit = state.body_limit;

    public
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
