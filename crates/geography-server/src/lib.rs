// crates/geography-server/src/lib.rs

//! Read-only HTTP front-end for a [`geography_core::Catalog`] snapshot.
//!
//! Two surfaces share one in-memory catalog:
//!
//! * **REST:** `GET /geography/countries`, `/geography/airports` and their
//!   nested listings, rendered with the [`geography_core::api`] views.
//! * **GraphQL:** `POST /geography/graphql` (`GET` serves GraphiQL).
//!
//! The catalog is loaded once at start-up and never mutated, so it is shared
//! as a plain `Arc` without locking.

pub mod error;
pub mod graphql;
pub mod rest;

use axum::routing::get;
use axum::Router;
use geography_core::Catalog;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use graphql::{schema, GeographySchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub schema: GeographySchema,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        AppState {
            schema: schema(Arc::clone(&catalog)),
            catalog,
        }
    }
}

/// All routes, with request tracing.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/geography/countries", get(rest::countries))
        .route("/geography/countries/{country_code}", get(rest::country))
        .route(
            "/geography/countries/{country_code}/regions",
            get(rest::regions),
        )
        .route("/geography/airports", get(rest::airports))
        .route("/geography/airports/{airport_code}", get(rest::airport))
        .route(
            "/geography/airports/{airport_code}/runways",
            get(rest::runways),
        )
        .route(
            "/geography/airports/{airport_code}/frequencies",
            get(rest::frequencies),
        )
        .route(
            "/geography/graphql",
            get(graphql::graphiql).post(graphql::execute),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(catalog))
}
