use axum::http::{header, Method};
use axum::middleware;
use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::product;
use crate::system::auth;

pub fn configure_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/product/fetch", get(product::ingest))
        .route("/api/product", get(product::list).post(product::create))
        .route(
            "/api/product/:id",
            get(product::get_by_id).patch(product::update).merge(
                delete(product::remove)
                    .layer(middleware::from_fn(auth::require_delete_token)),
            ),
        )
        .layer(cors)
}
