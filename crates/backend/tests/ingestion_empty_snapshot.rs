use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use backend::shared::config::{self, AuthConfig, Config, DatabaseConfig, IngestionConfig};
use backend::shared::data::{product_db, rating_db};
use backend::shared::error::AppError;
use backend::usecases::catalog_ingestion::executor;

#[tokio::test]
async fn empty_snapshot_is_rejected_as_upstream_error() {
    let dir = tempfile::tempdir().unwrap();
    product_db::initialize(&dir.path().join("products.db").to_string_lossy())
        .await
        .unwrap();
    rating_db::initialize(&dir.path().join("ratings.db").to_string_lossy())
        .await
        .unwrap();

    let app = Router::new().route("/products", get(|| async { Json(json!([])) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    config::init(Config {
        product_database: DatabaseConfig {
            path: dir.path().join("products.db").to_string_lossy().into_owned(),
        },
        rating_database: DatabaseConfig {
            path: dir.path().join("ratings.db").to_string_lossy().into_owned(),
        },
        ingestion: IngestionConfig {
            source_url: Some(format!("http://{}/products", addr)),
            fetch_timeout_secs: 5,
        },
        auth: AuthConfig::default(),
    })
    .unwrap();

    let err = executor::run().await.unwrap_err();
    assert!(matches!(err, AppError::InvalidUpstreamData(_)));
    assert_eq!(err.status_code().as_u16(), 400);
}
