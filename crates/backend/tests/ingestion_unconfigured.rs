use backend::shared::config::{self, AuthConfig, Config, DatabaseConfig, IngestionConfig};
use backend::shared::data::{product_db, rating_db};
use backend::shared::error::AppError;
use backend::usecases::catalog_ingestion::executor;

#[tokio::test]
async fn ingestion_without_source_url_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    product_db::initialize(&dir.path().join("products.db").to_string_lossy())
        .await
        .unwrap();
    rating_db::initialize(&dir.path().join("ratings.db").to_string_lossy())
        .await
        .unwrap();

    config::init(Config {
        product_database: DatabaseConfig {
            path: dir.path().join("products.db").to_string_lossy().into_owned(),
        },
        rating_database: DatabaseConfig {
            path: dir.path().join("ratings.db").to_string_lossy().into_owned(),
        },
        ingestion: IngestionConfig::default(),
        auth: AuthConfig::default(),
    })
    .unwrap();

    let err = executor::run().await.unwrap_err();
    assert!(matches!(err, AppError::InvalidConfiguration(_)));
    assert_eq!(err.status_code().as_u16(), 400);
}
