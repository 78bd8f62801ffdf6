use serde_json::{json, Value};

use backend::routes::configure_routes;
use backend::shared::config::{self, AuthConfig, Config, DatabaseConfig, IngestionConfig};
use backend::shared::data::{product_db, rating_db};

async fn spawn_app() -> String {
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
        auth: AuthConfig {
            delete_token: Some("secret-token".into()),
        },
    })
    .unwrap();

    // The temp dir only needs to outlive the sqlite connections
    std::mem::forget(dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, configure_routes()).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn http_surface_end_to_end() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(health.status().as_u16(), 200);

    // Create
    let resp = client
        .post(format!("{base}/api/product"))
        .json(&json!({ "product_id": 1, "name": "Shirt", "price": 9.99 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Product created successfully"));
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Duplicate create maps to 409 with an error envelope
    let resp = client
        .post(format!("{base}/api/product"))
        .json(&json!({ "product_id": 1, "name": "Other", "price": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body.get("data").map_or(true, |d| d.is_null()));

    // Invalid payload maps to 400
    let resp = client
        .post(format!("{base}/api/product"))
        .json(&json!({ "product_id": 2, "name": "", "price": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    // List with pagination metadata
    let resp = client
        .get(format!("{base}/api/product?page=1&limit=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], json!(1));
    assert_eq!(body["meta"]["total_pages"], json!(1));

    // Get by id
    let resp = client
        .get(format!("{base}/api/product/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], json!("Shirt"));

    // Patch
    let resp = client
        .patch(format!("{base}/api/product/{id}"))
        .json(&json!({ "price": 12.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["price"], json!(12.0));
    assert_eq!(body["data"]["name"], json!("Shirt"));

    // Ingestion without a configured source maps to 400
    let resp = client
        .get(format!("{base}/api/product/fetch"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    // Delete requires the exact configured token in the Authorization header
    let resp = client
        .delete(format!("{base}/api/product/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    let resp = client
        .delete(format!("{base}/api/product/{id}"))
        .header("Authorization", "Bearer secret-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    let resp = client
        .delete(format!("{base}/api/product/{id}"))
        .header("Authorization", "secret-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["deleted"], json!(true));

    // Deleted rows disappear from reads
    let resp = client
        .get(format!("{base}/api/product/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
}
