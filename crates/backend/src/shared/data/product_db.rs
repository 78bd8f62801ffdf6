use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

static PRODUCT_DB: OnceCell<DatabaseConnection> = OnceCell::new();

/// Minimal schema bootstrap. The unique constraints on product_id and name
/// cover soft-deleted rows too; active-row visibility is a query concern.
const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY NOT NULL,
        product_id INTEGER NOT NULL UNIQUE,
        name TEXT NOT NULL UNIQUE,
        price REAL NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    );
"#;

pub async fn initialize(db_path: &str) -> anyhow::Result<()> {
    let conn = super::connect(db_path).await?;

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_PRODUCTS_TABLE.to_string(),
    ))
    .await?;

    PRODUCT_DB
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Product store already initialized"))?;
    tracing::info!("Product store initialized at {}", db_path);
    Ok(())
}

pub fn connection() -> &'static DatabaseConnection {
    PRODUCT_DB
        .get()
        .expect("Product store has not been initialized")
}
