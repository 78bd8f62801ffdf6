use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

static RATING_DB: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_RATINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS ratings (
        id TEXT PRIMARY KEY NOT NULL,
        product_id INTEGER NOT NULL UNIQUE,
        rate REAL NOT NULL,
        count INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    );
"#;

pub async fn initialize(db_path: &str) -> anyhow::Result<()> {
    let conn = super::connect(db_path).await?;

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_RATINGS_TABLE.to_string(),
    ))
    .await?;

    RATING_DB
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Rating store already initialized"))?;
    tracing::info!("Rating store initialized at {}", db_path);
    Ok(())
}

pub fn connection() -> &'static DatabaseConnection {
    RATING_DB
        .get()
        .expect("Rating store has not been initialized")
}
