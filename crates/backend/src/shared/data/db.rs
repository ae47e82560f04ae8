use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Открыть SQLite базу по пути и подготовить схему
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// In-memory база (одно соединение, иначе каждое соединение пула видит свою пустую базу)
pub async fn initialize_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Minimal schema bootstrap: таблица материалов и уникальный индекс по QR коду
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS a001_material (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            qr_code_id TEXT NOT NULL,
            material_name TEXT NOT NULL,
            material_type TEXT,
            color TEXT,
            manufacturer TEXT,
            production_date TEXT,
            features TEXT,
            care_instructions TEXT,
            image_url TEXT,
            created_at TEXT
        );
        "#,
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_a001_material_qr_code_id
            ON a001_material (qr_code_id);
        "#,
    ];

    for sql in statements {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }

    tracing::info!("Schema for a001_material is ready");
    Ok(())
}
