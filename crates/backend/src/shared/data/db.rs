use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn create_table(conn: &DatabaseConnection, name: &str, sql: &str) -> anyhow::Result<()> {
    if !table_exists(conn, name).await? {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    // Повторная инициализация (например, из параллельных тестов) — no-op
    if DB_CONN.get().is_some() {
        return Ok(());
    }

    let db_file = db_path.unwrap_or("target/db/nestheaven.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    // Минимальный bootstrap схемы: таблицы создаются, если их ещё нет
    create_table(
        &conn,
        "a001_complex",
        r#"
        CREATE TABLE a001_complex (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            names TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "a002_apartment",
        r#"
        CREATE TABLE a002_apartment (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            price REAL NOT NULL DEFAULT 0,
            rooms INTEGER NOT NULL DEFAULT 1,
            area REAL NOT NULL DEFAULT 0,
            floor INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'active',
            seller_id TEXT NOT NULL,
            complex_id TEXT,
            titles TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "a003_apartment_status_log",
        r#"
        CREATE TABLE a003_apartment_status_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            apartment_id TEXT NOT NULL,
            prior_status TEXT NOT NULL,
            new_status TEXT NOT NULL,
            actor_id TEXT NOT NULL,
            reason TEXT,
            details TEXT,
            changed_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "a004_favorite",
        r#"
        CREATE TABLE a004_favorite (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            apartment_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "a005_saved_search",
        r#"
        CREATE TABLE a005_saved_search (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            user_id TEXT NOT NULL,
            filter TEXT NOT NULL DEFAULT '{}',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "system_log",
        r#"
        CREATE TABLE system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        );
    "#,
    )
    .await?;

    // Индексы — частые выборки по продавцу, статусу и истории квартиры
    let index_sql = [
        "CREATE INDEX IF NOT EXISTS idx_a002_seller ON a002_apartment (seller_id);",
        "CREATE INDEX IF NOT EXISTS idx_a002_status ON a002_apartment (status);",
        "CREATE INDEX IF NOT EXISTS idx_a003_apartment ON a003_apartment_status_log (apartment_id);",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_a004_user_apartment ON a004_favorite (user_id, apartment_id);",
        "CREATE INDEX IF NOT EXISTS idx_a005_user ON a005_saved_search (user_id);",
    ];
    for sql in index_sql {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    if DB_CONN.set(conn).is_err() {
        // Другой поток успел инициализировать первым — его соединение остаётся
        tracing::warn!("Database connection was already initialized");
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
