use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Tables owned by the application, created on startup when missing
const SCHEMA: &[(&str, &str)] = &[
    (
        "suppliers",
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            supplier_id_tecopos INTEGER NOT NULL,
            tecopos_region TEXT,
            tecopos_business_id TEXT,
            tecopos_supplier_id TEXT,
            tecopos_supplier_name TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "sales",
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id TEXT PRIMARY KEY NOT NULL,
            supplier_id TEXT NOT NULL REFERENCES suppliers(id),
            date_from TEXT NOT NULL,
            date_to TEXT NOT NULL,
            data TEXT NOT NULL,
            total_sales REAL NOT NULL,
            total_units INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "inventory_snapshots",
        r#"
        CREATE TABLE IF NOT EXISTS inventory_snapshots (
            id TEXT PRIMARY KEY NOT NULL,
            supplier_id TEXT NOT NULL REFERENCES suppliers(id),
            product_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            total_quantity INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "conciliations",
        r#"
        CREATE TABLE IF NOT EXISTS conciliations (
            id TEXT PRIMARY KEY NOT NULL,
            supplier_id TEXT NOT NULL REFERENCES suppliers(id),
            range_label TEXT NOT NULL,
            orders INTEGER NOT NULL,
            sales_qty INTEGER NOT NULL,
            revenue REAL NOT NULL,
            discounts REAL NOT NULL,
            total REAL NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "tecopos_credentials",
        r#"
        CREATE TABLE IF NOT EXISTS tecopos_credentials (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES suppliers(id),
            region TEXT NOT NULL,
            access_token_enc TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (user_id, region)
        );
        "#,
    ),
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
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

    for (table, ddl) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, ddl.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create table {}: {}", table, e))?;
        tracing::debug!("Table {} ready", table);
    }

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "CREATE INDEX IF NOT EXISTS idx_inventory_supplier_product \
         ON inventory_snapshots (supplier_id, product_id);"
            .to_string(),
    ))
    .await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Temp-file database shared by every test of the crate
#[cfg(test)]
pub mod test_support {
    use chrono::Utc;
    use contracts::system::auth::SupplierInfo;
    use once_cell::sync::Lazy;
    use tokio::sync::OnceCell;

    use crate::system::suppliers::repository as supplier_repository;

    static TEST_DB: Lazy<OnceCell<tempfile::TempDir>> = Lazy::new(OnceCell::new);

    /// Create the schema once and install a random token cipher
    pub async fn init() {
        TEST_DB
            .get_or_init(|| async {
                let dir = tempfile::tempdir().expect("temp dir");
                super::initialize_database(&dir.path().join("portal.db"))
                    .await
                    .expect("test database");
                crate::shared::crypto::init("").expect("token cipher");
                dir
            })
            .await;
    }

    /// Fresh supplier row with a unique email
    pub async fn supplier(supplier_id_tecopos: i64) -> SupplierInfo {
        init().await;
        let id = uuid::Uuid::new_v4().to_string();
        let supplier = SupplierInfo {
            email: format!("{}@proveedor.cu", id),
            id,
            name: "Proveedor de prueba".to_string(),
            supplier_id_tecopos,
            created_at: Utc::now().to_rfc3339(),
            tecopos: None,
        };
        supplier_repository::create_with_password(&supplier, "not-a-hash")
            .await
            .expect("insert supplier");
        supplier
    }
}
