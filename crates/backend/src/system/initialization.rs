use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Apply the system schema (user accounts)
pub async fn apply_system_migration() -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            full_name TEXT,
            role TEXT NOT NULL DEFAULT 'USER',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            created_by TEXT
        );
        "#
        .to_string(),
    ))
    .await
    .context("Failed to create sys_users table")?;

    Ok(())
}

/// Ensure an owner-admin account exists (create if table is empty)
pub async fn ensure_owner_admin_exists() -> Result<()> {
    use crate::system::users::repository;
    use chrono::Utc;
    use contracts::enums::user_role::UserRole;
    use contracts::system::users::User;

    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default owner-admin account...");

        let now = Utc::now().to_rfc3339();
        let owner = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: "owner".to_string(),
            email: None,
            full_name: Some("Marketplace owner".to_string()),
            role: UserRole::OwnerAdmin,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
            created_by: None,
        };
        repository::create(&owner).await?;

        tracing::warn!("Default OWNER_ADMIN account created: owner ({})", owner.id);
    }

    Ok(())
}
