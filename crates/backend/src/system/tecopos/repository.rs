use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Insert or replace the encrypted token of a (supplier, region) pair
pub async fn upsert_token(user_id: &str, region: &str, access_token_enc: &str) -> Result<()> {
    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO tecopos_credentials (id, user_id, region, access_token_enc, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(user_id, region) DO UPDATE SET
            access_token_enc = excluded.access_token_enc,
            updated_at = excluded.updated_at",
        [
            uuid::Uuid::new_v4().to_string().into(),
            user_id.into(),
            region.into(),
            access_token_enc.into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await
    .context("Failed to save Tecopos token")?;

    Ok(())
}

pub async fn get_token(user_id: &str, region: &str) -> Result<Option<String>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT access_token_enc FROM tecopos_credentials WHERE user_id = ? AND region = ?",
            [user_id.into(), region.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row.try_get("", "access_token_enc")?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support;

    #[tokio::test]
    async fn token_is_replaced_per_region() {
        let supplier = test_support::supplier(51).await;

        upsert_token(&supplier.id, "api", "first").await.unwrap();
        upsert_token(&supplier.id, "api", "second").await.unwrap();
        upsert_token(&supplier.id, "api2", "other-region").await.unwrap();

        assert_eq!(
            get_token(&supplier.id, "api").await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(
            get_token(&supplier.id, "api2").await.unwrap().as_deref(),
            Some("other-region")
        );
        assert!(get_token(&supplier.id, "api3").await.unwrap().is_none());

        let rows = get_connection()
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM tecopos_credentials WHERE user_id = ?",
                [supplier.id.clone().into()],
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.try_get::<i64>("", "n").unwrap(), 2);
    }
}
