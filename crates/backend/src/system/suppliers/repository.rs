use anyhow::{Context, Result};
use contracts::system::auth::{SupplierInfo, TecoposLink};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const SUPPLIER_COLUMNS: &str = "id, email, name, supplier_id_tecopos, created_at, \
     tecopos_region, tecopos_business_id, tecopos_supplier_id, tecopos_supplier_name";

fn map_row(row: &QueryResult) -> Result<SupplierInfo> {
    let link = TecoposLink {
        region: row.try_get("", "tecopos_region")?,
        business_id: row.try_get("", "tecopos_business_id")?,
        supplier_id: row.try_get("", "tecopos_supplier_id")?,
        supplier_name: row.try_get("", "tecopos_supplier_name")?,
    };
    let has_link = link.region.is_some()
        || link.business_id.is_some()
        || link.supplier_id.is_some()
        || link.supplier_name.is_some();

    Ok(SupplierInfo {
        id: row.try_get("", "id")?,
        email: row.try_get("", "email")?,
        name: row.try_get("", "name")?,
        supplier_id_tecopos: row.try_get("", "supplier_id_tecopos")?,
        created_at: row.try_get("", "created_at")?,
        tecopos: has_link.then_some(link),
    })
}

/// Create supplier with password hash
pub async fn create_with_password(supplier: &SupplierInfo, password_hash: &str) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO suppliers (id, email, name, password_hash, supplier_id_tecopos, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        [
            supplier.id.clone().into(),
            supplier.email.clone().into(),
            supplier.name.clone().into(),
            password_hash.to_string().into(),
            supplier.supplier_id_tecopos.into(),
            supplier.created_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert supplier")?;

    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<SupplierInfo>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM suppliers WHERE id = ?", SUPPLIER_COLUMNS),
            [id.into()],
        ))
        .await?;

    result.as_ref().map(map_row).transpose()
}

pub async fn get_by_email(email: &str) -> Result<Option<SupplierInfo>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM suppliers WHERE lower(email) = lower(?)",
                SUPPLIER_COLUMNS
            ),
            [email.into()],
        ))
        .await?;

    result.as_ref().map(map_row).transpose()
}

pub async fn get_password_hash(supplier_id: &str) -> Result<Option<String>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM suppliers WHERE id = ?",
            [supplier_id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

pub async fn update_tecopos_link(supplier_id: &str, link: &TecoposLink) -> Result<bool> {
    let conn = get_connection();

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE suppliers
             SET tecopos_region = ?, tecopos_business_id = ?, tecopos_supplier_id = ?, tecopos_supplier_name = ?
             WHERE id = ?",
            [
                link.region.clone().into(),
                link.business_id.clone().into(),
                link.supplier_id.clone().into(),
                link.supplier_name.clone().into(),
                supplier_id.into(),
            ],
        ))
        .await
        .context("Failed to update Tecopos link")?;

    Ok(result.rows_affected() > 0)
}
