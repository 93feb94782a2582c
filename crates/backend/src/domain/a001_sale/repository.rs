use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use contracts::domain::a001_sale::{SaleProduct, SalesTotals};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Stored form of a downloaded sale
#[derive(Debug, Clone)]
pub struct SaleRecord {
    pub id: String,
    pub supplier_id: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub products: Vec<SaleProduct>,
    pub totals: SalesTotals,
}

/// JSON payload of the `data` column
#[derive(Debug, Serialize, Deserialize)]
struct SalePayload {
    products: Vec<SaleProduct>,
}

const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn insert<C: ConnectionTrait>(conn: &C, sale: &SaleRecord) -> Result<()> {
    let data = serde_json::to_string(&SalePayload {
        products: sale.products.clone(),
    })?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sales (id, supplier_id, date_from, date_to, data, total_sales, total_units, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        [
            sale.id.clone().into(),
            sale.supplier_id.clone().into(),
            sale.date_from.format(DB_DATETIME_FORMAT).to_string().into(),
            sale.date_to.format(DB_DATETIME_FORMAT).to_string().into(),
            data.into(),
            sale.totals.total_sales.into(),
            sale.totals.total_units.into(),
            Utc::now().to_rfc3339().into(),
        ],
    ))
    .await
    .context("Failed to insert sale")?;

    Ok(())
}

/// Sale by id, only if it belongs to the supplier
pub async fn get_for_supplier(sale_id: &str, supplier_id: &str) -> Result<Option<SaleRecord>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, supplier_id, date_from, date_to, data, total_sales, total_units
             FROM sales WHERE id = ? AND supplier_id = ?",
            [sale_id.into(), supplier_id.into()],
        ))
        .await?;

    let Some(row) = result else {
        return Ok(None);
    };

    let date_from: String = row.try_get("", "date_from")?;
    let date_to: String = row.try_get("", "date_to")?;
    let data: String = row.try_get("", "data")?;
    let payload: SalePayload =
        serde_json::from_str(&data).context("Stored sale payload is not valid JSON")?;

    Ok(Some(SaleRecord {
        id: row.try_get("", "id")?,
        supplier_id: row.try_get("", "supplier_id")?,
        date_from: NaiveDateTime::parse_from_str(&date_from, DB_DATETIME_FORMAT)?,
        date_to: NaiveDateTime::parse_from_str(&date_to, DB_DATETIME_FORMAT)?,
        products: payload.products,
        totals: SalesTotals {
            total_sales: row.try_get("", "total_sales")?,
            total_units: row.try_get("", "total_units")?,
        },
    }))
}
