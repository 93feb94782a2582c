use anyhow::{Context, Result};
use contracts::domain::a002_conciliation::Conciliation;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

fn map_row(row: &QueryResult) -> Result<Conciliation> {
    Ok(Conciliation {
        id: row.try_get("", "id")?,
        range_label: row.try_get("", "range_label")?,
        orders: row.try_get("", "orders")?,
        sales_qty: row.try_get("", "sales_qty")?,
        revenue: row.try_get("", "revenue")?,
        discounts: row.try_get("", "discounts")?,
        total: row.try_get("", "total")?,
        created_at: row.try_get("", "created_at")?,
    })
}

pub async fn insert(supplier_id: &str, conciliation: &Conciliation) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO conciliations (id, supplier_id, range_label, orders, sales_qty, revenue, discounts, total, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            conciliation.id.clone().into(),
            supplier_id.into(),
            conciliation.range_label.clone().into(),
            conciliation.orders.into(),
            conciliation.sales_qty.into(),
            conciliation.revenue.into(),
            conciliation.discounts.into(),
            conciliation.total.into(),
            conciliation.created_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert conciliation")?;

    Ok(())
}

/// Conciliations of the supplier, newest first
pub async fn list_for_supplier(supplier_id: &str) -> Result<Vec<Conciliation>> {
    let conn = get_connection();

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, range_label, orders, sales_qty, revenue, discounts, total, created_at
             FROM conciliations
             WHERE supplier_id = ?
             ORDER BY created_at DESC, rowid DESC",
            [supplier_id.into()],
        ))
        .await?;

    rows.iter().map(map_row).collect()
}
