use anyhow::{Context, Result};
use chrono::Utc;
use contracts::domain::a001_sale::SaleProduct;
use contracts::projections::p900_inventory::InventoryItem;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Append one snapshot row per product of a downloaded sale
pub async fn insert_snapshots<C: ConnectionTrait>(
    conn: &C,
    supplier_id: &str,
    products: &[SaleProduct],
) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    for product in products {
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO inventory_snapshots (id, supplier_id, product_id, name, total_quantity, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            [
                uuid::Uuid::new_v4().to_string().into(),
                supplier_id.into(),
                product.product_id.into(),
                product.name.clone().into(),
                product.total_quantity.into(),
                now.clone().into(),
            ],
        ))
        .await
        .with_context(|| format!("Failed to insert snapshot for product {}", product.product_id))?;
    }
    Ok(())
}

/// Most recent snapshot of every product of the supplier
pub async fn latest_for_supplier(supplier_id: &str) -> Result<Vec<InventoryItem>> {
    let conn = get_connection();

    // rowid grows with insertion order, so MAX(rowid) is the newest snapshot
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT s.product_id, s.name, s.total_quantity
             FROM inventory_snapshots s
             JOIN (
                SELECT product_id, MAX(rowid) AS last_rowid
                FROM inventory_snapshots
                WHERE supplier_id = ?
                GROUP BY product_id
             ) latest ON latest.last_rowid = s.rowid
             ORDER BY s.product_id",
            [supplier_id.into()],
        ))
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(InventoryItem {
            product_id: row.try_get("", "product_id")?,
            name: row.try_get("", "name")?,
            total_quantity: row.try_get("", "total_quantity")?,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support;

    fn product(id: i64, total_quantity: i64) -> SaleProduct {
        SaleProduct {
            product_id: id,
            name: format!("P{}", id),
            quantity_sales: 1,
            total_quantity,
            total_sales: 1.0,
            total_sales_main_currency: None,
        }
    }

    #[tokio::test]
    async fn newest_snapshot_wins_per_product() {
        let supplier = test_support::supplier(41).await;
        let other = test_support::supplier(42).await;
        let conn = get_connection();

        insert_snapshots(conn, &supplier.id, &[product(1, 10), product(2, 20)])
            .await
            .unwrap();
        insert_snapshots(conn, &supplier.id, &[product(1, 7)])
            .await
            .unwrap();
        insert_snapshots(conn, &other.id, &[product(1, 99)])
            .await
            .unwrap();

        let items = latest_for_supplier(&supplier.id).await.unwrap();
        let quantities: Vec<(i64, i64)> = items
            .iter()
            .map(|i| (i.product_id, i.total_quantity))
            .collect();
        assert_eq!(quantities, vec![(1, 7), (2, 20)]);
    }
}
