use contracts::projections::p900_inventory::InventoryItem;

use super::repository;

pub async fn get_inventory(supplier_id: &str) -> anyhow::Result<Vec<InventoryItem>> {
    repository::latest_for_supplier(supplier_id).await
}
