use contracts::projections::p900_inventory::InventoryItem;

use crate::shared::http::get_json;

/// Latest stock per product
pub async fn fetch_inventory() -> Result<Vec<InventoryItem>, String> {
    get_json("/inventory", &[]).await
}
