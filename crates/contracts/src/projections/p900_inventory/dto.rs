use serde::{Deserialize, Serialize};

/// Latest known stock of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub product_id: i64,
    pub name: String,
    pub total_quantity: i64,
}
