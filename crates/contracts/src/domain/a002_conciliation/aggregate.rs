use serde::{Deserialize, Serialize};

/// Body of `POST /conciliations`: the sale the conciliation is derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConciliationCreate {
    pub sale_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conciliation {
    pub id: String,
    pub range_label: String,
    pub orders: i64,
    pub sales_qty: i64,
    pub revenue: f64,
    pub discounts: f64,
    pub total: f64,
    pub created_at: String,
}
