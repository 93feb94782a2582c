use contracts::domain::a001_sale::{SalesQuery, SalesResponse};

use crate::shared::http::get_json;

/// Sold products of the supplier for the range
pub async fn fetch_sales(query: &SalesQuery) -> Result<SalesResponse, String> {
    get_json(
        "/sales",
        &[
            ("dateFrom", query.date_from.clone()),
            ("dateTo", query.date_to.clone()),
            ("supplierId", query.supplier_id.to_string()),
        ],
    )
    .await
}
