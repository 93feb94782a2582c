use chrono::{NaiveDateTime, Utc};
use contracts::domain::a002_conciliation::{Conciliation, ConciliationCreate};

use super::repository;
use crate::domain::a001_sale::repository::{self as sale_repository, SaleRecord};
use crate::shared::error::{ApiError, ApiResult};

/// "01 Mar 2025 – 31 Mar 2025"
pub fn range_label(from: NaiveDateTime, to: NaiveDateTime) -> String {
    format!("{} \u{2013} {}", from.format("%d %b %Y"), to.format("%d %b %Y"))
}

/// Summary figures of a stored sale. Sample data carries no discounts.
pub fn summarize(sale: &SaleRecord) -> Conciliation {
    let revenue = sale.totals.total_sales;
    let discounts = 0.0;
    Conciliation {
        id: uuid::Uuid::new_v4().to_string(),
        range_label: range_label(sale.date_from, sale.date_to),
        orders: sale.products.len() as i64,
        sales_qty: sale.products.iter().map(|p| p.quantity_sales).sum(),
        revenue,
        discounts,
        total: revenue - discounts,
        created_at: Utc::now().to_rfc3339(),
    }
}

pub async fn create(supplier_id: &str, dto: ConciliationCreate) -> ApiResult<Conciliation> {
    let sale = sale_repository::get_for_supplier(&dto.sale_id, supplier_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sale not found.".to_string()))?;

    let conciliation = summarize(&sale);
    repository::insert(supplier_id, &conciliation).await?;
    tracing::info!(
        "Conciliation {} created for sale {} ({})",
        conciliation.id,
        sale.id,
        conciliation.range_label
    );
    Ok(conciliation)
}

pub async fn list(supplier_id: &str) -> anyhow::Result<Vec<Conciliation>> {
    repository::list_for_supplier(supplier_id).await
}
