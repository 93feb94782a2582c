use chrono::{NaiveDate, NaiveDateTime};
use contracts::domain::a001_sale::{SalesQuery, SalesResponse, SalesTotals, SALES_DATETIME_FORMAT};
use contracts::system::auth::SupplierInfo;
use sea_orm::TransactionTrait;

use super::repository::{self, SaleRecord};
use crate::projections::p900_inventory::repository as inventory_repository;
use crate::shared::data::db::get_connection;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::marketplaces::simulated::SimulatedSales;
use crate::shared::marketplaces::SalesSource;
use crate::system::tecopos::service as tecopos_service;

/// Parse `YYYY-MM-DD HH:MM`, falling back to the date part at midnight
pub fn parse_sales_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, SALES_DATETIME_FORMAT) {
        return Some(dt);
    }
    let date_part = value.split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// A supplier may only query its own Tecopos supplier id
pub fn ensure_own_supplier(supplier: &SupplierInfo, requested_id: i64) -> ApiResult<()> {
    if supplier.supplier_id_tecopos == requested_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You are not allowed to access other suppliers' data.".to_string(),
        ))
    }
}

/// Download the supplier's sales for the range, store them and refresh inventory
pub async fn fetch_sales(supplier: &SupplierInfo, query: SalesQuery) -> ApiResult<SalesResponse> {
    ensure_own_supplier(supplier, query.supplier_id)?;

    let date_from = parse_sales_datetime(&query.date_from)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid dateFrom: {}", query.date_from)))?;
    let date_to = parse_sales_datetime(&query.date_to)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid dateTo: {}", query.date_to)))?;
    if date_from > date_to {
        return Err(ApiError::BadRequest(
            "dateFrom must not be after dateTo.".to_string(),
        ));
    }

    let source: Box<dyn SalesSource> = match tecopos_service::sales_client(supplier).await? {
        Some(client) => Box::new(client),
        None => Box::new(SimulatedSales),
    };

    let products = source
        .selled_products(date_from, date_to)
        .await
        .map_err(|e| ApiError::Upstream(format!("{:#}", e)))?;
    let totals = SalesTotals::from_products(&products);

    tracing::info!(
        "Sales for supplier {} from {} ({} .. {}): {} products, {} units",
        supplier.id,
        source.name(),
        date_from,
        date_to,
        products.len(),
        totals.total_units
    );

    let sale = SaleRecord {
        id: uuid::Uuid::new_v4().to_string(),
        supplier_id: supplier.id.clone(),
        date_from,
        date_to,
        products,
        totals,
    };

    let txn = get_connection().begin().await.map_err(anyhow::Error::from)?;
    repository::insert(&txn, &sale).await?;
    inventory_repository::insert_snapshots(&txn, &supplier.id, &sale.products).await?;
    txn.commit().await.map_err(anyhow::Error::from)?;

    Ok(SalesResponse {
        sale_id: sale.id,
        products: sale.products,
        total_sales: totals.total_sales,
        total_units: totals.total_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support;

    #[test]
    fn parses_full_timestamp() {
        let dt = parse_sales_datetime("2025-03-01 13:45").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-01 13:45");
    }

    #[test]
    fn falls_back_to_date_only() {
        let dt = parse_sales_datetime("2025-03-01").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-01 00:00");
        let dt = parse_sales_datetime("2025-03-01 9am").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_sales_datetime("01/03/2025").is_none());
        assert!(parse_sales_datetime("").is_none());
    }

    fn profile(supplier_id_tecopos: i64) -> SupplierInfo {
        SupplierInfo {
            id: "sup-1".into(),
            email: "ana@tienda.cu".into(),
            name: "Ana".into(),
            supplier_id_tecopos,
            created_at: "2025-01-01T00:00:00Z".into(),
            tecopos: None,
        }
    }

    #[test]
    fn other_supplier_id_is_forbidden() {
        let err = ensure_own_supplier(&profile(12), 13).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
        assert!(ensure_own_supplier(&profile(12), 12).is_ok());
    }

    fn query(from: &str, to: &str, supplier_id: i64) -> SalesQuery {
        SalesQuery {
            date_from: from.into(),
            date_to: to.into(),
            supplier_id,
        }
    }

    #[tokio::test]
    async fn mismatched_supplier_stores_nothing() {
        let supplier = test_support::supplier(21).await;
        let err = fetch_sales(&supplier, query("2025-01-01 00:00", "2025-01-31 23:59", 22))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert!(inventory_repository::latest_for_supplier(&supplier.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn inverted_range_is_bad_request() {
        let supplier = test_support::supplier(23).await;
        let err = fetch_sales(&supplier, query("2025-02-01 00:00", "2025-01-01 23:59", 23))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unlinked_supplier_gets_stored_sample_sale() {
        let supplier = test_support::supplier(24).await;
        // 30 days -> multiplier 6
        let response = fetch_sales(&supplier, query("2025-01-01 00:00", "2025-01-31 23:59", 24))
            .await
            .unwrap();
        assert_eq!(response.products.len(), 3);
        assert_eq!(response.total_units, 160 * 6);
        assert!((response.total_sales - 307_500.0 * 6.0).abs() < 1e-6);

        let stored = repository::get_for_supplier(&response.sale_id, &supplier.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.totals.total_units, response.total_units);
        assert!(repository::get_for_supplier(&response.sale_id, "someone-else")
            .await
            .unwrap()
            .is_none());

        let inventory = inventory_repository::latest_for_supplier(&supplier.id)
            .await
            .unwrap();
        assert_eq!(inventory.len(), 3);
    }
}
