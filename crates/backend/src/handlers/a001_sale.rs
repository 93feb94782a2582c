use axum::extract::{rejection::QueryRejection, Query};
use axum::Json;
use contracts::domain::a001_sale::{SalesQuery, SalesResponse};

use crate::domain::a001_sale::service;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::suppliers::service as supplier_service;

/// GET /sales?dateFrom=2025-01-01 00:00&dateTo=2025-01-31 23:59&supplierId=12
pub async fn get_sales(
    CurrentUser(claims): CurrentUser,
    query: Result<Query<SalesQuery>, QueryRejection>,
) -> ApiResult<Json<SalesResponse>> {
    let Query(query) = query?;
    tracing::info!(
        "Sales requested by {} for supplier {} ({} .. {})",
        claims.email,
        query.supplier_id,
        query.date_from,
        query.date_to
    );

    let supplier = supplier_service::current(&claims).await?;
    let response = service::fetch_sales(&supplier, query).await?;
    Ok(Json(response))
}
