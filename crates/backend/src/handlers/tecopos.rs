use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use contracts::system::auth::SupplierInfo;
use contracts::system::tecopos::{
    BusinessesQuery, LinkSupplierRequest, SaveTokenRequest, StatusResponse, SuppliersQuery,
};
use serde_json::Value;

use crate::shared::error::ApiResult;
use crate::shared::marketplaces::tecopos;
use crate::system::auth::extractor::CurrentUser;
use crate::system::tecopos::service;

/// GET /regions
pub async fn list_regions() -> Json<Vec<String>> {
    Json(tecopos::regions())
}

/// POST /me/tecopos/save-token
pub async fn save_token(
    CurrentUser(claims): CurrentUser,
    request: Result<Json<SaveTokenRequest>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Json(request) = request?;
    service::save_token(&claims.sub, request).await?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /me/link-tecopos-supplier
pub async fn link_supplier(
    CurrentUser(claims): CurrentUser,
    request: Result<Json<LinkSupplierRequest>, JsonRejection>,
) -> ApiResult<Json<SupplierInfo>> {
    let Json(request) = request?;
    let supplier = service::link_supplier(&claims.sub, request).await?;
    tracing::info!("Supplier {} linked to Tecopos", supplier.email);
    Ok(Json(supplier))
}

/// GET /me/tecopos/businesses?region=api
pub async fn list_businesses(
    CurrentUser(claims): CurrentUser,
    query: Result<Query<BusinessesQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    Ok(Json(service::list_businesses(&claims.sub, &query.region).await?))
}

/// GET /me/tecopos/suppliers?region=api&businessId=1&name=acme
pub async fn list_suppliers(
    CurrentUser(claims): CurrentUser,
    query: Result<Query<SuppliersQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    let suppliers =
        service::list_suppliers(&claims.sub, &query.region, &query.business_id, &query.name)
            .await?;
    Ok(Json(suppliers))
}
