use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, Json};
use contracts::domain::a002_conciliation::{Conciliation, ConciliationCreate};

use crate::domain::a002_conciliation::service;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;

/// GET /conciliations
pub async fn list(CurrentUser(claims): CurrentUser) -> ApiResult<Json<Vec<Conciliation>>> {
    let items = service::list(&claims.sub).await?;
    tracing::info!("Returning {} conciliations for {}", items.len(), claims.email);
    Ok(Json(items))
}

/// POST /conciliations
pub async fn create(
    CurrentUser(claims): CurrentUser,
    dto: Result<Json<ConciliationCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Conciliation>)> {
    let Json(dto) = dto?;
    let conciliation = service::create(&claims.sub, dto).await?;
    Ok((StatusCode::CREATED, Json(conciliation)))
}
