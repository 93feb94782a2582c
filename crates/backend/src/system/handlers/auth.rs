use axum::extract::{rejection::JsonRejection, Json};
use axum::http::StatusCode;
use contracts::system::auth::{LoginRequest, RegisterRequest, SupplierInfo, TokenResponse};

use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, suppliers::service as supplier_service};

/// POST /auth/register
pub async fn register(
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SupplierInfo>)> {
    let Json(request) = request?;
    let supplier = supplier_service::register(request).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// POST /auth/login
pub async fn login(
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(request) = request?;
    let supplier = supplier_service::verify_credentials(&request.email, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login for {}", request.email);
            ApiError::InvalidCredentials("Incorrect email or password".to_string())
        })?;

    let access_token = jwt::generate_access_token(&supplier.id, &supplier.email)?;
    tracing::info!("Supplier {} logged in", supplier.email);

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// GET /me (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> ApiResult<Json<SupplierInfo>> {
    Ok(Json(supplier_service::current(&claims).await?))
}
