use chrono::Utc;
use contracts::system::auth::{RegisterRequest, SupplierInfo, TokenClaims};

use super::repository;
use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::password;

/// Register a new supplier account
pub async fn register(dto: RegisterRequest) -> ApiResult<SupplierInfo> {
    let email = dto.email.trim().to_string();
    let name = dto.name.trim().to_string();

    if email.is_empty() || name.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and name are required.".to_string(),
        ));
    }
    if !is_plausible_email(&email) {
        return Err(ApiError::BadRequest("Invalid email format.".to_string()));
    }
    password::validate_password_strength(&dto.password)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if repository::get_by_email(&email).await?.is_some() {
        return Err(ApiError::BadRequest(
            "A user with this email already exists.".to_string(),
        ));
    }

    let password_hash = password::hash_password(&dto.password)?;

    let supplier = SupplierInfo {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        name,
        supplier_id_tecopos: dto.supplier_id_tecopos,
        created_at: Utc::now().to_rfc3339(),
        tecopos: None,
    };

    repository::create_with_password(&supplier, &password_hash).await?;
    tracing::info!("Registered supplier {} ({})", supplier.email, supplier.id);

    Ok(supplier)
}

/// Profile behind a validated token; a deleted account counts as unauthenticated
pub async fn current(claims: &TokenClaims) -> ApiResult<SupplierInfo> {
    repository::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".to_string()))
}

/// Verify supplier credentials (for login)
pub async fn verify_credentials(email: &str, password: &str) -> ApiResult<Option<SupplierInfo>> {
    let supplier = match repository::get_by_email(email.trim()).await? {
        Some(s) => s,
        None => return Ok(None),
    };

    let hash = match repository::get_password_hash(&supplier.id).await? {
        Some(h) => h,
        None => return Ok(None),
    };

    if password::verify_password(password, &hash)? {
        Ok(Some(supplier))
    } else {
        Ok(None)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_plausible_email("ana@tienda.cu"));
        assert!(!is_plausible_email("ana.tienda.cu"));
        assert!(!is_plausible_email("@tienda.cu"));
        assert!(!is_plausible_email("ana@localhost"));
    }
}
