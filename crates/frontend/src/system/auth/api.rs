use contracts::system::auth::{LoginRequest, RegisterRequest, SupplierInfo, TokenResponse};

use crate::shared::http::{get_json, post_json};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<TokenResponse, String> {
    post_json("/auth/login", &LoginRequest { email, password }).await
}

/// Create a supplier account
pub async fn register(request: RegisterRequest) -> Result<SupplierInfo, String> {
    post_json("/auth/register", &request).await
}

/// Profile behind the stored token
pub async fn get_current_user() -> Result<SupplierInfo, String> {
    get_json("/me", &[]).await
}
