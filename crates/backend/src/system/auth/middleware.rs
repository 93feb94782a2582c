use axum::{
    body::Body,
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

use crate::shared::error::ApiError;

/// Middleware that requires a valid bearer token.
///
/// The decoded claims are stored in request extensions for `CurrentUser`.
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let claims = super::jwt::validate_token(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {:#}", e);
        ApiError::Unauthorized("Could not validate credentials".to_string())
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Token part of an `Authorization: Bearer <token>` header value
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
