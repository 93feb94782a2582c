use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::shared::config::get_config;

/// Issue an access token for the supplier using the configured secret and lifetime
pub fn generate_access_token(supplier_id: &str, email: &str) -> Result<String> {
    let auth = &get_config().auth;
    encode_token(
        supplier_id,
        email,
        auth.token_lifetime_minutes,
        &auth.jwt_secret,
    )
}

/// Validate an access token against the configured secret
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    decode_token(token, &get_config().auth.jwt_secret)
}

pub fn encode_token(
    supplier_id: &str,
    email: &str,
    lifetime_minutes: i64,
    secret: &str,
) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::minutes(lifetime_minutes)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: supplier_id.to_string(),
        email: email.to_string(),
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_token(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}
