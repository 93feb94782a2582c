//! Authorized requests to the backend
//!
//! Every request built here carries `Authorization: Bearer <token>` when a
//! token is stored. Failures come back as human-readable strings.

use contracts::system::auth::ErrorBody;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

fn get_auth_header() -> Option<String> {
    storage::get_access_token().map(|token| format!("Bearer {}", token))
}

/// Attach the bearer header if a token is stored
pub fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match get_auth_header() {
        Some(header) => builder.header("Authorization", &header),
        None => builder,
    }
}

/// GET `path` (with optional query pairs) and parse the JSON body
pub async fn get_json<T: DeserializeOwned>(path: &str, query: &[(&str, String)]) -> Result<T, String> {
    let url = format!("{}{}", api_url(path), query_string(query));

    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    parse_response(path, response).await
}

/// POST a JSON body to `path` and parse the JSON answer
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    parse_response(path, response).await
}

async fn parse_response<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let detail = response.json::<ErrorBody>().await.ok().map(|b| b.detail);
        return Err(error_message(path, status, detail));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// `?a=1&b=x%20y`, or nothing for an empty list
fn query_string(query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    format!("?{}", pairs.join("&"))
}

fn error_message(path: &str, status: u16, detail: Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!("{} failed ({}): {}", path, status, detail),
        _ => format!("{} failed: {}", path, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_encoded() {
        let query = [
            ("dateFrom", "2025-01-01 00:00".to_string()),
            ("supplierId", "12".to_string()),
        ];
        assert_eq!(
            query_string(&query),
            "?dateFrom=2025-01-01%2000%3A00&supplierId=12"
        );
        assert_eq!(query_string(&[]), "");
    }

    #[test]
    fn error_message_includes_backend_detail() {
        assert_eq!(
            error_message("/sales", 403, Some("not yours".into())),
            "/sales failed (403): not yours"
        );
        assert_eq!(error_message("/me", 401, None), "/me failed: 401");
    }
}
