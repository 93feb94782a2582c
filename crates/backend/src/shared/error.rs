use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::system::auth::ErrorBody;

/// Error returned by HTTP handlers, rendered as `{"detail": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// Bad login credentials: 400 plus a `WWW-Authenticate` challenge
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Tecopos request failed: {0}")]
    Upstream(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!("Internal error: {:#}", e);
        }
        let challenge = matches!(self, Self::InvalidCredentials(_) | Self::Unauthorized(_));
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });

        if challenge {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Malformed query strings get the same `{"detail"}` body as every other error
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_variants() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("db path /secret leaked"));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn login_failure_carries_bearer_challenge() {
        let response = ApiError::InvalidCredentials("Incorrect email or password".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct RangeQuery {
        date_from: String,
        supplier_id: i64,
    }

    #[tokio::test]
    async fn bad_query_becomes_json_detail() {
        let uri: axum::http::Uri = "/sales?dateFrom=2025-01-01&supplierId=abc".parse().unwrap();
        let rejection = axum::extract::Query::<RangeQuery>::try_from_uri(&uri).unwrap_err();

        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(body.detail.contains("deserialize"), "{}", body.detail);
    }

    #[test]
    fn missing_query_field_is_bad_request() {
        let uri: axum::http::Uri = "/sales?supplierId=12".parse().unwrap();
        let rejection = axum::extract::Query::<RangeQuery>::try_from_uri(&uri).unwrap_err();
        assert!(matches!(ApiError::from(rejection), ApiError::BadRequest(_)));
    }
}
