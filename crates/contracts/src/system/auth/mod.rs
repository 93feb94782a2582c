use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// OAuth-style token body returned by `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: default_token_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    /// Supplier identifier on the Tecopos side
    pub supplier_id_tecopos: i64,
    pub password: String,
}

/// Profile of the authenticated supplier (`GET /me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub supplier_id_tecopos: i64,
    pub created_at: String,
    #[serde(default)]
    pub tecopos: Option<TecoposLink>,
}

/// Linkage between the local supplier and its Tecopos counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TecoposLink {
    pub region: Option<String>,
    pub business_id: Option<String>,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
}

impl TecoposLink {
    /// A link is usable for live sales once both region and business are set
    pub fn is_complete(&self) -> bool {
        self.region.as_deref().is_some_and(|r| !r.is_empty())
            && self.business_id.as_deref().is_some_and(|b| !b.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // supplier id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Error body produced by the backend for every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn supplier_info_uses_camel_case() {
        let info = SupplierInfo {
            id: "s-1".into(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
            supplier_id_tecopos: 42,
            created_at: "2025-01-01T00:00:00Z".into(),
            tecopos: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["supplierIdTecopos"], 42);
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn incomplete_link_is_not_usable() {
        let mut link = TecoposLink {
            region: Some("api2".into()),
            business_id: None,
            supplier_id: None,
            supplier_name: None,
        };
        assert!(!link.is_complete());
        link.business_id = Some("77".into());
        assert!(link.is_complete());
    }
}
