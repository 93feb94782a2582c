use contracts::system::auth::{SupplierInfo, TecoposLink};
use contracts::system::tecopos::{LinkSupplierRequest, SaveTokenRequest};
use serde_json::Value;

use super::repository;
use crate::shared::crypto::{self, TokenCipher};
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::marketplaces::tecopos::{self, TecoposApiClient};
use crate::system::suppliers::repository as supplier_repository;

fn ensure_region(region: &str) -> ApiResult<()> {
    if tecopos::is_known_region(region) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Unknown Tecopos region: {}", region)))
    }
}

/// Store (encrypted) the Tecopos token the supplier pasted for a region
pub async fn save_token(supplier_id: &str, request: SaveTokenRequest) -> ApiResult<()> {
    ensure_region(&request.region)?;
    let token = request.access_token.trim();
    if token.is_empty() {
        return Err(ApiError::BadRequest("Access token is required.".to_string()));
    }

    let sealed = crypto::cipher()?.encrypt_str(token)?;
    repository::upsert_token(supplier_id, &request.region, &sealed).await?;
    tracing::info!("Saved Tecopos token for supplier {} in region {}", supplier_id, request.region);
    Ok(())
}

/// Attach a Tecopos business/supplier to the local account
pub async fn link_supplier(supplier_id: &str, request: LinkSupplierRequest) -> ApiResult<SupplierInfo> {
    ensure_region(&request.region)?;
    if request.business_id.trim().is_empty() || request.supplier_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Business and supplier are required.".to_string(),
        ));
    }

    let link = TecoposLink {
        region: Some(request.region),
        business_id: Some(request.business_id.trim().to_string()),
        supplier_id: Some(request.supplier_id.trim().to_string()),
        supplier_name: request.supplier_name.filter(|n| !n.trim().is_empty()),
    };
    if !supplier_repository::update_tecopos_link(supplier_id, &link).await? {
        return Err(ApiError::NotFound("Supplier not found.".to_string()));
    }

    supplier_repository::get_by_id(supplier_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Supplier not found.".to_string()))
}

/// What the credential store holds for a (supplier, region) pair
#[derive(Debug, PartialEq)]
pub enum StoredToken {
    Missing,
    /// Sealed with a key this process no longer has
    Unreadable,
    Available(String),
}

/// Decrypt a stored token; a wrong key or damaged value is not fatal
pub fn unseal(cipher: &TokenCipher, sealed: &str) -> StoredToken {
    match cipher.decrypt_str(sealed) {
        Ok(token) => StoredToken::Available(token),
        Err(e) => {
            tracing::warn!("Stored Tecopos token cannot be decrypted: {:#}", e);
            StoredToken::Unreadable
        }
    }
}

pub async fn stored_token(supplier_id: &str, region: &str) -> ApiResult<StoredToken> {
    match repository::get_token(supplier_id, region).await? {
        Some(sealed) => Ok(unseal(crypto::cipher()?, &sealed)),
        None => Ok(StoredToken::Missing),
    }
}

async fn client_for(
    supplier_id: &str,
    region: &str,
    business_id: Option<String>,
) -> ApiResult<TecoposApiClient> {
    ensure_region(region)?;
    let token = match stored_token(supplier_id, region).await? {
        StoredToken::Available(token) => token,
        StoredToken::Missing => {
            return Err(ApiError::NotFound(format!(
                "No Tecopos token saved for region {}",
                region
            )))
        }
        StoredToken::Unreadable => {
            return Err(ApiError::NotFound(format!(
                "The Tecopos token for region {} is no longer valid. Save it again.",
                region
            )))
        }
    };
    Ok(TecoposApiClient::new(region, token, business_id)?)
}

/// Client for live sales when the supplier has a complete link and a usable token
pub async fn sales_client(supplier: &SupplierInfo) -> ApiResult<Option<TecoposApiClient>> {
    let Some(link) = supplier.tecopos.as_ref().filter(|l| l.is_complete()) else {
        return Ok(None);
    };
    let (Some(region), Some(business_id)) = (link.region.as_deref(), link.business_id.clone()) else {
        return Ok(None);
    };
    match stored_token(&supplier.id, region).await? {
        StoredToken::Available(token) => {
            Ok(Some(TecoposApiClient::new(region, token, Some(business_id))?))
        }
        StoredToken::Missing | StoredToken::Unreadable => {
            tracing::warn!(
                "Supplier {} is linked to Tecopos region {} without a usable token, using sample data",
                supplier.id,
                region
            );
            Ok(None)
        }
    }
}

pub async fn list_businesses(supplier_id: &str, region: &str) -> ApiResult<Value> {
    let client = client_for(supplier_id, region, None).await?;
    client
        .list_businesses()
        .await
        .map_err(|e| ApiError::Upstream(format!("{:#}", e)))
}

pub async fn list_suppliers(
    supplier_id: &str,
    region: &str,
    business_id: &str,
    name: &str,
) -> ApiResult<Value> {
    let client = client_for(supplier_id, region, Some(business_id.to_string())).await?;
    client
        .list_suppliers(name)
        .await
        .map_err(|e| ApiError::Upstream(format!("{:#}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support;

    #[test]
    fn token_sealed_with_another_key_is_unreadable() {
        let before_restart = TokenCipher::generate();
        let after_restart = TokenCipher::generate();
        let sealed = before_restart.encrypt_str("tecopos-token").unwrap();

        assert_eq!(
            unseal(&before_restart, &sealed),
            StoredToken::Available("tecopos-token".to_string())
        );
        assert_eq!(unseal(&after_restart, &sealed), StoredToken::Unreadable);
    }

    async fn linked_supplier(tecopos_id: i64) -> SupplierInfo {
        let supplier = test_support::supplier(tecopos_id).await;
        link_supplier(
            &supplier.id,
            LinkSupplierRequest {
                region: "api".into(),
                business_id: "77".into(),
                supplier_id: "5".into(),
                supplier_name: Some("Distribuidora".into()),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn unreadable_token_falls_back_to_sample_data() {
        let supplier = linked_supplier(61).await;
        let foreign = TokenCipher::generate().encrypt_str("old-token").unwrap();
        repository::upsert_token(&supplier.id, "api", &foreign)
            .await
            .unwrap();

        assert!(sales_client(&supplier).await.unwrap().is_none());

        let err = list_businesses(&supplier.id, "api").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn saved_token_enables_live_client() {
        let supplier = linked_supplier(62).await;
        assert!(supplier.tecopos.as_ref().is_some_and(|l| l.is_complete()));
        assert!(sales_client(&supplier).await.unwrap().is_none());

        save_token(
            &supplier.id,
            SaveTokenRequest {
                region: "api".into(),
                access_token: " tecopos-token ".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            stored_token(&supplier.id, "api").await.unwrap(),
            StoredToken::Available("tecopos-token".to_string())
        );
        assert!(sales_client(&supplier).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_region_is_rejected() {
        let supplier = test_support::supplier(63).await;
        let err = save_token(
            &supplier.id,
            SaveTokenRequest {
                region: "api9".into(),
                access_token: "x".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
