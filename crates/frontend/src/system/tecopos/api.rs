use contracts::system::auth::SupplierInfo;
use contracts::system::tecopos::{
    lookup_entries, LinkSupplierRequest, LookupEntry, SaveTokenRequest, StatusResponse,
};
use serde_json::Value;

use crate::shared::http::{get_json, post_json};

pub async fn fetch_regions() -> Result<Vec<String>, String> {
    get_json("/regions", &[]).await
}

pub async fn save_token(region: String, access_token: String) -> Result<StatusResponse, String> {
    post_json("/me/tecopos/save-token", &SaveTokenRequest { region, access_token }).await
}

pub async fn link_supplier(request: LinkSupplierRequest) -> Result<SupplierInfo, String> {
    post_json("/me/link-tecopos-supplier", &request).await
}

pub async fn fetch_businesses(region: String) -> Result<Vec<LookupEntry>, String> {
    let body: Value = get_json("/me/tecopos/businesses", &[("region", region)]).await?;
    Ok(lookup_entries(&body))
}

pub async fn search_suppliers(
    region: String,
    business_id: String,
    name: String,
) -> Result<Vec<LookupEntry>, String> {
    let body: Value = get_json(
        "/me/tecopos/suppliers",
        &[("region", region), ("businessId", business_id), ("name", name)],
    )
    .await?;
    Ok(lookup_entries(&body))
}
