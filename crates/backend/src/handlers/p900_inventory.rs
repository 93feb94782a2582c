use axum::Json;
use contracts::projections::p900_inventory::InventoryItem;

use crate::projections::p900_inventory::service;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;

/// GET /inventory
pub async fn get_inventory(CurrentUser(claims): CurrentUser) -> ApiResult<Json<Vec<InventoryItem>>> {
    let items = service::get_inventory(&claims.sub).await?;
    Ok(Json(items))
}
