use contracts::domain::a002_conciliation::{Conciliation, ConciliationCreate};

use crate::shared::http::{get_json, post_json};

pub async fn fetch_conciliations() -> Result<Vec<Conciliation>, String> {
    get_json("/conciliations", &[]).await
}

/// Save a conciliation for a downloaded sale
pub async fn create_conciliation(sale_id: String) -> Result<Conciliation, String> {
    post_json("/conciliations", &ConciliationCreate { sale_id }).await
}
