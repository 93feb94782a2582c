pub mod simulated;
pub mod tecopos;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use contracts::domain::a001_sale::SaleProduct;

/// Where supplier sales come from
#[async_trait]
pub trait SalesSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Products sold by the supplier within `[date_from, date_to]`
    async fn selled_products(
        &self,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
    ) -> anyhow::Result<Vec<SaleProduct>>;
}
