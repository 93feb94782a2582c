use async_trait::async_trait;
use chrono::NaiveDateTime;
use contracts::domain::a001_sale::SaleProduct;

use super::SalesSource;

/// Deterministic stand-in for Tecopos, used while a supplier is not linked.
///
/// Always returns the same three products; longer ranges yield more units.
pub struct SimulatedSales;

/// (product id, name, units sold, total quantity, total, total in main currency)
const SAMPLE_PRODUCTS: [(i64, &str, i64, i64, f64, f64); 3] = [
    (137187, "Aceite Mini", 50, 200, 350.0, 87500.0),
    (137188, "Arroz Paquete", 80, 300, 640.0, 160000.0),
    (137189, "Frijoles Bolsa", 30, 120, 240.0, 60000.0),
];

/// One extra batch of units per five days, never less than one
pub fn range_multiplier(date_from: NaiveDateTime, date_to: NaiveDateTime) -> i64 {
    let days = (date_to - date_from).num_days().max(1);
    (days / 5).max(1)
}

pub fn sample_products(multiplier: i64) -> Vec<SaleProduct> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|&(product_id, name, qty, total_qty, total, main)| SaleProduct {
            product_id,
            name: name.to_string(),
            quantity_sales: qty * multiplier,
            total_quantity: total_qty * multiplier,
            total_sales: total * multiplier as f64,
            total_sales_main_currency: Some(main * multiplier as f64),
        })
        .collect()
}

#[async_trait]
impl SalesSource for SimulatedSales {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn selled_products(
        &self,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
    ) -> anyhow::Result<Vec<SaleProduct>> {
        Ok(sample_products(range_multiplier(date_from, date_to)))
    }
}
