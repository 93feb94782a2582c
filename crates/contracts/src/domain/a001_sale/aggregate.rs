use serde::{Deserialize, Serialize};

/// Timestamp format accepted by `GET /sales` for `dateFrom` / `dateTo`
pub const SALES_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Query string of `GET /sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    /// "YYYY-MM-DD HH:MM" (date-only is accepted as well)
    pub date_from: String,
    pub date_to: String,
    pub supplier_id: i64,
}

/// Per-product sales aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleProduct {
    pub product_id: i64,
    pub name: String,
    /// Units sold in the period
    pub quantity_sales: i64,
    pub total_quantity: i64,
    pub total_sales: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sales_main_currency: Option<f64>,
}

impl SaleProduct {
    /// Revenue in the main currency, falling back to the plain total
    pub fn revenue(&self) -> f64 {
        self.total_sales_main_currency.unwrap_or(self.total_sales)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    pub sale_id: String,
    pub products: Vec<SaleProduct>,
    pub total_sales: f64,
    pub total_units: i64,
}

/// Sums of a product list as stored with every sale
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesTotals {
    pub total_sales: f64,
    pub total_units: i64,
}

impl SalesTotals {
    pub fn from_products(products: &[SaleProduct]) -> Self {
        products.iter().fold(Self::default(), |acc, p| Self {
            total_sales: acc.total_sales + p.revenue(),
            total_units: acc.total_units + p.quantity_sales,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(qty: i64, total: f64, main: Option<f64>) -> SaleProduct {
        SaleProduct {
            product_id: qty,
            name: format!("P{}", qty),
            quantity_sales: qty,
            total_quantity: qty * 4,
            total_sales: total,
            total_sales_main_currency: main,
        }
    }

    #[test]
    fn totals_prefer_main_currency() {
        let products = vec![
            product(5, 10.0, Some(2500.0)),
            product(3, 7.5, None),
        ];
        let totals = SalesTotals::from_products(&products);
        assert_eq!(totals.total_units, 8);
        assert!((totals.total_sales - 2507.5).abs() < 1e-9);
    }

    #[test]
    fn empty_products_have_zero_totals() {
        assert_eq!(SalesTotals::from_products(&[]), SalesTotals::default());
    }

    #[test]
    fn sales_query_serializes_camel_case() {
        let q = SalesQuery {
            date_from: "2025-03-01 00:00".into(),
            date_to: "2025-03-31 23:59".into(),
            supplier_id: 137,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["dateFrom"], "2025-03-01 00:00");
        assert_eq!(json["supplierId"], 137);
    }
}
