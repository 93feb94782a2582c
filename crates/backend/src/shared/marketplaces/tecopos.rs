use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use contracts::domain::a001_sale::SaleProduct;
use serde_json::{json, Value};

use super::SalesSource;

/// Default API hosts per Tecopos region
const DEFAULT_BASES: [(&str, &str); 4] = [
    ("api", "https://api.tecopos.com"),
    ("api2", "https://api2.tecopos.com"),
    ("api3", "https://api3.tecopos.com"),
    ("api4", "https://api4.tecopos.com"),
];

pub fn regions() -> Vec<String> {
    DEFAULT_BASES.iter().map(|(r, _)| r.to_string()).collect()
}

pub fn is_known_region(region: &str) -> bool {
    DEFAULT_BASES.iter().any(|(r, _)| *r == region)
}

/// Base URL for a region without trailing slash.
///
/// `TECOPOS_BASE_<region>` overrides the built-in host.
pub fn base_url(region: &str) -> Result<String> {
    let custom = std::env::var(format!("TECOPOS_BASE_{}", region)).ok();
    let base = custom
        .filter(|v| !v.is_empty())
        .or_else(|| {
            DEFAULT_BASES
                .iter()
                .find(|(r, _)| *r == region)
                .map(|(_, url)| url.to_string())
        })
        .ok_or_else(|| anyhow!("Unknown or unconfigured Tecopos region: {}", region))?;
    Ok(base.trim_end_matches('/').to_string())
}

/// HTTP client for the Tecopos administration and report API
pub struct TecoposApiClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
    business_id: Option<String>,
}

impl TecoposApiClient {
    pub fn new(region: &str, access_token: String, business_id: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url(region)?,
            access_token,
            business_id,
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(format!("{}{}", self.base_url, path)))
    }

    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        // Tecopos expects the token as-is, without a scheme prefix
        let builder = builder.header("Authorization", &self.access_token);
        match &self.business_id {
            Some(id) => builder.header("x-app-businessid", id),
            None => builder,
        }
    }

    /// Businesses reachable with the token
    pub async fn list_businesses(&self) -> Result<Value> {
        let response = self
            .get("/api/v1/administration/my-business")
            .send()
            .await
            .context("Tecopos request failed")?
            .error_for_status()
            .context("Tecopos rejected business listing")?;
        Ok(response.json::<Option<Value>>().await?.unwrap_or_else(|| json!([])))
    }

    /// Suppliers of the current business whose name matches `name_query`
    pub async fn list_suppliers(&self, name_query: &str) -> Result<Value> {
        let response = self
            .get("/api/v1/administration/provider")
            .query(&[("page", "1"), ("name", name_query)])
            .send()
            .await
            .context("Tecopos request failed")?
            .error_for_status()
            .context("Tecopos rejected supplier search")?;
        Ok(response.json::<Option<Value>>().await?.unwrap_or_else(|| json!([])))
    }
}

#[async_trait]
impl SalesSource for TecoposApiClient {
    fn name(&self) -> &'static str {
        "tecopos"
    }

    async fn selled_products(
        &self,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
    ) -> Result<Vec<SaleProduct>> {
        let payload = json!({
            "dateFrom": date_from.format("%Y-%m-%d").to_string(),
            "dateTo": date_to.format("%Y-%m-%d").to_string(),
        });
        let response = self
            .post("/api/v1/report/selled-products")
            .json(&payload)
            .send()
            .await
            .context("Tecopos request failed")?
            .error_for_status()
            .context("Tecopos rejected sold products report")?;
        let body = response.json::<Option<Value>>().await?.unwrap_or(Value::Null);
        let products = parse_selled_products(&body);
        tracing::info!("Tecopos returned {} sold products", products.len());
        Ok(products)
    }
}

/// Map the report body to product rows.
///
/// The report comes either as a bare list or as `{"products": [...]}`;
/// rows without a product id are skipped.
pub fn parse_selled_products(body: &Value) -> Vec<SaleProduct> {
    let rows: &[Value] = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("products")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };

    rows.iter()
        .filter_map(|row| {
            let product_id = row.get("productId").and_then(as_i64)?;
            Some(SaleProduct {
                product_id,
                name: row
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                quantity_sales: row.get("quantitySales").and_then(as_i64).unwrap_or(0),
                total_quantity: row.get("totalQuantity").and_then(as_i64).unwrap_or(0),
                total_sales: row.get("totalSales").map(sum_amounts).unwrap_or(0.0),
                total_sales_main_currency: row
                    .get("totalSalesMainCurrency")
                    .filter(|v| !v.is_null())
                    .map(sum_amounts),
            })
        })
        .collect()
}

fn as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Amounts are either a number, an `{amount}` object or a list of those
fn sum_amounts(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Object(map) => map.get("amount").map(sum_amounts).unwrap_or(0.0),
        Value::Array(items) => items.iter().map(sum_amounts).sum(),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_regions() {
        assert_eq!(regions(), vec!["api", "api2", "api3", "api4"]);
        assert!(is_known_region("api3"));
        assert!(!is_known_region("api9"));
        assert!(base_url("api9").is_err());
    }

    #[test]
    fn parses_bare_list() {
        let body = json!([
            {"productId": 1, "name": "Aceite", "quantitySales": 4, "totalQuantity": 10,
             "totalSales": 20.5, "totalSalesMainCurrency": 5125.0},
            {"name": "sin id", "quantitySales": 1}
        ]);
        let products = parse_selled_products(&body);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity_sales, 4);
        assert_eq!(products[0].total_sales_main_currency, Some(5125.0));
    }

    #[test]
    fn parses_wrapped_list_with_amount_objects() {
        let body = json!({"products": [
            {"productId": "7", "name": "Arroz", "quantitySales": 2.0, "totalQuantity": 3,
             "totalSales": [{"amount": 10.0, "codeCurrency": "CUP"}, {"amount": 2.5, "codeCurrency": "USD"}]}
        ]});
        let products = parse_selled_products(&body);
        assert_eq!(products[0].product_id, 7);
        assert_eq!(products[0].quantity_sales, 2);
        assert!((products[0].total_sales - 12.5).abs() < 1e-9);
        assert_eq!(products[0].total_sales_main_currency, None);
    }

    #[test]
    fn unexpected_body_yields_nothing() {
        assert!(parse_selled_products(&json!("error")).is_empty());
        assert!(parse_selled_products(&Value::Null).is_empty());
    }
}
