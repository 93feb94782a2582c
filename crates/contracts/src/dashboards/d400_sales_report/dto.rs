use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::a001_sale::{SaleProduct, SalesQuery, SalesResponse};

/// Raw values of the report form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportForm {
    /// "YYYY-MM-DD"
    pub date_from: String,
    /// "YYYY-MM-DD"
    pub date_to: String,
    pub supplier_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportValidationError {
    MissingDates,
    InvalidDate(String),
    InvertedRange,
    MissingSupplier,
    InvalidSupplier(String),
}

impl fmt::Display for ReportValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDates => write!(f, "Seleccione la fecha de inicio y la fecha de fin."),
            Self::InvalidDate(value) => write!(f, "Fecha no válida: {}", value),
            Self::InvertedRange => {
                write!(f, "La fecha de inicio no puede ser posterior a la fecha de fin.")
            }
            Self::MissingSupplier => write!(f, "Indique el ID de proveedor."),
            Self::InvalidSupplier(value) => {
                write!(f, "El ID de proveedor debe ser numérico: {}", value)
            }
        }
    }
}

impl std::error::Error for ReportValidationError {}

impl ReportForm {
    /// Check the form locally and build the query for `GET /sales`.
    ///
    /// Nothing is sent to the backend unless this returns `Ok`.
    pub fn validate(&self) -> Result<SalesQuery, ReportValidationError> {
        let from_raw = self.date_from.trim();
        let to_raw = self.date_to.trim();
        if from_raw.is_empty() || to_raw.is_empty() {
            return Err(ReportValidationError::MissingDates);
        }

        let from = parse_date(from_raw)?;
        let to = parse_date(to_raw)?;
        if from > to {
            return Err(ReportValidationError::InvertedRange);
        }

        let supplier_raw = self.supplier_id.trim();
        if supplier_raw.is_empty() {
            return Err(ReportValidationError::MissingSupplier);
        }
        let supplier_id = supplier_raw
            .parse::<i64>()
            .map_err(|_| ReportValidationError::InvalidSupplier(supplier_raw.to_string()))?;

        Ok(SalesQuery {
            date_from: format!("{} 00:00", from.format("%Y-%m-%d")),
            date_to: format!("{} 23:59", to.format("%Y-%m-%d")),
            supplier_id,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ReportValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ReportValidationError::InvalidDate(value.to_string()))
}

/// Aggregate cards shown above the report tables
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub row_count: usize,
    pub total_units: i64,
    pub total_revenue: f64,
    pub average_price: String,
}

impl ReportSummary {
    pub fn from_response(response: &SalesResponse) -> Self {
        Self {
            row_count: response.products.len(),
            total_units: response.total_units,
            total_revenue: response.total_sales,
            average_price: average_price_label(response.total_sales, response.total_units),
        }
    }
}

/// Average price per unit with two decimals, `"0"` when nothing was sold
pub fn average_price_label(total_sales: f64, total_units: i64) -> String {
    if total_units == 0 {
        return "0".to_string();
    }
    format!("{:.2}", total_sales / total_units as f64)
}

/// Products ordered by units sold, largest first
pub fn sorted_by_quantity_desc(products: &[SaleProduct]) -> Vec<SaleProduct> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| b.quantity_sales.cmp(&a.quantity_sales));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(from: &str, to: &str, supplier: &str) -> ReportForm {
        ReportForm {
            date_from: from.into(),
            date_to: to.into(),
            supplier_id: supplier.into(),
        }
    }

    fn product(qty: i64) -> SaleProduct {
        SaleProduct {
            product_id: qty,
            name: format!("P{}", qty),
            quantity_sales: qty,
            total_quantity: qty,
            total_sales: qty as f64,
            total_sales_main_currency: None,
        }
    }

    #[test]
    fn empty_dates_are_rejected() {
        assert_eq!(
            form("", "2025-01-31", "12").validate(),
            Err(ReportValidationError::MissingDates)
        );
        assert_eq!(
            form("2025-01-01", "  ", "12").validate(),
            Err(ReportValidationError::MissingDates)
        );
    }

    #[test]
    fn supplier_must_be_numeric() {
        assert_eq!(
            form("2025-01-01", "2025-01-31", "").validate(),
            Err(ReportValidationError::MissingSupplier)
        );
        assert_eq!(
            form("2025-01-01", "2025-01-31", "abc").validate(),
            Err(ReportValidationError::InvalidSupplier("abc".into()))
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            form("2025-02-01", "2025-01-31", "12").validate(),
            Err(ReportValidationError::InvertedRange)
        );
    }

    #[test]
    fn valid_form_builds_full_day_range() {
        let query = form("2025-01-01", "2025-01-31", " 12 ").validate().unwrap();
        assert_eq!(query.date_from, "2025-01-01 00:00");
        assert_eq!(query.date_to, "2025-01-31 23:59");
        assert_eq!(query.supplier_id, 12);
    }

    #[test]
    fn products_sorted_descending_by_quantity() {
        let sorted = sorted_by_quantity_desc(&[product(5), product(9), product(1)]);
        let quantities: Vec<i64> = sorted.iter().map(|p| p.quantity_sales).collect();
        assert_eq!(quantities, vec![9, 5, 1]);
    }

    #[test]
    fn average_price_is_zero_without_units() {
        assert_eq!(average_price_label(500.0, 0), "0");
    }

    #[test]
    fn average_price_has_two_decimals() {
        assert_eq!(average_price_label(123.4, 10), "12.34");
    }

    #[test]
    fn summary_counts_rows() {
        let response = SalesResponse {
            sale_id: "s".into(),
            products: vec![product(5), product(9)],
            total_sales: 14.0,
            total_units: 14,
        };
        let summary = ReportSummary::from_response(&response);
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.total_units, 14);
        assert_eq!(summary.average_price, "1.00");
    }
}
