use contracts::dashboards::d400_sales_report::{
    sorted_by_quantity_desc, ReportSummary, ReportValidationError,
};
use contracts::domain::a001_sale::{SaleProduct, SalesResponse};
use contracts::projections::p900_inventory::InventoryItem;

/// Shown for any failed report request
pub const GENERIC_LOAD_ERROR: &str = "No se pudieron cargar los datos. Intente de nuevo.";

/// Last rendered report plus the bookkeeping of in-flight submissions.
///
/// Each submission takes a new sequence number; answers for an older
/// number are dropped so the newest submission always wins.
#[derive(Clone, Debug, Default)]
pub struct ReportState {
    pub seq: u64,
    /// Sequence number of the submission currently on screen
    pub loaded_seq: u64,
    pub loading: bool,
    pub error: Option<String>,
    /// Products already sorted by units sold
    pub report: Option<SalesResponse>,
    pub inventory: Vec<InventoryItem>,
}

impl ReportState {
    /// Start a submission and return its sequence number
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.seq
    }

    /// Local validation failed: show the message, issue nothing
    pub fn reject(&mut self, error: &ReportValidationError) {
        self.error = Some(error.to_string());
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.seq == seq
    }

    /// Replace report and inventory. Returns false for a stale submission.
    pub fn apply_success(
        &mut self,
        seq: u64,
        mut report: SalesResponse,
        inventory: Vec<InventoryItem>,
    ) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        report.products = sorted_by_quantity_desc(&report.products);
        self.report = Some(report);
        self.inventory = inventory;
        self.loaded_seq = seq;
        self.loading = false;
        self.error = None;
        true
    }

    /// Keep the previous tables, only the message changes
    pub fn apply_failure(&mut self, seq: u64) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        self.error = Some(GENERIC_LOAD_ERROR.to_string());
        true
    }

    pub fn summary(&self) -> Option<ReportSummary> {
        self.report.as_ref().map(ReportSummary::from_response)
    }

    /// Product rows tagged with the load they came from.
    ///
    /// Product ids repeat between loads, so table keys must include the tag
    /// or the rows of the previous load stay on screen.
    pub fn product_rows(&self) -> Vec<(u64, SaleProduct)> {
        self.report
            .as_ref()
            .map(|r| r.products.iter().map(|p| (self.loaded_seq, p.clone())).collect())
            .unwrap_or_default()
    }

    pub fn inventory_rows(&self) -> Vec<(u64, InventoryItem)> {
        self.inventory
            .iter()
            .map(|item| (self.loaded_seq, item.clone()))
            .collect()
    }

    pub fn sale_id(&self) -> Option<String> {
        self.report.as_ref().map(|r| r.sale_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_sale::SaleProduct;

    fn product(id: i64, qty: i64) -> SaleProduct {
        SaleProduct {
            product_id: id,
            name: format!("P{}", id),
            quantity_sales: qty,
            total_quantity: qty,
            total_sales: qty as f64,
            total_sales_main_currency: None,
        }
    }

    fn response(sale_id: &str, quantities: &[i64]) -> SalesResponse {
        let products: Vec<SaleProduct> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| product(i as i64, *q))
            .collect();
        SalesResponse {
            sale_id: sale_id.into(),
            total_units: quantities.iter().sum(),
            total_sales: quantities.iter().sum::<i64>() as f64,
            products,
        }
    }

    fn stock(id: i64) -> InventoryItem {
        InventoryItem {
            product_id: id,
            name: format!("P{}", id),
            total_quantity: 3,
        }
    }

    #[test]
    fn success_sorts_products_descending() {
        let mut state = ReportState::default();
        let seq = state.begin();
        assert!(state.apply_success(seq, response("s1", &[5, 9, 1]), vec![]));
        let quantities: Vec<i64> = state
            .report
            .as_ref()
            .unwrap()
            .products
            .iter()
            .map(|p| p.quantity_sales)
            .collect();
        assert_eq!(quantities, vec![9, 5, 1]);
        assert!(!state.loading);
    }

    #[test]
    fn failure_keeps_previous_tables() {
        let mut state = ReportState::default();
        let first = state.begin();
        state.apply_success(first, response("s1", &[2, 4]), vec![stock(1)]);

        let second = state.begin();
        assert!(state.apply_failure(second));

        assert_eq!(state.error.as_deref(), Some(GENERIC_LOAD_ERROR));
        assert_eq!(state.sale_id().as_deref(), Some("s1"));
        assert_eq!(state.report.as_ref().unwrap().products.len(), 2);
        assert_eq!(state.inventory, vec![stock(1)]);
    }

    #[test]
    fn stale_answers_are_dropped() {
        let mut state = ReportState::default();
        let older = state.begin();
        let newer = state.begin();

        assert!(state.apply_success(newer, response("new", &[1]), vec![]));
        assert!(!state.apply_success(older, response("old", &[7]), vec![]));
        assert!(!state.apply_failure(older));

        assert_eq!(state.sale_id().as_deref(), Some("new"));
        assert!(state.error.is_none());
    }

    #[test]
    fn repeated_product_ids_get_fresh_row_keys() {
        let mut state = ReportState::default();
        let first = state.begin();
        state.apply_success(first, response("s1", &[50, 80, 30]), vec![stock(0)]);
        let first_keys: Vec<(u64, i64)> = state
            .product_rows()
            .iter()
            .map(|(tag, p)| (*tag, p.product_id))
            .collect();

        let second = state.begin();
        state.apply_success(second, response("s2", &[300, 480, 180]), vec![stock(0)]);
        let rows = state.product_rows();
        let second_keys: Vec<(u64, i64)> =
            rows.iter().map(|(tag, p)| (*tag, p.product_id)).collect();

        assert!(first_keys.iter().all(|k| !second_keys.contains(k)));
        let quantities: Vec<i64> = rows.iter().map(|(_, p)| p.quantity_sales).collect();
        assert_eq!(quantities, vec![480, 300, 180]);
        assert_eq!(state.inventory_rows()[0].0, second);
    }

    #[test]
    fn failed_reload_keeps_row_keys() {
        let mut state = ReportState::default();
        let first = state.begin();
        state.apply_success(first, response("s1", &[2]), vec![stock(1)]);
        let second = state.begin();
        state.apply_failure(second);
        assert_eq!(state.product_rows()[0].0, first);
        assert_eq!(state.inventory_rows()[0].0, first);
    }

    #[test]
    fn validation_error_issues_nothing() {
        let mut state = ReportState::default();
        state.reject(&ReportValidationError::MissingDates);
        assert_eq!(state.seq, 0);
        assert!(!state.loading);
        assert!(state.error.is_some());
    }

    #[test]
    fn summary_of_empty_sale_has_zero_average() {
        let mut state = ReportState::default();
        let seq = state.begin();
        state.apply_success(seq, response("s", &[]), vec![]);
        let summary = state.summary().unwrap();
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.average_price, "0");
    }
}
