//! Merchant home: today's summary plus the recent payments table

use std::cmp::Ordering;

use proof_client::{DailySummary, Payment, PaymentStatus};
use tracing::warn;

use crate::notice::DisplayError;
use crate::traits::BasePaymentsApi;

const LOAD_FAILED: &str = "Failed to load dashboard data";

pub const PAGE_SIZE: usize = 5;

/// Everything the home page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub summary: DailySummary,
    pub payments: Vec<Payment>,
}

/// Fetch the summary and the payment list concurrently; both must succeed.
pub async fn load_dashboard(api: &dyn BasePaymentsApi) -> Result<Dashboard, DisplayError> {
    let (summary, payments) = tokio::try_join!(api.daily_summary(), api.list_payments())
        .map_err(|e| {
            warn!("Dashboard load failed: {}", e);
            DisplayError::from(LOAD_FAILED)
        })?;

    Ok(Dashboard { summary, payments })
}

/// Label for the settlement card
pub fn settlement_label(summary: &DailySummary) -> &'static str {
    if summary.pending_payments > 0 {
        "WAITING ON BANK"
    } else {
        "ALL CLEAR"
    }
}

// =============================================================================
// Payments table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Reference,
    Date,
    Amount,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Pending,
    Failed,
    Default,
}

impl BadgeVariant {
    pub fn for_status(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Success => BadgeVariant::Success,
            PaymentStatus::Pending | PaymentStatus::Initiated => BadgeVariant::Pending,
            PaymentStatus::Failed => BadgeVariant::Failed,
            PaymentStatus::Unknown => BadgeVariant::Default,
        }
    }
}

/// Receipt page for a row, only for settled payments that issued one
pub fn receipt_link(payment: &Payment) -> Option<String> {
    match (&payment.status, &payment.receipt_id) {
        (PaymentStatus::Success, Some(id)) if !id.is_empty() => Some(format!("/receipt/{id}")),
        _ => None,
    }
}

/// Client-side sorting and pagination over the payments list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentsTable {
    rows: Vec<Payment>,
    sort: Option<(SortKey, SortDirection)>,
    page: usize,
}

impl PaymentsTable {
    pub fn new(rows: Vec<Payment>) -> Self {
        Self {
            rows,
            sort: None,
            page: 0,
        }
    }

    pub fn sort(&self) -> Option<(SortKey, SortDirection)> {
        self.sort
    }

    /// Header click: ascending, then descending, then unsorted
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == key => {
                Some((key, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == key => None,
            _ => Some((key, SortDirection::Ascending)),
        };
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Zero-based page index
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn first(&mut self) {
        self.go_to(0);
    }

    pub fn previous(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn last(&mut self) {
        self.go_to(self.page_count() - 1);
    }

    pub fn can_previous(&self) -> bool {
        self.page > 0
    }

    pub fn can_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    /// Rows on the current page, in the current sort order
    pub fn visible_rows(&self) -> Vec<&Payment> {
        let mut rows: Vec<&Payment> = self.rows.iter().collect();
        if let Some((key, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare(a, b, key);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows.into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }
}

fn compare(a: &Payment, b: &Payment, key: SortKey) -> Ordering {
    match key {
        SortKey::Reference => a.reference.cmp(&b.reference),
        // RFC 3339 strings from one server sort chronologically
        SortKey::Date => a.created_at.cmp(&b.created_at),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{payment, rejected, MockPaymentsApi, PaymentsCall};

    fn rows(n: usize) -> Vec<Payment> {
        (0..n)
            .map(|i| payment(&format!("PRF-{i:03}"), (i * 100) as f64, PaymentStatus::Success))
            .collect()
    }

    #[tokio::test]
    async fn loads_summary_and_payments_together() {
        let api = MockPaymentsApi::new()
            .with_summary(DailySummary {
                total_collected: 5000.0,
                pending_payments: 2,
                ..Default::default()
            })
            .with_payments(rows(3));

        let dashboard = load_dashboard(&api).await.unwrap();

        assert_eq!(dashboard.summary.total_collected, 5000.0);
        assert_eq!(dashboard.payments.len(), 3);
        assert_eq!(settlement_label(&dashboard.summary), "WAITING ON BANK");

        let calls = api.calls();
        assert!(calls.iter().any(|c| matches!(c, PaymentsCall::DailySummary)));
        assert!(calls.iter().any(|c| matches!(c, PaymentsCall::ListPayments)));
    }

    #[tokio::test]
    async fn either_failure_fails_the_load() {
        let api = MockPaymentsApi::new()
            .with_summary(DailySummary::default())
            .with_payments_error(rejected(500, "database down"));

        let err = load_dashboard(&api).await.unwrap_err();
        assert_eq!(err.to_string(), LOAD_FAILED);
    }

    #[test]
    fn settled_day_is_all_clear() {
        assert_eq!(settlement_label(&DailySummary::default()), "ALL CLEAR");
    }

    #[test]
    fn pages_hold_five_rows_and_clamp() {
        let mut table = PaymentsTable::new(rows(12));
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.visible_rows().len(), 5);
        assert!(!table.can_previous());

        table.last();
        assert_eq!(table.page(), 2);
        assert_eq!(table.visible_rows().len(), 2);
        assert!(!table.can_next());

        table.next();
        assert_eq!(table.page(), 2);

        table.go_to(99);
        assert_eq!(table.page(), 2);

        table.first();
        table.previous();
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let mut table = PaymentsTable::new(Vec::new());
        assert_eq!(table.page_count(), 1);
        table.next();
        assert_eq!(table.page(), 0);
        assert!(table.visible_rows().is_empty());
    }

    #[test]
    fn sort_cycles_ascending_descending_off() {
        let mut table = PaymentsTable::new(rows(3));

        table.toggle_sort(SortKey::Amount);
        assert_eq!(table.visible_rows()[0].reference, "PRF-000");

        table.toggle_sort(SortKey::Amount);
        assert_eq!(table.sort(), Some((SortKey::Amount, SortDirection::Descending)));
        assert_eq!(table.visible_rows()[0].reference, "PRF-002");

        table.toggle_sort(SortKey::Amount);
        assert_eq!(table.sort(), None);

        table.toggle_sort(SortKey::Amount);
        table.toggle_sort(SortKey::Status);
        assert_eq!(table.sort(), Some((SortKey::Status, SortDirection::Ascending)));
    }

    #[test]
    fn badges_follow_status() {
        assert_eq!(BadgeVariant::for_status(PaymentStatus::Success), BadgeVariant::Success);
        assert_eq!(BadgeVariant::for_status(PaymentStatus::Initiated), BadgeVariant::Pending);
        assert_eq!(BadgeVariant::for_status(PaymentStatus::Pending), BadgeVariant::Pending);
        assert_eq!(BadgeVariant::for_status(PaymentStatus::Failed), BadgeVariant::Failed);
        assert_eq!(BadgeVariant::for_status(PaymentStatus::Unknown), BadgeVariant::Default);
    }

    #[test]
    fn only_successful_payments_link_to_receipts() {
        let mut paid = payment("PRF-1", 100.0, PaymentStatus::Success);
        assert_eq!(receipt_link(&paid), None);

        paid.receipt_id = Some("RCP-1".to_string());
        assert_eq!(receipt_link(&paid).as_deref(), Some("/receipt/RCP-1"));

        paid.status = PaymentStatus::Pending;
        assert_eq!(receipt_link(&paid), None);
    }
}
