use contracts::domain::a004_invoice::aggregate::Invoice;

use crate::shared::api_utils::fetch_normalized;

/// Fetch invoices
pub async fn fetch_invoices() -> Result<Vec<Invoice>, String> {
    fetch_normalized::<Invoice>("/api/invoices", "fetch_invoices").await
}
