use contracts::domain::a005_payment::aggregate::Payment;

use crate::shared::api_utils::fetch_normalized;

/// Fetch payments and receipts
pub async fn fetch_payments() -> Result<Vec<Payment>, String> {
    fetch_normalized::<Payment>("/api/payments", "fetch_payments").await
}

/// Payments recorded against one invoice
pub async fn fetch_invoice_payments(invoice_id: i64) -> Result<Vec<Payment>, String> {
    fetch_normalized::<Payment>(
        &format!("/api/payments?invoice_id={}", invoice_id),
        "fetch_invoice_payments",
    )
    .await
}
