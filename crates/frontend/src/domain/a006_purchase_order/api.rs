use contracts::domain::a006_purchase_order::aggregate::PurchaseOrder;

use crate::shared::api_utils::fetch_normalized;

/// Fetch purchase orders
pub async fn fetch_purchase_orders() -> Result<Vec<PurchaseOrder>, String> {
    fetch_normalized::<PurchaseOrder>("/api/purchase-orders", "fetch_purchase_orders").await
}
