use contracts::domain::a002_supplier::aggregate::Supplier;

use crate::shared::api_utils::fetch_normalized;

/// Fetch all suppliers
pub async fn fetch_suppliers() -> Result<Vec<Supplier>, String> {
    fetch_normalized::<Supplier>("/api/suppliers", "fetch_suppliers").await
}
