use contracts::domain::a001_customer::aggregate::Customer;
use contracts::shared::normalize::normalize;

use crate::shared::api_utils::{fetch_normalized, get_json};

/// Все клиенты, нормализованные
pub async fn fetch_customers() -> Result<Vec<Customer>, String> {
    fetch_normalized::<Customer>("/api/customers", "fetch_customers").await
}

/// Single customer; `Ok(None)` when the payload cannot be normalized
pub async fn fetch_customer(id: i64) -> Result<Option<Customer>, String> {
    let payload = get_json(
        &format!("/api/customers/{}", id),
        "Failed to fetch customer",
    )
    .await?;

    let record = payload
        .get("customer")
        .or_else(|| payload.get("data"))
        .filter(|inner| inner.is_object())
        .unwrap_or(&payload);

    Ok(normalize::<Customer>(Some(record), "fetch_customer"))
}
