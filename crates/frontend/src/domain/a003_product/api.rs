use contracts::domain::a003_product::aggregate::Product;

use crate::shared::api_utils::fetch_normalized;

/// Fetch the product catalogue
pub async fn fetch_products() -> Result<Vec<Product>, String> {
    fetch_normalized::<Product>("/api/products", "fetch_products").await
}

/// Server-side search by name / SKU
pub async fn search_products(query: &str) -> Result<Vec<Product>, String> {
    let query = query.trim();
    if query.is_empty() {
        return fetch_products().await;
    }
    fetch_normalized::<Product>(
        &format!("/api/products?search={}", urlencoding::encode(query)),
        "search_products",
    )
    .await
}
