use contracts::domain::a007_stock_item::aggregate::StockItem;

use crate::shared::api_utils::fetch_normalized;

/// Текущие остатки по складам
pub async fn fetch_stock() -> Result<Vec<StockItem>, String> {
    fetch_normalized::<StockItem>("/api/inventory", "fetch_stock").await
}
