use serde::{Deserialize, Serialize};

use crate::shared::normalize::accessors::record_uom;
use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

/// Остаток товара на складе
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_name: Option<String>,
    pub quantity: f64,
    pub reserved_quantity: f64,
    pub available_quantity: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Normalize for StockItem {
    const ENTITY: &'static str = "inventory";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        let quantity = raw.f64_or(
            &[
                "quantity",
                "quantityOnHand",
                "quantity_on_hand",
                "currentStock",
                "current_stock",
            ],
            0.0,
        );
        let reserved_quantity = raw.f64_or(&["reservedQuantity", "reserved_quantity"], 0.0);
        let available_quantity = raw
            .f64(&["availableQuantity", "available_quantity"])
            .unwrap_or_else(|| {
                let computed = quantity - reserved_quantity;
                if computed.is_finite() {
                    computed
                } else {
                    0.0
                }
            });

        Ok(Self {
            id: raw.id(&["id", "stockId", "stock_id"]),
            product_id: raw.i64(&["productId", "product_id"]),
            product_name: raw.string_or(
                &["productName", "product_name", "displayName", "display_name", "name"],
                "",
            ),
            warehouse_id: raw.i64(&["warehouseId", "warehouse_id"]),
            warehouse_name: raw.str(&["warehouseName", "warehouse_name"]),
            quantity,
            reserved_quantity,
            available_quantity,
            unit: record_uom(raw),
            location: raw.str(&["location", "binLocation", "bin_location"]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalize::normalize;
    use serde_json::json;

    fn stock(raw: serde_json::Value) -> StockItem {
        normalize(Some(&raw), "stock-test").unwrap()
    }

    #[test]
    fn test_available_quantity_is_computed() {
        let result = stock(json!({
            "id": 1,
            "product_id": 7,
            "product_name": "SS-304-Sheet",
            "warehouse_id": 2,
            "warehouse_name": "Jebel Ali",
            "quantity": "120.5",
            "reserved_quantity": 20.5,
            "unit_of_measure": "UNIT_OF_MEASURE_KG"
        }));

        assert_eq!(result.product_id, Some(7));
        assert_eq!(result.warehouse_name.as_deref(), Some("Jebel Ali"));
        assert_eq!(result.quantity, 120.5);
        assert_eq!(result.available_quantity, 100.0);
        assert_eq!(result.unit, "KG");
    }

    #[test]
    fn test_explicit_available_quantity_wins() {
        let result = stock(json!({ "quantity": 10, "reservedQuantity": 2, "availableQuantity": 5 }));
        assert_eq!(result.available_quantity, 5.0);
    }

    #[test]
    fn test_overflowing_available_quantity_stays_finite() {
        let result = stock(json!({ "quantity": "1e308", "reserved_quantity": "-1e308" }));
        assert!(result.available_quantity.is_finite());
        assert_eq!(result.available_quantity, 0.0);
    }

    #[test]
    fn test_defaults() {
        let result = stock(json!({ "id": 3 }));
        assert_eq!(result.quantity, 0.0);
        assert_eq!(result.available_quantity, 0.0);
        assert_eq!(result.product_name, "");
        assert_eq!(result.unit, "PCS");
    }

    #[test]
    fn test_idempotent() {
        let first = stock(json!({ "id": 1, "current_stock": 40, "reserved_quantity": 15, "bin_location": "A-3" }));
        let second = stock(serde_json::to_value(&first).unwrap());
        assert_eq!(first, second);
    }
}
