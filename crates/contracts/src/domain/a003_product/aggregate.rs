use serde::{Deserialize, Serialize};

use crate::shared::normalize::accessors::{
    self, COST_PRICE_KEYS, CURRENT_STOCK_KEYS, DISPLAY_NAME_KEYS, MAX_STOCK_KEYS,
    MIN_STOCK_KEYS, SELLING_PRICE_KEYS, UNIQUE_NAME_KEYS,
};
use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

/// Страна происхождения по умолчанию
pub const DEFAULT_ORIGIN: &str = "UAE";

/// Steel product (bar, sheet, pipe...) as shown in catalogues and pickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Short label for tables and pickers
    pub display_name: String,
    /// Fully qualified name, e.g. `SS-304-Sheet-2B-1220x2440-1.5mm`
    pub unique_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_inch: Option<String>,
    pub origin: String,
    pub unit: String,
}

impl Product {
    pub fn is_below_min_stock(&self) -> bool {
        match (self.current_stock, self.min_stock) {
            (Some(current), Some(min)) => current < min,
            _ => false,
        }
    }
}

impl Normalize for Product {
    const ENTITY: &'static str = "products";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: raw.id(&["id", "productId", "product_id"]),
            name: raw.string_or(&["name"], ""),
            display_name: raw.string_or(DISPLAY_NAME_KEYS, ""),
            unique_name: raw.string_or(UNIQUE_NAME_KEYS, ""),
            full_name: raw.str(&["fullName", "full_name"]),
            selling_price: raw.f64(SELLING_PRICE_KEYS),
            cost_price: raw.f64(COST_PRICE_KEYS),
            current_stock: raw.f64(CURRENT_STOCK_KEYS),
            min_stock: raw.f64(MIN_STOCK_KEYS),
            max_stock: raw.f64(MAX_STOCK_KEYS),
            size_inch: raw.str(&["sizeInch", "size_inch"]),
            origin: raw.string_or(&["origin"], DEFAULT_ORIGIN),
            unit: accessors::record_uom(raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalize::{normalize, normalize_list};
    use serde_json::json;

    fn product(raw: serde_json::Value) -> Product {
        normalize(Some(&raw), "product-test").unwrap()
    }

    #[test]
    fn test_snake_case_fields() {
        let result = product(json!({
            "id": 1,
            "display_name": "SS-316L-Bar",
            "full_name": "SS-316L-Bar-UAE",
            "unique_name": "ss-316l-bar-uae",
            "selling_price": 150,
            "cost_price": 100,
            "current_stock": 50,
            "min_stock": 10,
            "max_stock": 100,
            "size_inch": "1\"",
            "origin": "India",
            "unit_of_measure": "UNIT_OF_MEASURE_KG"
        }));

        assert_eq!(result.display_name, "SS-316L-Bar");
        assert_eq!(result.full_name.as_deref(), Some("SS-316L-Bar-UAE"));
        assert_eq!(result.unique_name, "ss-316l-bar-uae");
        assert_eq!(result.selling_price, Some(150.0));
        assert_eq!(result.cost_price, Some(100.0));
        assert_eq!(result.current_stock, Some(50.0));
        assert_eq!(result.min_stock, Some(10.0));
        assert_eq!(result.max_stock, Some(100.0));
        assert_eq!(result.size_inch.as_deref(), Some("1\""));
        assert_eq!(result.origin, "India");
        assert_eq!(result.unit, "KG");
    }

    #[test]
    fn test_camel_case_fields_are_preserved() {
        let result = product(json!({
            "id": 1,
            "displayName": "SS-316L-Bar",
            "fullName": "SS-316L-Bar-UAE",
            "sellingPrice": 150
        }));

        assert_eq!(result.display_name, "SS-316L-Bar");
        assert_eq!(result.unique_name, "SS-316L-Bar-UAE");
        assert_eq!(result.selling_price, Some(150.0));
    }

    #[test]
    fn test_defaults() {
        let result = product(json!({ "id": 1, "name": "SS 316L Bar 25mm", "price": 120 }));

        assert_eq!(result.origin, "UAE");
        assert_eq!(result.unit, "PCS");
        assert_eq!(result.display_name, "SS 316L Bar 25mm");
        assert_eq!(result.selling_price, Some(120.0));
        assert_eq!(result.cost_price, None);
    }

    #[test]
    fn test_cost_falls_back_to_purchase_price() {
        let result = product(json!({ "id": 5, "name": "SS-304-Coil", "purchase_price": 50 }));
        assert_eq!(result.cost_price, Some(50.0));

        let camel = product(json!({ "id": 6, "purchasePrice": "75.5" }));
        assert_eq!(camel.cost_price, Some(75.5));
    }

    #[test]
    fn test_idempotent_on_canonical_record() {
        let first = product(json!({
            "id": 42,
            "name": "SS 316L Bar 25mm",
            "display_name": "SS-316L-Bar-25mm",
            "full_name": "SS-316L-Bar-25mm-UAE",
            "selling_price": "185.5",
            "quantity": 75,
            "reorder_level": 20,
            "unit": "UNIT_OF_MEASURE_MT"
        }));

        let second = product(serde_json::to_value(&first).unwrap());
        assert_eq!(first, second);
        assert_eq!(second.unit, "MT");
        assert_eq!(second.current_stock, Some(75.0));
    }

    #[test]
    fn test_below_min_stock() {
        let low = product(json!({ "current_stock": 5, "min_stock": 10 }));
        let fine = product(json!({ "current_stock": 50, "min_stock": 10 }));
        assert!(low.is_below_min_stock());
        assert!(!fine.is_below_min_stock());
    }

    #[test]
    fn test_list_skips_non_objects() {
        let raws = vec![json!({ "id": 1 }), json!("garbage"), json!({ "id": 2 })];
        let products: Vec<Product> = normalize_list(&raws, "product-test");
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
