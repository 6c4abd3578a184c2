//! Single-field accessors over raw records.
//!
//! Used where a screen needs one value from an un-normalized payload and by
//! the entity normalizers, so both resolve aliases in the same order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::raw::RawRecord;

pub const DEFAULT_UOM: &str = "PCS";
const UOM_PREFIX: &str = "UNIT_OF_MEASURE_";

pub(crate) const DISPLAY_NAME_KEYS: &[&str] = &[
    "displayName",
    "display_name",
    "uniqueName",
    "unique_name",
    "fullName",
    "full_name",
    "name",
];
pub(crate) const UNIQUE_NAME_KEYS: &[&str] =
    &["uniqueName", "unique_name", "fullName", "full_name", "name"];
pub(crate) const SELLING_PRICE_KEYS: &[&str] = &["sellingPrice", "selling_price", "price"];
pub(crate) const COST_PRICE_KEYS: &[&str] =
    &["costPrice", "cost_price", "purchasePrice", "purchase_price"];
pub(crate) const CURRENT_STOCK_KEYS: &[&str] = &["currentStock", "current_stock", "quantity"];
pub(crate) const MIN_STOCK_KEYS: &[&str] =
    &["minStock", "min_stock", "reorderLevel", "reorder_level"];
pub(crate) const MAX_STOCK_KEYS: &[&str] = &["maxStock", "max_stock"];
pub(crate) const UOM_KEYS: &[&str] = &[
    "unit",
    "unit_of_measure",
    "unitOfMeasure",
    "quantityUom",
    "quantity_uom",
];

fn record(value: Option<&Value>) -> Option<RawRecord<'_>> {
    value.and_then(RawRecord::from_value)
}

/// displayName > display_name > uniqueName > fullName > name, `""` otherwise
pub fn product_display_name(product: Option<&Value>) -> String {
    record(product)
        .and_then(|raw| raw.str(DISPLAY_NAME_KEYS))
        .unwrap_or_default()
}

/// uniqueName > unique_name > fullName > full_name > name, `""` otherwise
pub fn product_unique_name(product: Option<&Value>) -> String {
    record(product)
        .and_then(|raw| raw.str(UNIQUE_NAME_KEYS))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceKind {
    #[default]
    Selling,
    Cost,
}

pub fn price(product: Option<&Value>, kind: PriceKind) -> f64 {
    let keys = match kind {
        PriceKind::Selling => SELLING_PRICE_KEYS,
        PriceKind::Cost => COST_PRICE_KEYS,
    };
    record(product).and_then(|raw| raw.f64(keys)).unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StockLevels {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

pub fn stock(product: Option<&Value>) -> StockLevels {
    let Some(raw) = record(product) else {
        return StockLevels::default();
    };
    StockLevels {
        current: raw.f64_or(CURRENT_STOCK_KEYS, 0.0),
        min: raw.f64_or(MIN_STOCK_KEYS, 0.0),
        max: raw.f64_or(MAX_STOCK_KEYS, 0.0),
    }
}

/// Timestamp under `field` (camelCase) or its snake_case form.
pub fn timestamp(record_value: Option<&Value>, field: &str) -> Option<String> {
    record(record_value)
        .and_then(|raw| raw.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// `UNIT_OF_MEASURE_KG` -> `KG`; empty -> `PCS`
pub fn uom_from_str(unit: &str) -> String {
    let unit = unit.trim();
    let stripped = unit.strip_prefix(UOM_PREFIX).unwrap_or(unit);
    if stripped.is_empty() {
        DEFAULT_UOM.to_string()
    } else {
        stripped.to_string()
    }
}

/// Unit of measure from either a bare unit string or an item object.
pub fn normalize_uom(source: &Value) -> String {
    match source {
        Value::String(unit) => uom_from_str(unit),
        Value::Object(fields) => record_uom(RawRecord::new(fields)),
        _ => DEFAULT_UOM.to_string(),
    }
}

/// Unit of measure of an item record: `unit` > `unit_of_measure` > `quantityUom`.
pub fn record_uom(raw: RawRecord<'_>) -> String {
    raw.str(UOM_KEYS)
        .map(|unit| uom_from_str(&unit))
        .unwrap_or_else(|| DEFAULT_UOM.to_string())
}
