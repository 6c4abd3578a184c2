use serde::{Deserialize, Serialize};

use crate::shared::normalize::accessors::record_uom;
use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

// ============================================================================
// Line item
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    pub name: String,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub unit: String,
}

impl PurchaseOrderItem {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            product_id: raw.i64(&["productId", "product_id"]),
            name: raw.string_or(
                &["name", "productName", "product_name", "description"],
                "",
            ),
            quantity: raw.f64_or(&["quantity", "qty"], 0.0),
            unit_price: raw.f64(&["unitPrice", "unit_price", "rate"]),
            amount: raw.f64(&["amount", "lineTotal", "line_total"]),
            unit: record_uom(raw),
        }
    }

    /// Line amount, computed from price when the backend omitted it
    pub fn line_total(&self) -> f64 {
        self.amount
            .unwrap_or_else(|| self.quantity * self.unit_price.unwrap_or(0.0))
    }
}

// ============================================================================
// Purchase order
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: i64,
    pub po_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<PurchaseOrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PurchaseOrder {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(PurchaseOrderItem::line_total).sum()
    }
}

impl Normalize for PurchaseOrder {
    const ENTITY: &'static str = "purchaseOrders";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        let items = raw
            .records(&["items", "lineItems", "line_items"])?
            .into_iter()
            .map(PurchaseOrderItem::from_raw)
            .collect();

        Ok(Self {
            id: raw.id(&["id", "purchaseOrderId", "purchase_order_id"]),
            po_number: raw.string_or(&["poNumber", "po_number", "orderNumber", "order_number"], ""),
            supplier_id: raw.i64(&["supplierId", "supplier_id"]),
            supplier_name: raw.str(&["supplierName", "supplier_name"]),
            status: raw.str(&["status"]),
            po_date: raw.str(&["poDate", "po_date", "orderDate", "order_date"]),
            expected_delivery_date: raw.str(&["expectedDeliveryDate", "expected_delivery_date"]),
            currency: raw.str(&["currency"]),
            subtotal: raw.f64(&["subtotal", "subTotal", "sub_total"]),
            vat_amount: raw.f64(&["vatAmount", "vat_amount"]),
            total: raw.f64(&["total", "totalAmount", "total_amount"]),
            notes: raw.str(&["notes"]),
            items,
            created_at: raw.str(&["createdAt", "created_at"]),
            updated_at: raw.str(&["updatedAt", "updated_at"]),
        })
    }
}
