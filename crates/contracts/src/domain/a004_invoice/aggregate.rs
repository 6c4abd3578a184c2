use serde::{Deserialize, Serialize};

use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_paid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Invoice {
    /// Balance due: explicit `balance`, otherwise total minus payments
    pub fn outstanding(&self) -> Option<f64> {
        self.balance
            .or_else(|| Some(self.total? - self.total_paid.unwrap_or(0.0)))
    }
}

impl Normalize for Invoice {
    const ENTITY: &'static str = "invoices";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: raw.id(&["id", "invoiceId", "invoice_id"]),
            invoice_number: raw.string_or(&["invoiceNumber", "invoice_number", "invoiceNo"], ""),
            customer_id: raw.i64(&["customerId", "customer_id"]),
            customer_name: raw.str(&["customerName", "customer_name"]),
            status: raw.str(&["status"]),
            payment_status: raw.str(&["paymentStatus", "payment_status"]),
            delivery_status: raw.str(&["deliveryStatus", "delivery_status"]),
            subtotal: raw.f64(&["subtotal", "subTotal", "sub_total"]),
            vat_amount: raw.f64(&["vatAmount", "vat_amount"]),
            total: raw.f64(&["total", "totalAmount", "total_amount"]),
            total_paid: raw.f64(&["totalPaid", "total_paid", "received"]),
            balance: raw.f64(&["balance", "outstanding", "balanceDue", "balance_due"]),
            due_date: raw.str(&["dueDate", "due_date"]),
            created_at: raw.str(&["createdAt", "created_at"]),
            updated_at: raw.str(&["updatedAt", "updated_at"]),
        })
    }
}
