use serde::{Deserialize, Serialize};

use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

pub const DEFAULT_PAYMENT_METHOD: &str = "other";
pub const DEFAULT_PAYMENT_CURRENCY: &str = "AED";

/// Разнесение платежа на счёт
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAllocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub amount: f64,
}

impl PaymentAllocation {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            invoice_id: raw.i64(&["invoiceId", "invoice_id"]),
            invoice_number: raw.str(&["invoiceNumber", "invoice_number"]),
            amount: raw.f64_or(&["amount", "allocatedAmount", "allocated_amount"], 0.0),
        }
    }
}

/// Customer receipt or supplier payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub amount: f64,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    // Receipt / VAT compliance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_advance_payment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub voided: bool,

    // Multi-currency
    pub currency: String,
    pub exchange_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_in_aed: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unallocated_amount: Option<f64>,
    #[serde(default)]
    pub allocations: Vec<PaymentAllocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Payment {
    /// Amount converted to the base currency (AED)
    pub fn base_amount(&self) -> f64 {
        self.amount_in_aed
            .unwrap_or(self.amount * self.exchange_rate)
    }
}

impl Normalize for Payment {
    const ENTITY: &'static str = "payments";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        let allocations = raw
            .records(&["allocations"])?
            .into_iter()
            .map(PaymentAllocation::from_raw)
            .collect();

        Ok(Self {
            id: raw.id(&["id", "paymentId", "payment_id"]),
            company_id: raw.i64(&["companyId", "company_id"]),
            invoice_id: raw.i64(&["invoiceId", "invoice_id"]),
            customer_id: raw.i64(&["customerId", "customer_id"]),
            amount: raw.f64_or(&["amount"], 0.0),
            payment_method: raw.string_or(
                &["paymentMethod", "payment_method", "method", "paymentMode", "payment_mode"],
                DEFAULT_PAYMENT_METHOD,
            ),
            payment_date: raw.str(&["paymentDate", "payment_date", "date"]),
            reference_number: raw.str(&[
                "referenceNumber",
                "reference_number",
                "referenceNo",
                "reference_no",
            ]),
            receipt_number: raw.str(&["receiptNumber", "receipt_number"]),
            receipt_status: raw.str(&["receiptStatus", "receipt_status"]),
            is_advance_payment: raw.bool(&["isAdvancePayment", "is_advance_payment"]),
            composite_reference: raw.str(&["compositeReference", "composite_reference"]),
            notes: raw.str(&["notes"]),
            remarks: raw.str(&["remarks"]),
            voided: raw.bool_or(&["voided", "isVoided", "is_voided"], false),
            currency: raw.string_or(&["currency"], DEFAULT_PAYMENT_CURRENCY),
            exchange_rate: raw.f64_or(&["exchangeRate", "exchange_rate"], 1.0),
            amount_in_aed: raw.f64(&["amountInAed", "amount_in_aed"]),
            allocated_amount: raw.f64(&["allocatedAmount", "allocated_amount"]),
            unallocated_amount: raw.f64(&["unallocatedAmount", "unallocated_amount"]),
            allocations,
            created_at: raw.str(&["createdAt", "created_at"]),
        })
    }
}
