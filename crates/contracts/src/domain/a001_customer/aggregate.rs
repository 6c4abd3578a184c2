use serde::{Deserialize, Serialize};

use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

pub const DEFAULT_CUSTOMER_STATUS: &str = "ACTIVE";

// ============================================================================
// Canonical record
// ============================================================================

/// Покупатель в каноническом (camelCase) виде
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: String,

    // Credit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_credit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_used: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_available: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_utilization_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_history_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,

    // Compliance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cin_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_designated_zone: Option<bool>,

    // Receivables aging buckets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aging_current: Option<f64>,
    #[serde(rename = "aging1To30", skip_serializing_if = "Option::is_none")]
    pub aging_1_to_30: Option<f64>,
    #[serde(rename = "aging31To60", skip_serializing_if = "Option::is_none")]
    pub aging_31_to_60: Option<f64>,
    #[serde(rename = "aging61To90", skip_serializing_if = "Option::is_none")]
    pub aging_61_to_90: Option<f64>,
    #[serde(rename = "aging90Plus", skip_serializing_if = "Option::is_none")]
    pub aging_90_plus: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_review_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Customer {
    /// Unused credit, when the backend did not send it explicitly
    pub fn remaining_credit(&self) -> Option<f64> {
        self.credit_available.or_else(|| {
            let limit = self.credit_limit?;
            let used = self.credit_used.or(self.current_credit).unwrap_or(0.0);
            Some(limit - used)
        })
    }
}

// ============================================================================
// Normalization
// ============================================================================

impl Normalize for Customer {
    const ENTITY: &'static str = "customers";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: raw.id(&["id", "customerId", "customer_id"]),
            company_id: raw.i64(&["companyId", "company_id"]),
            name: raw.string_or(&["name", "companyName", "company_name"], ""),
            email: raw.string_or(&["email"], ""),
            phone: raw.string_or(&["phone", "phoneNumber", "phone_number"], ""),
            alternate_phone: raw.str(&["alternatePhone", "alternate_phone"]),
            contact_person: raw.str(&["contactPerson", "contact_person", "contactName", "contact_name"]),
            address: raw.str(&["address"]),
            status: raw.string_or(&["status"], DEFAULT_CUSTOMER_STATUS),

            credit_limit: raw.f64(&["creditLimit", "credit_limit"]),
            current_credit: raw.f64(&["currentCredit", "current_credit"]),
            current_balance: raw.f64(&["currentBalance", "current_balance"]),
            credit_used: raw.f64(&["creditUsed", "credit_used"]),
            credit_available: raw.f64(&["creditAvailable", "credit_available"]),
            credit_utilization_percentage: raw.f64(&[
                "creditUtilizationPercentage",
                "credit_utilization_percentage",
            ]),
            credit_score: raw.f64(&["creditScore", "credit_score"]),
            payment_history_score: raw.f64(&["paymentHistoryScore", "payment_history_score"]),
            payment_terms: raw.str(&["paymentTerms", "payment_terms"]),

            trn: raw.str(&["trn", "trnNumber", "trn_number"]),
            vat_number: raw.str(&["vatNumber", "vat_number"]),
            pan_number: raw.str(&["panNumber", "pan_number"]),
            cin_number: raw.str(&["cinNumber", "cin_number"]),
            trade_license_number: raw.str(&["tradeLicenseNumber", "trade_license_number"]),
            is_designated_zone: raw.bool(&["isDesignatedZone", "is_designated_zone"]),

            aging_current: raw.f64(&["agingCurrent", "aging_current"]),
            aging_1_to_30: raw.f64(&["aging1To30", "aging_1_30"]),
            aging_31_to_60: raw.f64(&["aging31To60", "aging_31_60"]),
            aging_61_to_90: raw.f64(&["aging61To90", "aging_61_90"]),
            aging_90_plus: raw.f64(&["aging90Plus", "aging_90_plus"]),

            last_payment_date: raw.str(&["lastPaymentDate", "last_payment_date"]),
            credit_review_date: raw.str(&["creditReviewDate", "credit_review_date"]),
            created_at: raw.str(&["createdAt", "created_at"]),
            updated_at: raw.str(&["updatedAt", "updated_at"]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalize::{normalize, raw::is_snake_case_key};
    use serde_json::json;

    fn customer(raw: serde_json::Value) -> Customer {
        normalize(Some(&raw), "customer-test").unwrap()
    }

    #[test]
    fn test_basic_fields_with_defaults() {
        let result = customer(json!({ "id": 1, "name": "Test Corp" }));

        assert_eq!(result.id, 1);
        assert_eq!(result.name, "Test Corp");
        assert_eq!(result.phone, "");
        assert_eq!(result.email, "");
        assert_eq!(result.status, "ACTIVE");
        assert_eq!(result.credit_limit, None);
    }

    #[test]
    fn test_snake_case_aliases() {
        let result = customer(json!({
            "id": 1,
            "company_id": 10,
            "company_name": "Test Company",
            "phone_number": "987654321",
            "credit_limit": 50000,
            "current_balance": 5000,
            "payment_terms": "Net 45",
            "contact_person": "John Doe",
            "alternate_phone": "123456",
            "trn_number": "TRN67890"
        }));

        assert_eq!(result.company_id, Some(10));
        assert_eq!(result.name, "Test Company");
        assert_eq!(result.phone, "987654321");
        assert_eq!(result.credit_limit, Some(50000.0));
        assert_eq!(result.current_balance, Some(5000.0));
        assert_eq!(result.payment_terms.as_deref(), Some("Net 45"));
        assert_eq!(result.contact_person.as_deref(), Some("John Doe"));
        assert_eq!(result.alternate_phone.as_deref(), Some("123456"));
        assert_eq!(result.trn.as_deref(), Some("TRN67890"));
    }

    #[test]
    fn test_credit_limit_alias_leaves_no_snake_case_key() {
        let result = customer(json!({ "credit_limit": 500 }));
        assert_eq!(result.credit_limit, Some(500.0));

        let serialized = serde_json::to_value(&result).unwrap();
        let fields = serialized.as_object().unwrap();
        assert_eq!(fields.get("creditLimit"), Some(&json!(500.0)));
        assert!(!fields.contains_key("credit_limit"));
        assert!(fields.keys().all(|key| !is_snake_case_key(key)));
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let result = customer(json!({
            "id": "1",
            "creditLimit": "100000.50",
            "currentBalance": "25000.75",
            "creditUtilizationPercentage": "25.5",
            "creditScore": "750",
            "paymentHistoryScore": "n/a"
        }));

        assert_eq!(result.id, 1);
        assert_eq!(result.credit_limit, Some(100000.5));
        assert_eq!(result.current_balance, Some(25000.75));
        assert_eq!(result.credit_utilization_percentage, Some(25.5));
        assert_eq!(result.credit_score, Some(750.0));
        assert_eq!(result.payment_history_score, None);
    }

    #[test]
    fn test_aging_buckets_and_compliance() {
        let result = customer(json!({
            "id": 1,
            "aging_current": "1000",
            "aging_1_30": "2000",
            "aging_31_60": "500",
            "aging_61_90": "200",
            "aging_90_plus": "100",
            "trn": "UAE123456789012",
            "vat_number": "VAT-123",
            "trade_license_number": "TL-2024-001",
            "is_designated_zone": true
        }));

        assert_eq!(result.aging_current, Some(1000.0));
        assert_eq!(result.aging_1_to_30, Some(2000.0));
        assert_eq!(result.aging_31_to_60, Some(500.0));
        assert_eq!(result.aging_61_to_90, Some(200.0));
        assert_eq!(result.aging_90_plus, Some(100.0));
        assert_eq!(result.trn.as_deref(), Some("UAE123456789012"));
        assert_eq!(result.vat_number.as_deref(), Some("VAT-123"));
        assert_eq!(result.trade_license_number.as_deref(), Some("TL-2024-001"));
        assert_eq!(result.is_designated_zone, Some(true));
    }

    #[test]
    fn test_normalizing_canonical_record_is_idempotent() {
        let first = customer(json!({
            "id": 5,
            "company_name": "Gulf Steel LLC",
            "credit_limit": 100000,
            "credit_used": 75000,
            "aging_1_30": 2000,
            "aging_90_plus": 100,
            "is_designated_zone": false,
            "last_payment_date": "2026-01-15",
            "created_at": "2025-06-01T10:00:00Z"
        }));

        let canonical = serde_json::to_value(&first).unwrap();
        let second = customer(canonical);

        assert_eq!(first, second);
    }

    #[test]
    fn test_remaining_credit() {
        let result = customer(json!({ "credit_limit": 100000, "credit_used": 75000 }));
        assert_eq!(result.remaining_credit(), Some(25000.0));

        let explicit = customer(json!({ "credit_limit": 100000, "credit_available": 10 }));
        assert_eq!(explicit.remaining_credit(), Some(10.0));

        assert_eq!(customer(json!({})).remaining_credit(), None);
    }
}
