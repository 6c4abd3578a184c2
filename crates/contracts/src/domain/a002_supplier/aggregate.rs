use serde::{Deserialize, Serialize};

use crate::shared::normalize::{Normalize, NormalizeError, RawRecord};

pub const DEFAULT_SUPPLIER_STATUS: &str = "ACTIVE";
pub const DEFAULT_CURRENCY: &str = "AED";

/// Поставщик
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trn_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_time_delivery_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub credit_limit: f64,
    pub current_credit: f64,
    pub status: String,
    pub default_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Normalize for Supplier {
    const ENTITY: &'static str = "suppliers";

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError> {
        Ok(Self {
            id: raw.id(&["id", "supplierId", "supplier_id"]),
            company_id: raw.i64(&["companyId", "company_id"]),
            name: raw.string_or(&["name", "supplierName", "supplier_name"], ""),
            email: raw.string_or(&["email"], ""),
            phone: raw.string_or(&["phone", "phoneNumber", "phone_number"], ""),
            contact_name: raw.str(&["contactName", "contact_name", "contactPerson", "contact_person"]),
            contact_email: raw.str(&["contactEmail", "contact_email"]),
            address: raw.str(&["address"]),
            vat_number: raw.str(&["vatNumber", "vat_number"]),
            trn_number: raw.str(&["trnNumber", "trn_number", "trn"]),
            supplier_type: raw.str(&["supplierType", "supplier_type"]),
            payment_terms: raw.str(&["paymentTerms", "payment_terms"]),
            on_time_delivery_pct: raw.f64(&["onTimeDeliveryPct", "on_time_delivery_pct"]),
            score: raw.f64(&["score"]),
            credit_limit: raw.f64_or(&["creditLimit", "credit_limit"], 0.0),
            current_credit: raw.f64_or(&["currentCredit", "current_credit"], 0.0),
            status: raw.string_or(&["status"], DEFAULT_SUPPLIER_STATUS),
            default_currency: raw.string_or(&["defaultCurrency", "default_currency"], DEFAULT_CURRENCY),
            created_at: raw.str(&["createdAt", "created_at"]),
            updated_at: raw.str(&["updatedAt", "updated_at"]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalize::normalize;
    use serde_json::json;

    fn supplier(raw: serde_json::Value) -> Supplier {
        normalize(Some(&raw), "supplier-test").unwrap()
    }

    #[test]
    fn test_snake_case_to_camel_case() {
        let result = supplier(json!({
            "id": 1,
            "company_id": 1,
            "name": "ABC Supplier",
            "contact_name": "John Doe",
            "contact_email": "john@supplier.com",
            "vat_number": "AE123456789",
            "trn_number": "100123456789012",
            "supplier_type": "WHOLESALE",
            "payment_terms": 30,
            "on_time_delivery_pct": 95,
            "credit_limit": 50000
        }));

        assert_eq!(result.company_id, Some(1));
        assert_eq!(result.contact_name.as_deref(), Some("John Doe"));
        assert_eq!(result.contact_email.as_deref(), Some("john@supplier.com"));
        assert_eq!(result.vat_number.as_deref(), Some("AE123456789"));
        assert_eq!(result.trn_number.as_deref(), Some("100123456789012"));
        assert_eq!(result.supplier_type.as_deref(), Some("WHOLESALE"));
        assert_eq!(result.payment_terms.as_deref(), Some("30"));
        assert_eq!(result.on_time_delivery_pct, Some(95.0));
        assert_eq!(result.credit_limit, 50000.0);
    }

    #[test]
    fn test_camel_case_is_kept() {
        let result = supplier(json!({ "id": 1, "companyId": 1, "contactName": "Jane Doe" }));
        assert_eq!(result.company_id, Some(1));
        assert_eq!(result.contact_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let result = supplier(json!({ "id": 1, "name": "Minimal Supplier" }));

        assert_eq!(result.name, "Minimal Supplier");
        assert_eq!(result.email, "");
        assert_eq!(result.phone, "");
        assert_eq!(result.status, "ACTIVE");
        assert_eq!(result.current_credit, 0.0);
        assert_eq!(result.credit_limit, 0.0);
        assert_eq!(result.default_currency, "AED");
    }

    #[test]
    fn test_financial_fields_parsed_as_numbers() {
        let result = supplier(json!({
            "id": 1,
            "current_credit": "5000",
            "credit_limit": "100000",
            "on_time_delivery_pct": "92.5",
            "score": "88"
        }));

        assert_eq!(result.current_credit, 5000.0);
        assert_eq!(result.credit_limit, 100000.0);
        assert_eq!(result.on_time_delivery_pct, Some(92.5));
        assert_eq!(result.score, Some(88.0));
    }

    #[test]
    fn test_null_input() {
        assert_eq!(normalize::<Supplier>(None, "supplier-test"), None);
        assert_eq!(normalize::<Supplier>(Some(&json!(null)), "supplier-test"), None);
    }
}
