//! Access to raw API records of unknown casing.
//!
//! The gateway usually converts backend snake_case into camelCase, but not
//! every endpoint goes through it, so every lookup has to accept both forms.

use serde_json::{Map, Value};

use super::error::NormalizeError;

/// `sellingPrice` -> `selling_price`
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `purchase_orders` -> `purchaseOrders`
///
/// Only an underscore followed by a lowercase letter is folded.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            if let Some(next) = chars.peek().copied().filter(|c| c.is_ascii_lowercase()) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}

pub fn is_snake_case_key(key: &str) -> bool {
    key.contains('_')
}

/// Borrowed view over one JSON object from the API.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// `None` for anything that is not a JSON object
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }

    /// Value under exactly `key`; `null` counts as absent.
    pub fn present(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    /// camelCase key first, then its snake_case form.
    pub fn get(&self, canonical: &str) -> Option<&'a Value> {
        self.present(canonical).or_else(|| {
            let snake = to_snake_case(canonical);
            if snake == canonical {
                None
            } else {
                self.present(&snake)
            }
        })
    }

    /// First present value along an explicit alias chain.
    pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.present(key))
    }

    /// Text along the alias chain. Empty strings fall through to the next alias.
    pub fn str(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.present(key).and_then(value_as_string))
    }

    pub fn string_or(&self, keys: &[&str], default: &str) -> String {
        self.str(keys).unwrap_or_else(|| default.to_string())
    }

    pub fn f64(&self, keys: &[&str]) -> Option<f64> {
        self.first(keys).and_then(parse_f64)
    }

    pub fn f64_or(&self, keys: &[&str], default: f64) -> f64 {
        self.f64(keys).unwrap_or(default)
    }

    pub fn i64(&self, keys: &[&str]) -> Option<i64> {
        self.first(keys).and_then(parse_i64)
    }

    /// Required numeric identifier, `0` when missing or unparsable.
    pub fn id(&self, keys: &[&str]) -> i64 {
        self.i64(keys).unwrap_or(0)
    }

    pub fn bool(&self, keys: &[&str]) -> Option<bool> {
        self.first(keys).and_then(parse_bool)
    }

    pub fn bool_or(&self, keys: &[&str], default: bool) -> bool {
        self.bool(keys).unwrap_or(default)
    }

    /// Nested list of objects (order lines, allocations).
    ///
    /// Missing means empty; anything other than an array of objects is an error.
    pub fn records(&self, keys: &[&str]) -> Result<Vec<RawRecord<'a>>, NormalizeError> {
        let Some((key, value)) = keys
            .iter()
            .find_map(|key| self.present(key).map(|value| (*key, value)))
        else {
            return Ok(Vec::new());
        };

        let items = value
            .as_array()
            .ok_or_else(|| NormalizeError::unexpected_shape(key, "an array"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                RawRecord::from_value(item).ok_or_else(|| NormalizeError::InvalidElement {
                    field: key.to_string(),
                    index,
                })
            })
            .collect()
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings; never yields NaN or infinity.
pub fn parse_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}

pub fn parse_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(integral)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// 2^53: above it f64 no longer represents every integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn integral(number: f64) -> Option<i64> {
    if number.is_finite() && number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        Some(number as i64)
    } else {
        None
    }
}
