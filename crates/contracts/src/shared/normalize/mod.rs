//! Normalization of raw API payloads into canonical camelCase records.
//!
//! Every entity normalizer implements [`Normalize`]; callers go through
//! [`normalize`] / [`normalize_list`], which never fail: bad input is logged
//! with the source label and dropped.

pub mod accessors;
pub mod error;
pub mod raw;

pub use error::NormalizeError;
pub use raw::RawRecord;

use serde_json::Value;

use raw::to_snake_case;

/// Canonical record that can be built from a raw API object.
pub trait Normalize: Sized {
    /// Entity name for diagnostics and list envelopes (`"customers"`)
    const ENTITY: &'static str;

    fn from_raw(raw: RawRecord<'_>) -> Result<Self, NormalizeError>;
}

/// Normalize a single optional payload.
pub fn normalize<T: Normalize>(raw: Option<&Value>, source: &str) -> Option<T> {
    let Some(value) = raw else {
        log::error!("[{}] {} payload is missing", source, T::ENTITY);
        return None;
    };
    normalize_value(value, source)
}

/// Normalize a single payload; `None` unless it is a well-formed object.
pub fn normalize_value<T: Normalize>(value: &Value, source: &str) -> Option<T> {
    let Some(record) = RawRecord::from_value(value) else {
        log::error!(
            "[{}] invalid {} payload, expected an object: {}",
            source,
            T::ENTITY,
            value
        );
        return None;
    };

    match T::from_raw(record) {
        Ok(normalized) => Some(normalized),
        Err(err) => {
            log::error!(
                "[{}] failed to normalize {}: {}; payload: {}",
                source,
                T::ENTITY,
                err,
                value
            );
            None
        }
    }
}

/// Normalize every record, dropping the ones that fail. Order is preserved.
pub fn normalize_list<T: Normalize>(raws: &[Value], source: &str) -> Vec<T> {
    let normalized: Vec<T> = raws
        .iter()
        .filter_map(|value| normalize_value(value, source))
        .collect();

    if normalized.len() != raws.len() {
        log::warn!(
            "[{}] dropped {} of {} {} records",
            source,
            raws.len() - normalized.len(),
            raws.len(),
            T::ENTITY
        );
    }
    normalized
}

/// Records of a list response.
///
/// List endpoints answer with a bare array, but some wrap it as
/// `{ "<entity>": [...] }` (camelCase or snake_case) or `{ "data": [...] }`.
pub fn list_payload<'a>(payload: &'a Value, entity_key: &str) -> &'a [Value] {
    match payload {
        Value::Array(items) => items,
        Value::Object(fields) => {
            let snake_key = to_snake_case(entity_key);
            for key in [entity_key, snake_key.as_str(), "data", "items", "results"] {
                if let Some(Value::Array(items)) = fields.get(key) {
                    return items;
                }
            }
            log::warn!("list payload has no `{}` array", entity_key);
            &[]
        }
        other => {
            log::warn!("unexpected list payload for `{}`: {}", entity_key, other);
            &[]
        }
    }
}

#[cfg(test)]
pub(crate) mod test_log {
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    /// Captures `log` output so tests can assert on diagnostics.
    pub struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(format!("{} {}", record.level(), record.args()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: Lazy<CaptureLogger> = Lazy::new(|| CaptureLogger {
        lines: Mutex::new(Vec::new()),
    });

    pub fn install() {
        // Another test may have installed it already
        let _ = log::set_logger(&*LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    }

    /// Lines mentioning `needle`; tests use a unique source label each.
    pub fn lines_with(needle: &str) -> Vec<String> {
        LOGGER
            .lines
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|line| line.contains(needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
