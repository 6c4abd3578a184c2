use thiserror::Error;

/// Ошибки извлечения полей из сырого ответа API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("field `{field}` has unexpected shape, expected {expected}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },

    #[error("element {index} of `{field}` is not an object")]
    InvalidElement { field: String, index: usize },
}

impl NormalizeError {
    pub fn unexpected_shape(field: &str, expected: &'static str) -> Self {
        Self::UnexpectedShape {
            field: field.to_string(),
            expected,
        }
    }
}
