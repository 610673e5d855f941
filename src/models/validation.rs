use std::fmt::Display;

use serde::Serialize;

/// Category of a single field failure, serialized in snake case
/// (`missing`, `string_type`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    StringType,
    StringTooShort,
    BoolType,
    DictType,
    JsonInvalid,
}

impl FieldErrorKind {
    fn default_message(&self) -> &'static str {
        match self {
            Self::Missing => "Field required",
            Self::StringType => "Input should be a valid string",
            Self::StringTooShort => "String should have at least 1 character",
            Self::BoolType => "Input should be a valid boolean",
            Self::DictType => "Input should be a valid dictionary or object",
            Self::JsonInvalid => "JSON decode error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
}

/// Every problem found in one request body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Error located on the body as a whole
    pub fn body(kind: FieldErrorKind, msg: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                loc: vec!["body".to_string()],
                msg: msg.into(),
                kind,
            }],
        }
    }

    pub fn push_field(&mut self, field: &str, kind: FieldErrorKind) {
        self.errors.push(FieldError {
            loc: vec!["body".to_string(), field.to_string()],
            msg: kind.default_message().to_string(),
            kind,
        });
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Yields `value` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
            .collect();

        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_serialize_with_location_and_type() {
        let mut err = ValidationError::default();
        err.push_field("title", FieldErrorKind::Missing);

        let json = serde_json::to_value(err.errors()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "loc": ["body", "title"],
                "msg": "Field required",
                "type": "missing"
            }])
        );
    }

    #[test]
    fn empty_error_converts_into_ok() {
        assert_eq!(ValidationError::default().into_result(7), Ok(7));
    }

    #[test]
    fn display_lists_every_field() {
        let mut err = ValidationError::default();
        err.push_field("title", FieldErrorKind::StringType);
        err.push_field("completed", FieldErrorKind::BoolType);

        assert_eq!(
            err.to_string(),
            "body.title: Input should be a valid string; body.completed: Input should be a valid boolean"
        );
    }
}
