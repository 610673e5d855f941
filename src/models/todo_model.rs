use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{FieldErrorKind, ValidationError};

/// A todo item, keyed by its `title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    pub fn from_title<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Validates a raw request body into a `TodoItem`, collecting
    /// every offending field
    pub fn validate(input: &Value) -> Result<TodoItem, ValidationError> {
        let fields = object_body(input)?;
        let mut errors = ValidationError::default();

        let title = match fields.get("title") {
            None => {
                errors.push_field("title", FieldErrorKind::Missing);
                None
            }
            Some(value) => match non_empty_string(value) {
                Ok(title) => Some(title),
                Err(kind) => {
                    errors.push_field("title", kind);
                    None
                }
            },
        };

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push_field("description", FieldErrorKind::StringType);
                None
            }
        };

        let completed = match fields.get("completed") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                errors.push_field("completed", FieldErrorKind::BoolType);
                false
            }
        };

        match title {
            Some(title) => errors.into_result(TodoItem {
                title,
                description,
                completed,
            }),
            None => Err(errors),
        }
    }
}

/// Whether a field was supplied in an update body at all.
///
/// `Set(None)` on a nullable field is an explicit clear, which is
/// different from the field being `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence<T> {
    Unset,
    Set(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Presence::Unset
    }
}

impl<T> Presence<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Presence::Set(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Presence::Set(value) => Some(value),
            Presence::Unset => None,
        }
    }
}

/// Partial update for a `TodoItem`; only `Set` fields are applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoPatch {
    pub title: Presence<String>,
    pub description: Presence<Option<String>>,
    pub completed: Presence<bool>,
}

impl TodoPatch {
    pub fn validate(input: &Value) -> Result<TodoPatch, ValidationError> {
        let fields = object_body(input)?;
        let mut errors = ValidationError::default();
        let mut patch = TodoPatch::default();

        if let Some(value) = fields.get("title") {
            match non_empty_string(value) {
                Ok(title) => patch.title = Presence::Set(title),
                Err(kind) => errors.push_field("title", kind),
            }
        }

        match fields.get("description") {
            None => {}
            Some(Value::Null) => patch.description = Presence::Set(None),
            Some(Value::String(s)) => patch.description = Presence::Set(Some(s.clone())),
            Some(_) => errors.push_field("description", FieldErrorKind::StringType),
        }

        match fields.get("completed") {
            None => {}
            Some(Value::Bool(b)) => patch.completed = Presence::Set(*b),
            Some(_) => errors.push_field("completed", FieldErrorKind::BoolType),
        }

        errors.into_result(patch)
    }

    pub fn is_empty(&self) -> bool {
        !self.title.is_set() && !self.description.is_set() && !self.completed.is_set()
    }

    /// Title the item will be found under once this patch is applied
    pub fn lookup_title<'a>(&'a self, current: &'a str) -> &'a str {
        self.title.get().map(String::as_str).unwrap_or(current)
    }

    /// Applies the set fields to `item`, returning whether anything changed
    pub fn apply_to(&self, item: &mut TodoItem) -> bool {
        let before = item.clone();

        if let Presence::Set(title) = &self.title {
            item.title = title.clone();
        }
        if let Presence::Set(description) = &self.description {
            item.description = description.clone();
        }
        if let Presence::Set(completed) = self.completed {
            item.completed = completed;
        }

        *item != before
    }
}

fn object_body(input: &Value) -> Result<&Map<String, Value>, ValidationError> {
    input.as_object().ok_or_else(|| {
        ValidationError::body(
            FieldErrorKind::DictType,
            "Input should be a valid dictionary or object",
        )
    })
}

fn non_empty_string(value: &Value) -> Result<String, FieldErrorKind> {
    match value {
        Value::String(s) if s.is_empty() => Err(FieldErrorKind::StringTooShort),
        Value::String(s) => Ok(s.clone()),
        _ => Err(FieldErrorKind::StringType),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn kinds(err: &ValidationError) -> Vec<(String, FieldErrorKind)> {
        err.errors()
            .iter()
            .map(|e| (e.loc.join("."), e.kind))
            .collect()
    }

    #[test]
    fn title_only_body_gets_defaults() {
        let item = TodoItem::validate(&json!({"title": "NewTask"})).unwrap();

        assert_eq!(item, TodoItem::from_title("NewTask"));
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"title": "NewTask", "description": null, "completed": false})
        );
    }

    #[test]
    fn full_body_is_kept_verbatim() {
        let item = TodoItem::validate(&json!({
            "title": "Learn actix",
            "description": "Build a small project",
            "completed": true,
            "unknown": 1
        }))
        .unwrap();

        assert_eq!(item.title, "Learn actix");
        assert_eq!(item.description.as_deref(), Some("Build a small project"));
        assert!(item.completed);
    }

    #[test]
    fn missing_title_is_reported() {
        let err = TodoItem::validate(&json!({"completed": true})).unwrap_err();

        assert_eq!(
            kinds(&err),
            vec![("body.title".to_string(), FieldErrorKind::Missing)]
        );
    }

    #[test]
    fn every_bad_field_is_reported() {
        let err = TodoItem::validate(&json!({
            "title": "",
            "description": 5,
            "completed": "yes"
        }))
        .unwrap_err();

        assert_eq!(
            kinds(&err),
            vec![
                ("body.title".to_string(), FieldErrorKind::StringTooShort),
                ("body.description".to_string(), FieldErrorKind::StringType),
                ("body.completed".to_string(), FieldErrorKind::BoolType),
            ]
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = TodoItem::validate(&json!(["title"])).unwrap_err();

        assert_eq!(
            kinds(&err),
            vec![("body".to_string(), FieldErrorKind::DictType)]
        );
    }

    #[test]
    fn patch_excludes_absent_fields() {
        let patch = TodoPatch::validate(&json!({"completed": true})).unwrap();

        assert_eq!(patch.title, Presence::Unset);
        assert_eq!(patch.description, Presence::Unset);
        assert_eq!(patch.completed, Presence::Set(true));
    }

    #[test]
    fn patch_distinguishes_explicit_null_description() {
        let cleared = TodoPatch::validate(&json!({"description": null})).unwrap();
        let untouched = TodoPatch::validate(&json!({})).unwrap();

        assert_eq!(cleared.description, Presence::Set(None));
        assert_eq!(untouched.description, Presence::Unset);
        assert!(untouched.is_empty());
    }

    #[test]
    fn patch_rejects_null_title_and_completed() {
        let err = TodoPatch::validate(&json!({"title": null, "completed": null})).unwrap_err();

        assert_eq!(
            kinds(&err),
            vec![
                ("body.title".to_string(), FieldErrorKind::StringType),
                ("body.completed".to_string(), FieldErrorKind::BoolType),
            ]
        );
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut item = TodoItem {
            title: "NewTask".to_string(),
            description: Some("keep me".to_string()),
            completed: false,
        };
        let patch = TodoPatch {
            completed: Presence::Set(true),
            ..TodoPatch::default()
        };

        assert!(patch.apply_to(&mut item));
        assert_eq!(item.title, "NewTask");
        assert_eq!(item.description.as_deref(), Some("keep me"));
        assert!(item.completed);

        // same values again: nothing changes
        assert!(!patch.apply_to(&mut item));
    }

    #[test]
    fn lookup_title_follows_rename() {
        let rename = TodoPatch {
            title: Presence::Set("NewTask1".to_string()),
            ..TodoPatch::default()
        };

        assert_eq!(rename.lookup_title("NewTask"), "NewTask1");
        assert_eq!(TodoPatch::default().lookup_title("NewTask"), "NewTask");
    }
}
