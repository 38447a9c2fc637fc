//! Stored-data schemas.
//!
//! A [`Schema`] is the merged set of field declarations of one entity type.
//! It validates stored documents (JSON objects, as handed over by the host's
//! persistence layer) and produces the initial document for new entities.

mod field;

pub use field::{Choices, FieldKind, FieldSpec};

use serde_json::{Map, Value};

use crate::catalog::ConfigCatalog;
use crate::error::{SchemaValidationError, ValidationFailure};

/// Ordered field declarations of one entity type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Top-level field names, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    /// Document holding every field's initial value.
    pub fn initial_document(&self) -> Value {
        field::initial_object(&self.fields)
    }

    /// Check a stored document against every declared constraint.
    ///
    /// Returns the first violation found. Keys not declared by the schema
    /// are rejected.
    pub fn validate(
        &self,
        document: &Value,
        catalog: &ConfigCatalog,
    ) -> Result<(), SchemaValidationError> {
        validate_object(&self.fields, document, "", catalog)
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn validate_object(
    fields: &[FieldSpec],
    value: &Value,
    path: &str,
    catalog: &ConfigCatalog,
) -> Result<(), SchemaValidationError> {
    let Some(object) = value.as_object() else {
        return Err(SchemaValidationError::new(
            path,
            ValidationFailure::WrongType { expected: "object" },
        ));
    };

    if let Some(unknown) = object
        .keys()
        .find(|key| !fields.iter().any(|field| field.name == key.as_str()))
    {
        return Err(SchemaValidationError::new(
            join(path, unknown),
            ValidationFailure::UnknownField,
        ));
    }

    for field in fields {
        let field_path = join(path, field.name);
        match object.get(field.name) {
            Some(value) => validate_value(field, value, &field_path, catalog)?,
            None if field.required => {
                return Err(SchemaValidationError::new(
                    field_path,
                    ValidationFailure::Required,
                ))
            }
            None => {}
        }
    }

    Ok(())
}

fn validate_value(
    field: &FieldSpec,
    value: &Value,
    path: &str,
    catalog: &ConfigCatalog,
) -> Result<(), SchemaValidationError> {
    let fail = |reason| Err(SchemaValidationError::new(path, reason));

    if value.is_null() {
        return if field.nullable {
            Ok(())
        } else {
            fail(ValidationFailure::NotNullable)
        };
    }

    match &field.kind {
        FieldKind::Number { integer, min, max } => {
            let Some(number) = value.as_f64() else {
                return fail(ValidationFailure::WrongType { expected: "number" });
            };
            if *integer && !(value.is_i64() || value.is_u64()) {
                return fail(ValidationFailure::NotInteger);
            }
            if let Some(min) = min.filter(|min| number < *min) {
                return fail(ValidationFailure::BelowMinimum { min });
            }
            if let Some(max) = max.filter(|max| number > *max) {
                return fail(ValidationFailure::AboveMaximum { max });
            }
            Ok(())
        }
        FieldKind::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                fail(ValidationFailure::WrongType { expected: "boolean" })
            }
        }
        FieldKind::String { blank, choices } => {
            let Some(text) = value.as_str() else {
                return fail(ValidationFailure::WrongType { expected: "string" });
            };
            if !blank && text.trim().is_empty() {
                return fail(ValidationFailure::Blank);
            }
            if let Some(choices) = choices {
                let choices = choices.resolve(catalog);
                if !choices.iter().any(|choice| choice == text) {
                    return fail(ValidationFailure::InvalidChoice {
                        value: text.to_string(),
                        choices,
                    });
                }
            }
            Ok(())
        }
        FieldKind::Schema(fields) => validate_object(fields, value, path, catalog),
        FieldKind::Array(element) => {
            let Some(items) = value.as_array() else {
                return fail(ValidationFailure::WrongType { expected: "array" });
            };
            items.iter().enumerate().try_for_each(|(index, item)| {
                validate_value(element, item, &join(path, &index.to_string()), catalog)
            })
        }
    }
}

/// Recursively merge `changes` into `target`.
///
/// Objects merge key by key; any other value (including arrays) replaces the
/// target value wholesale.
pub fn merge_document(target: &mut Value, changes: &Value) {
    match (target, changes) {
        (Value::Object(target), Value::Object(changes)) => merge_objects(target, changes),
        (target, changes) => *target = changes.clone(),
    }
}

fn merge_objects(target: &mut Map<String, Value>, changes: &Map<String, Value>) {
    for (key, change) in changes {
        match target.get_mut(key) {
            Some(existing) => merge_document(existing, change),
            None => {
                target.insert(key.clone(), change.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EquipHand, HoldType};
    use serde_json::json;

    fn equip_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::schema(
                "equip",
                vec![
                    FieldSpec::string("hold")
                        .choices(Choices::of::<HoldType>())
                        .initial("one_handed"),
                    FieldSpec::string("hand")
                        .choices(Choices::of::<EquipHand>())
                        .nullable()
                        .initial(Value::Null),
                ],
            ),
            FieldSpec::integer("quantity").min(0).initial(1),
            FieldSpec::array(
                "tags",
                FieldSpec::string("tag").non_blank(),
            ),
        ])
    }

    #[test]
    fn test_initial_document_is_valid() {
        let schema = equip_schema();
        let catalog = ConfigCatalog::cosmere();
        let initial = schema.initial_document();
        assert_eq!(
            initial,
            json!({
                "equip": { "hold": "one_handed", "hand": null },
                "quantity": 1,
                "tags": []
            })
        );
        assert!(schema.validate(&initial, &catalog).is_ok());
    }

    #[test]
    fn test_choice_violation_names_nested_field() {
        let schema = equip_schema();
        let doc = json!({
            "equip": { "hold": "three_handed", "hand": null },
            "quantity": 1,
            "tags": []
        });
        let err = schema.validate(&doc, &ConfigCatalog::cosmere()).unwrap_err();
        assert_eq!(err.field, "equip.hold");
        assert!(matches!(err.reason, ValidationFailure::InvalidChoice { .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let schema = equip_schema();
        let doc = json!({ "equip": { "hold": "one_handed" }, "quantity": 1, "tags": [] });
        let err = schema.validate(&doc, &ConfigCatalog::cosmere()).unwrap_err();
        assert_eq!(err.field, "equip.hand");
        assert_eq!(err.reason, ValidationFailure::Required);
    }

    #[test]
    fn test_null_rejected_when_not_nullable() {
        let schema = equip_schema();
        let doc = json!({ "equip": { "hold": null, "hand": null }, "quantity": 1, "tags": [] });
        let err = schema.validate(&doc, &ConfigCatalog::cosmere()).unwrap_err();
        assert_eq!(err.field, "equip.hold");
        assert_eq!(err.reason, ValidationFailure::NotNullable);
    }

    #[test]
    fn test_numeric_constraints() {
        let schema = equip_schema();
        let catalog = ConfigCatalog::cosmere();
        let equip = json!({ "hold": "one_handed", "hand": "main" });

        let err = schema
            .validate(&json!({ "equip": equip, "quantity": -1, "tags": [] }), &catalog)
            .unwrap_err();
        assert_eq!(err.reason, ValidationFailure::BelowMinimum { min: 0.0 });

        let err = schema
            .validate(&json!({ "equip": equip, "quantity": 1.5, "tags": [] }), &catalog)
            .unwrap_err();
        assert_eq!(err.reason, ValidationFailure::NotInteger);

        let err = schema
            .validate(&json!({ "equip": equip, "quantity": "two", "tags": [] }), &catalog)
            .unwrap_err();
        assert_eq!(err.reason, ValidationFailure::WrongType { expected: "number" });
    }

    #[test]
    fn test_array_elements_are_validated_with_index_path() {
        let schema = equip_schema();
        let doc = json!({
            "equip": { "hold": "one_handed", "hand": null },
            "quantity": 1,
            "tags": ["sharp", "  "]
        });
        let err = schema.validate(&doc, &ConfigCatalog::cosmere()).unwrap_err();
        assert_eq!(err.field, "tags.1");
        assert_eq!(err.reason, ValidationFailure::Blank);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let schema = equip_schema();
        let doc = json!({
            "equip": { "hold": "one_handed", "hand": null },
            "quantity": 1,
            "tags": [],
            "colour": "red"
        });
        let err = schema.validate(&doc, &ConfigCatalog::cosmere()).unwrap_err();
        assert_eq!(err.field, "colour");
        assert_eq!(err.reason, ValidationFailure::UnknownField);
    }

    #[test]
    fn test_merge_document_merges_objects_and_replaces_arrays() {
        let mut doc = json!({ "equip": { "hold": "one_handed", "hand": null }, "tags": ["a"] });
        merge_document(&mut doc, &json!({ "equip": { "hand": "off" }, "tags": [] }));
        assert_eq!(
            doc,
            json!({ "equip": { "hold": "one_handed", "hand": "off" }, "tags": [] })
        );
    }
}
