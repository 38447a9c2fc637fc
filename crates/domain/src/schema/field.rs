//! Field declarations contributed by fragments.
//!
//! A field carries its data type, bounds, nullability and initial value.
//! Declarations are plain data; enforcing them is [`super::Schema::validate`]'s job.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::catalog::ConfigCatalog;
use crate::types::ConfigId;

/// Definition of a single stored field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Key of the field within its parent object
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether the key must be present
    pub required: bool,
    /// Whether `null` is an accepted value
    pub nullable: bool,
    /// Value used when instantiating a fresh document
    pub initial: Value,
}

/// Data type of a field and its type-specific constraints.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Number {
        integer: bool,
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    String {
        /// Whether an empty (or whitespace-only) string is accepted
        blank: bool,
        choices: Option<Choices>,
    },
    /// Nested object with its own field declarations
    Schema(Vec<FieldSpec>),
    /// Ordered sequence of values matching one element declaration
    Array(Box<FieldSpec>),
}

impl FieldSpec {
    fn with_kind(name: &'static str, kind: FieldKind, initial: Value) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
            initial,
        }
    }

    /// Whole number field, initial `0`.
    pub fn integer(name: &'static str) -> Self {
        Self::with_kind(
            name,
            FieldKind::Number {
                integer: true,
                min: None,
                max: None,
            },
            Value::from(0),
        )
    }

    /// Whole number field bounded to the `i32` range.
    pub fn int32(name: &'static str) -> Self {
        Self::integer(name).min(i32::MIN).max(i32::MAX)
    }

    /// Non-negative whole number field bounded to the `u32` range.
    pub fn uint32(name: &'static str) -> Self {
        Self::integer(name).min(0).max(u32::MAX)
    }

    /// Real number field, initial `0`.
    pub fn number(name: &'static str) -> Self {
        Self::with_kind(
            name,
            FieldKind::Number {
                integer: false,
                min: None,
                max: None,
            },
            Value::from(0),
        )
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::with_kind(name, FieldKind::Boolean, Value::Bool(false))
    }

    /// String field accepting blanks, initial `""`.
    pub fn string(name: &'static str) -> Self {
        Self::with_kind(
            name,
            FieldKind::String {
                blank: true,
                choices: None,
            },
            Value::String(String::new()),
        )
    }

    /// Nested object; its initial value is built from the children's initials.
    pub fn schema(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        let initial = initial_object(&fields);
        Self::with_kind(name, FieldKind::Schema(fields), initial)
    }

    /// Sequence of `element` values, initial `[]`.
    pub fn array(name: &'static str, element: FieldSpec) -> Self {
        Self::with_kind(
            name,
            FieldKind::Array(Box::new(element)),
            Value::Array(Vec::new()),
        )
    }

    pub fn min(mut self, bound: impl Into<f64>) -> Self {
        if let FieldKind::Number { min, .. } = &mut self.kind {
            *min = Some(bound.into());
        }
        self
    }

    pub fn max(mut self, bound: impl Into<f64>) -> Self {
        if let FieldKind::Number { max, .. } = &mut self.kind {
            *max = Some(bound.into());
        }
        self
    }

    /// Reject empty strings.
    pub fn non_blank(mut self) -> Self {
        if let FieldKind::String { blank, .. } = &mut self.kind {
            *blank = false;
        }
        self
    }

    /// Restrict a string field to a set of choices, resolved at validation time.
    pub fn choices(mut self, source: Choices) -> Self {
        if let FieldKind::String { choices, .. } = &mut self.kind {
            *choices = Some(source);
        }
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The key may be absent from a stored document.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = value.into();
        self
    }
}

/// Build an object holding the initial value of every declared field.
pub(crate) fn initial_object(fields: &[FieldSpec]) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .filter(|field| field.required || !field.initial.is_null())
        .map(|field| (field.name.to_string(), field.initial.clone()))
        .collect();
    Value::Object(map)
}

/// Lazily resolved set of valid string values.
///
/// The closure runs each time a value is validated, never at declaration
/// time, so choices follow whatever the catalog holds when the check happens.
#[derive(Clone)]
pub struct Choices(Arc<dyn Fn(&ConfigCatalog) -> Vec<String> + Send + Sync>);

impl Choices {
    pub fn lazy<F>(resolve: F) -> Self
    where
        F: Fn(&ConfigCatalog) -> Vec<String> + Send + Sync + 'static,
    {
        Self(Arc::new(resolve))
    }

    /// Every member of a closed id enumeration.
    pub fn of<K: ConfigId>() -> Self {
        Self::lazy(|_| K::ALL.iter().map(|id| id.as_str().to_string()).collect())
    }

    /// The keys of one catalog table.
    pub fn keys<K, V>(table: fn(&ConfigCatalog) -> &BTreeMap<K, V>) -> Self
    where
        K: ConfigId,
        V: 'static,
    {
        Self::lazy(move |catalog| {
            table(catalog)
                .keys()
                .map(|id| id.as_str().to_string())
                .collect()
        })
    }

    pub fn resolve(&self, catalog: &ConfigCatalog) -> Vec<String> {
        (self.0)(catalog)
    }
}

impl fmt::Debug for Choices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Choices(..)")
    }
}
