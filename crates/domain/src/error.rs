//! Unified error types for the domain layer
//!
//! Each failure class has its own type so callers can tell apart a fatal
//! model definition bug (composition), a rejected write (validation) and an
//! aborted derivation pass (integrity). [`DomainError`] wraps all of them for
//! callers that only need to propagate.

use thiserror::Error;

use crate::types::{Attribute, AttributeGroup, Skill};

/// Two fragments of one model declare the same top-level field.
///
/// Raised while building a data model; a model that fails to compose must
/// never be used, so this is treated as fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Field `{field}` of model `{model}` is declared by both `{first}` and `{second}`")]
pub struct SchemaCompositionError {
    pub model: &'static str,
    pub field: &'static str,
    pub first: &'static str,
    pub second: &'static str,
}

/// A stored value violates the constraint its fragment declared for it.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid value for `{field}`: {reason}")]
pub struct SchemaValidationError {
    /// Dotted path of the offending field (e.g. `equip.hold`, `traits.1.id`)
    pub field: String,
    pub reason: ValidationFailure,
}

impl SchemaValidationError {
    pub fn new(field: impl Into<String>, reason: ValidationFailure) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// The constraint that a rejected value failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationFailure {
    #[error("field is required")]
    Required,
    #[error("field may not be null")]
    NotNullable,
    #[error("expected {expected}")]
    WrongType { expected: &'static str },
    #[error("must be an integer")]
    NotInteger,
    #[error("must be at least {min}")]
    BelowMinimum { min: f64 },
    #[error("must be at most {max}")]
    AboveMaximum { max: f64 },
    #[error("may not be blank")]
    Blank,
    #[error("`{value}` is not one of: {}", .choices.join(", "))]
    InvalidChoice { value: String, choices: Vec<String> },
    #[error("field is not declared by any fragment")]
    UnknownField,
}

/// A derivation step referenced stored data (or catalog data) that is absent.
///
/// Aborts the current derivation pass for one entity only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationIntegrityError {
    #[error("Stored attribute `{0}` is missing")]
    MissingAttribute(Attribute),
    #[error("Catalog has no attribute group `{0}`")]
    MissingAttributeGroup(AttributeGroup),
    #[error("Catalog has no skill `{0}`")]
    MissingSkill(Skill),
    #[error("Derived value `{field}` is out of range")]
    Overflow { field: String },
}

/// The injected configuration catalog is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Catalog table `{table}` has no entry for `{id}`")]
    MissingEntry {
        table: &'static str,
        id: &'static str,
    },

    #[error("Skill `{skill}` is listed under attribute `{listed}` but governed by `{governing}`")]
    InconsistentSkill {
        skill: Skill,
        listed: Attribute,
        governing: Attribute,
    },

    #[error("Skill `{skill}` is not listed by its governing attribute `{attribute}`")]
    UnlistedSkill { skill: Skill, attribute: Attribute },

    #[error("Attribute `{attribute}` belongs to {count} attribute groups, expected exactly one")]
    AttributeGrouping { attribute: Attribute, count: usize },
}

/// An id string did not name any member of a closed id enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind} id `{id}`")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub id: String,
}

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Composition(#[from] SchemaCompositionError),

    #[error(transparent)]
    Validation(#[from] SchemaValidationError),

    #[error(transparent)]
    Derivation(#[from] DerivationIntegrityError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A document passed validation but could not be decoded into its model type
    #[error("Failed to decode `{model}` document: {message}")]
    Decode { model: &'static str, message: String },
}

impl DomainError {
    /// Create a decode error
    pub fn decode(model: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            model,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_error_message() {
        let err = SchemaCompositionError {
            model: "weapon",
            field: "id",
            first: "identity",
            second: "shadow",
        };
        assert_eq!(
            err.to_string(),
            "Field `id` of model `weapon` is declared by both `identity` and `shadow`"
        );
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = SchemaValidationError::new(
            "equip.hold",
            ValidationFailure::InvalidChoice {
                value: "three_handed".to_string(),
                choices: vec!["one_handed".to_string(), "two_handed".to_string()],
            },
        );
        assert_eq!(
            err.to_string(),
            "Invalid value for `equip.hold`: `three_handed` is not one of: one_handed, two_handed"
        );
    }

    #[test]
    fn test_integrity_error_message() {
        let err = DerivationIntegrityError::MissingAttribute(Attribute::Awareness);
        assert_eq!(err.to_string(), "Stored attribute `awa` is missing");
    }

    #[test]
    fn test_domain_error_from_conversions() {
        let err: DomainError = DerivationIntegrityError::MissingSkill(Skill::Lore).into();
        assert!(matches!(err, DomainError::Derivation(_)));

        let err: DomainError = CatalogError::Parse("eof".to_string()).into();
        assert!(matches!(err, DomainError::Catalog(_)));
        assert_eq!(err.to_string(), "Failed to parse catalog: eof");
    }

    #[test]
    fn test_decode_error() {
        let err = DomainError::decode("weapon", "missing field `equip`");
        assert!(matches!(err, DomainError::Decode { .. }));
        assert!(err.to_string().contains("weapon"));
    }
}
