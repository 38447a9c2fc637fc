//! Data model composition.
//!
//! An entity type is assembled from independent [`Fragment`]s. Each fragment
//! contributes a slice of stored fields and, optionally, a derivation step.
//! [`DataModelBuilder`] merges the slices into one [`Schema`] (rejecting
//! field name collisions) and keeps the derivation steps in composition
//! order, followed by any entity-specific steps.
//!
//! ```text
//! [ fragment 1 ] [ fragment 2 ] ... [ fragment N ]   -> merged Schema
//!       |              |                  |
//!   derive 1   ->  derive 2   ->  ... derive N  -> entity steps
//! ```

pub mod fragments;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::ConfigCatalog;
use crate::error::{
    DerivationIntegrityError, DomainError, SchemaCompositionError, SchemaValidationError,
};
use crate::schema::{merge_document, FieldSpec, Schema};

/// A reusable capability slice of an entity type.
///
/// `E` is the concrete entity the fragment is composed into. Fragments that
/// derive data bound `E` by an accessor trait for the data they own.
pub trait Fragment<E>: Send + Sync {
    /// Fragment name, used in composition errors and logs
    fn name(&self) -> &'static str;

    /// Stored fields contributed by this fragment.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Derive the fields this fragment owns.
    ///
    /// Runs after every fragment composed before this one.
    fn prepare_derived(
        &self,
        _entity: &mut E,
        _catalog: &ConfigCatalog,
    ) -> Result<(), DerivationIntegrityError> {
        Ok(())
    }
}

/// Entity-specific derivation step, run after all fragment steps.
pub type DerivationStep<E> =
    Box<dyn Fn(&mut E, &ConfigCatalog) -> Result<(), DerivationIntegrityError> + Send + Sync>;

/// Collects fragments and entity steps for one entity type.
pub struct DataModelBuilder<E> {
    name: &'static str,
    fragments: Vec<Box<dyn Fragment<E>>>,
    steps: Vec<(&'static str, DerivationStep<E>)>,
}

impl<E> DataModelBuilder<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fragments: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Append a fragment. Composition order is derivation order.
    pub fn fragment(mut self, fragment: impl Fragment<E> + 'static) -> Self {
        self.fragments.push(Box::new(fragment));
        self
    }

    /// Append an entity-specific derivation step.
    pub fn derive<F>(mut self, name: &'static str, step: F) -> Self
    where
        F: Fn(&mut E, &ConfigCatalog) -> Result<(), DerivationIntegrityError>
            + Send
            + Sync
            + 'static,
    {
        self.steps.push((name, Box::new(step)));
        self
    }

    /// Merge all fragment slices into one schema.
    ///
    /// Fails if two fragments declare the same top-level field.
    pub fn build(self) -> Result<DataModel<E>, SchemaCompositionError> {
        let mut owners: Vec<(&'static str, &'static str)> = Vec::new();
        let mut fields = Vec::new();

        for fragment in &self.fragments {
            for field in fragment.fields() {
                if let Some(&(_, first)) = owners.iter().find(|(name, _)| *name == field.name) {
                    return Err(SchemaCompositionError {
                        model: self.name,
                        field: field.name,
                        first,
                        second: fragment.name(),
                    });
                }
                owners.push((field.name, fragment.name()));
                fields.push(field);
            }
        }

        tracing::debug!(
            model = self.name,
            fragments = self.fragments.len(),
            fields = fields.len(),
            "Composed data model"
        );

        Ok(DataModel {
            name: self.name,
            schema: Schema::new(fields),
            fragments: self.fragments,
            steps: self.steps,
        })
    }
}

/// A composed entity type: merged schema plus ordered derivation pipeline.
pub struct DataModel<E> {
    name: &'static str,
    schema: Schema,
    fragments: Vec<Box<dyn Fragment<E>>>,
    steps: Vec<(&'static str, DerivationStep<E>)>,
}

impl<E> DataModel<E> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fragment names in composition order.
    pub fn fragment_names(&self) -> Vec<&'static str> {
        self.fragments.iter().map(|fragment| fragment.name()).collect()
    }

    /// Validate a stored document against the merged schema.
    pub fn validate(
        &self,
        document: &Value,
        catalog: &ConfigCatalog,
    ) -> Result<(), SchemaValidationError> {
        self.schema.validate(document, catalog)
    }
}

impl<E> DataModel<E>
where
    E: Clone + Serialize + DeserializeOwned,
{
    /// Validate a stored document and decode it into the entity type.
    pub fn load(&self, document: Value, catalog: &ConfigCatalog) -> Result<E, DomainError> {
        self.validate(&document, catalog)?;
        serde_json::from_value(document).map_err(|e| DomainError::decode(self.name, e.to_string()))
    }

    /// Instantiate a new entity from every field's initial value.
    pub fn create(&self, catalog: &ConfigCatalog) -> Result<E, DomainError> {
        self.load(self.schema.initial_document(), catalog)
    }

    /// Apply a partial write to an entity.
    ///
    /// The changes are merged into the entity's stored form and the result is
    /// validated as a whole. On rejection `current` is untouched.
    pub fn update(
        &self,
        current: &E,
        changes: &Value,
        catalog: &ConfigCatalog,
    ) -> Result<E, DomainError> {
        let mut document = serde_json::to_value(current)
            .map_err(|e| DomainError::decode(self.name, e.to_string()))?;
        merge_document(&mut document, changes);
        self.load(document, catalog)
    }

    /// Run one derivation pass: every fragment step in composition order,
    /// then the entity steps.
    ///
    /// The pass works on a copy; `entity` is only replaced if every step
    /// succeeds, so a failed pass leaves the previous derived values in place.
    pub fn prepare_derived(
        &self,
        entity: &mut E,
        catalog: &ConfigCatalog,
    ) -> Result<(), DerivationIntegrityError> {
        let mut staged = entity.clone();

        for fragment in &self.fragments {
            fragment
                .prepare_derived(&mut staged, catalog)
                .inspect_err(|e| self.report(fragment.name(), e))?;
        }
        for (name, step) in &self.steps {
            step(&mut staged, catalog).inspect_err(|e| self.report(name, e))?;
        }

        *entity = staged;
        tracing::debug!(model = self.name, "Derivation pass complete");
        Ok(())
    }

    fn report(&self, step: &str, error: &DerivationIntegrityError) {
        tracing::warn!(model = self.name, step, error = %error, "Derivation pass aborted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;
    use crate::schema::Choices;
    use crate::types::Attribute;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Crate {
        id: String,
        weight: i32,
        #[serde(default)]
        load: i32,
    }

    struct IdSlice;

    impl Fragment<Crate> for IdSlice {
        fn name(&self) -> &'static str {
            "id"
        }

        fn fields(&self) -> Vec<FieldSpec> {
            vec![FieldSpec::string("id").non_blank().initial("crate")]
        }
    }

    struct WeightSlice;

    impl Fragment<Crate> for WeightSlice {
        fn name(&self) -> &'static str {
            "weight"
        }

        fn fields(&self) -> Vec<FieldSpec> {
            vec![
                FieldSpec::integer("weight").min(0).initial(2),
                FieldSpec::integer("load").optional(),
            ]
        }

        fn prepare_derived(
            &self,
            entity: &mut Crate,
            _catalog: &ConfigCatalog,
        ) -> Result<(), DerivationIntegrityError> {
            entity.load = entity.weight * 10;
            Ok(())
        }
    }

    struct ShadowIdSlice;

    impl Fragment<Crate> for ShadowIdSlice {
        fn name(&self) -> &'static str {
            "shadow"
        }

        fn fields(&self) -> Vec<FieldSpec> {
            vec![FieldSpec::string("id")]
        }
    }

    struct ChoiceIdSlice(Choices);

    impl Fragment<Crate> for ChoiceIdSlice {
        fn name(&self) -> &'static str {
            "id"
        }

        fn fields(&self) -> Vec<FieldSpec> {
            vec![FieldSpec::string("id").choices(self.0.clone())]
        }
    }

    fn crate_model() -> DataModel<Crate> {
        DataModelBuilder::new("crate")
            .fragment(IdSlice)
            .fragment(WeightSlice)
            .derive("double_load", |entity: &mut Crate, _| {
                entity.load *= 2;
                Ok(())
            })
            .build()
            .unwrap()
    }

    #[test]
    fn colliding_fields_fail_composition() {
        let err = DataModelBuilder::<Crate>::new("crate")
            .fragment(IdSlice)
            .fragment(ShadowIdSlice)
            .build()
            .err()
            .unwrap();
        assert_eq!(
            err,
            SchemaCompositionError {
                model: "crate",
                field: "id",
                first: "id",
                second: "shadow",
            }
        );
    }

    #[test]
    fn schema_keeps_composition_order() {
        let model = crate_model();
        assert_eq!(model.schema().field_names(), vec!["id", "weight", "load"]);
        assert_eq!(model.fragment_names(), vec!["id", "weight"]);
    }

    #[test]
    fn entity_steps_run_after_fragment_steps() {
        let model = crate_model();
        let catalog = ConfigCatalog::cosmere();
        let mut entity = model.create(&catalog).unwrap();

        model.prepare_derived(&mut entity, &catalog).unwrap();
        assert_eq!(entity.load, 40);

        // Idempotent: the fragment step recomputes load from weight first
        model.prepare_derived(&mut entity, &catalog).unwrap();
        assert_eq!(entity.load, 40);
    }

    #[test]
    fn failed_pass_leaves_entity_untouched() {
        let model = DataModelBuilder::new("crate")
            .fragment(WeightSlice)
            .fragment(IdSlice)
            .derive("fail", |_: &mut Crate, _| {
                Err(DerivationIntegrityError::MissingAttribute(Attribute::Strength))
            })
            .build()
            .unwrap();
        let catalog = ConfigCatalog::cosmere();
        let mut entity = Crate {
            id: "a".to_string(),
            weight: 3,
            load: 7,
        };

        let err = model.prepare_derived(&mut entity, &catalog).unwrap_err();
        assert_eq!(
            err,
            DerivationIntegrityError::MissingAttribute(Attribute::Strength)
        );
        assert_eq!(entity.load, 7);
    }

    #[test]
    fn update_rejects_invalid_write_and_keeps_original() {
        let model = crate_model();
        let catalog = ConfigCatalog::cosmere();
        let entity = model.create(&catalog).unwrap();

        let err = model
            .update(&entity, &json!({ "weight": -1 }), &catalog)
            .unwrap_err();
        match err {
            DomainError::Validation(err) => {
                assert_eq!(err.field, "weight");
                assert_eq!(err.reason, ValidationFailure::BelowMinimum { min: 0.0 });
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(entity.weight, 2);

        let updated = model
            .update(&entity, &json!({ "weight": 5 }), &catalog)
            .unwrap();
        assert_eq!(updated.weight, 5);
        assert_eq!(updated.id, "crate");
    }

    #[test]
    fn choices_resolve_on_each_validation_not_at_composition() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let choices = Choices::lazy(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            vec!["crate".to_string()]
        });

        let model = DataModelBuilder::new("crate")
            .fragment(ChoiceIdSlice(choices))
            .fragment(WeightSlice)
            .build()
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let catalog = ConfigCatalog::cosmere();
        let document = json!({ "id": "crate", "weight": 1 });
        model.validate(&document, &catalog).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        model.validate(&document, &catalog).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let err = model
            .validate(&json!({ "id": "barrel", "weight": 1 }), &catalog)
            .unwrap_err();
        assert_eq!(err.field, "id");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn load_validates_before_decoding() {
        let model = crate_model();
        let catalog = ConfigCatalog::cosmere();

        let err = model
            .load(json!({ "id": "", "weight": 1 }), &catalog)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let entity = model
            .load(json!({ "id": "b", "weight": 1 }), &catalog)
            .unwrap();
        assert_eq!(entity.load, 0);
    }
}
