//! Cosmere RPG domain: actor/item data models, fragment composition and
//! derived statistics.
//!
//! Nothing in this crate holds global state. The [`ConfigCatalog`] is passed
//! explicitly into composition, validation and derivation.

pub mod actor;
pub mod catalog;
pub mod error;
pub mod item;
pub mod model;
pub mod schema;
pub mod types;

pub use actor::{common_actor_model, derive_actor_stats, CommonActorData};
pub use catalog::{CatalogTables, ConfigCatalog};
pub use error::{
    CatalogError, DerivationIntegrityError, DomainError, ParseIdError, SchemaCompositionError,
    SchemaValidationError, ValidationFailure,
};
pub use item::{loot_model, resolve_hold, weapon_model, LootItemData, WeaponItemData};
pub use model::fragments::{ActiveTraits, ItemTrait};
pub use model::{DataModel, DataModelBuilder, Fragment};
pub use schema::{Choices, FieldKind, FieldSpec, Schema};
pub use types::ConfigId;
