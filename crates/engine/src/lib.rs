//! Cosmere Engine - host-side tooling around the domain crate.
//!
//! Loads the configuration catalog, composes every data model once, and runs
//! validation plus a derivation pass over stored documents.

pub mod config;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use cosmere_domain::{
    common_actor_model, loot_model, weapon_model, CommonActorData, ConfigCatalog, DataModel,
    DomainError, LootItemData, SchemaCompositionError, WeaponItemData,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use config::AppConfig;

/// Document types the runner can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentKind {
    Actor,
    Weapon,
    Loot,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Actor, Self::Weapon, Self::Loot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Weapon => "weapon",
            Self::Loot => "loot",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown document kind `{0}` (expected actor, weapon or loot)")]
pub struct UnknownKindError(pub String);

impl FromStr for DocumentKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "actor" => Ok(Self::Actor),
            "weapon" => Ok(Self::Weapon),
            "loot" => Ok(Self::Loot),
            _ => Err(UnknownKindError(s.to_string())),
        }
    }
}

/// Load the catalog from a JSON file, or the built-in one if no path is set.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<ConfigCatalog> {
    let Some(path) = path else {
        tracing::info!("Using built-in catalog");
        return Ok(ConfigCatalog::cosmere());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog = ConfigCatalog::from_json(&json)
        .with_context(|| format!("Invalid catalog file {}", path.display()))?;
    tracing::info!(path = %path.display(), "Loaded catalog");
    Ok(catalog)
}

/// Every data model, composed once against one catalog.
pub struct Models {
    pub actor: DataModel<CommonActorData>,
    pub weapon: DataModel<WeaponItemData>,
    pub loot: DataModel<LootItemData>,
}

impl Models {
    pub fn compose(catalog: &ConfigCatalog) -> Result<Self, SchemaCompositionError> {
        Ok(Self {
            actor: common_actor_model(catalog)?,
            weapon: weapon_model()?,
            loot: loot_model()?,
        })
    }

    /// Validate a stored document and return it with derived fields filled in.
    pub fn derive(
        &self,
        kind: DocumentKind,
        document: Value,
        catalog: &ConfigCatalog,
    ) -> Result<Value, DomainError> {
        match kind {
            DocumentKind::Actor => derive_with(&self.actor, document, catalog),
            DocumentKind::Weapon => derive_with(&self.weapon, document, catalog),
            DocumentKind::Loot => derive_with(&self.loot, document, catalog),
        }
    }

    /// A new document of `kind`, built from initial values and derived once.
    pub fn create(&self, kind: DocumentKind, catalog: &ConfigCatalog) -> Result<Value, DomainError> {
        match kind {
            DocumentKind::Actor => create_with(&self.actor, catalog),
            DocumentKind::Weapon => create_with(&self.weapon, catalog),
            DocumentKind::Loot => create_with(&self.loot, catalog),
        }
    }
}

fn derive_with<E>(
    model: &DataModel<E>,
    document: Value,
    catalog: &ConfigCatalog,
) -> Result<Value, DomainError>
where
    E: Clone + Serialize + DeserializeOwned,
{
    let mut entity = model.load(document, catalog)?;
    model.prepare_derived(&mut entity, catalog)?;
    encode(model, &entity)
}

fn create_with<E>(model: &DataModel<E>, catalog: &ConfigCatalog) -> Result<Value, DomainError>
where
    E: Clone + Serialize + DeserializeOwned,
{
    let mut entity = model.create(catalog)?;
    model.prepare_derived(&mut entity, catalog)?;
    encode(model, &entity)
}

fn encode<E: Serialize>(model: &DataModel<E>, entity: &E) -> Result<Value, DomainError> {
    serde_json::to_value(entity).map_err(|e| DomainError::decode(model.name(), e.to_string()))
}
