use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ConfigCatalog;
use crate::error::{DerivationIntegrityError, SchemaCompositionError};
use crate::model::{DataModel, DataModelBuilder, Fragment};
use crate::schema::{Choices, FieldSpec};
use crate::types::{Attribute, AttributeGroup, ConfigId, Resource, Skill};

use super::derived::derive_actor_stats;

/// Stored and derived state shared by every actor type.
///
/// Map keys mirror the catalog tables the actor schema was composed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonActorData {
    pub senses: Senses,
    pub attributes: BTreeMap<Attribute, AttributeValue>,
    pub defenses: BTreeMap<AttributeGroup, Defense>,
    pub resources: BTreeMap<Resource, ResourceValue>,
    pub skills: BTreeMap<Skill, SkillValue>,
    pub movement: Movement,
    pub encumbrance: Encumbrance,
}

impl CommonActorData {
    /// Stored value of one attribute.
    pub fn attribute(&self, id: Attribute) -> Result<i32, DerivationIntegrityError> {
        self.attributes
            .get(&id)
            .map(|attribute| attribute.value)
            .ok_or(DerivationIntegrityError::MissingAttribute(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Senses {
    /// Derived. `None` when the lookup falls past the end of the range table.
    pub range: Option<u32>,
    /// Derived
    pub obscured_affected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defense {
    /// Derived
    pub value: i32,
    pub bonus: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceValue {
    pub value: i32,
    /// Derived for health and focus, externally set otherwise
    pub max: i32,
    pub bonus: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deflect: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillValue {
    pub attribute: Attribute,
    pub rank: i32,
    /// Derived: governing attribute value plus rank
    #[serde(rename = "mod")]
    pub modifier: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub rate: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encumbrance {
    pub lift: Option<u32>,
    pub carry: Option<u32>,
}

/// Contributes the common actor fields and runs the stat derivation.
///
/// The keyed sections (attributes, defenses, resources, skills) get one
/// entry per id of the catalog the fragment is created with.
pub struct CommonActorFragment {
    catalog: ConfigCatalog,
}

impl CommonActorFragment {
    pub fn new(catalog: &ConfigCatalog) -> Self {
        Self {
            catalog: catalog.clone(),
        }
    }
}

fn keyed<K: ConfigId, V>(
    name: &'static str,
    table: &BTreeMap<K, V>,
    slice: impl Fn(&K, &V) -> Vec<FieldSpec>,
) -> FieldSpec {
    FieldSpec::schema(
        name,
        table
            .iter()
            .map(|(id, config)| FieldSpec::schema(id.as_str(), slice(id, config)))
            .collect(),
    )
}

impl Fragment<CommonActorData> for CommonActorFragment {
    fn name(&self) -> &'static str {
        "common"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let catalog = &self.catalog;

        vec![
            FieldSpec::schema(
                "senses",
                vec![
                    FieldSpec::uint32("range").nullable().initial(5),
                    FieldSpec::boolean("obscuredAffected"),
                ],
            ),
            keyed("attributes", catalog.attributes(), |_, _| {
                vec![FieldSpec::integer("value").min(0).max(5)]
            }),
            keyed("defenses", catalog.attribute_groups(), |_, _| {
                vec![FieldSpec::int32("value"), FieldSpec::int32("bonus")]
            }),
            keyed("resources", catalog.resources(), |_, config| {
                let mut fields = vec![
                    FieldSpec::int32("value").min(0),
                    FieldSpec::int32("max"),
                    FieldSpec::int32("bonus"),
                ];
                if config.deflect {
                    fields.push(FieldSpec::int32("deflect").min(0));
                }
                fields
            }),
            keyed("skills", catalog.skills(), |_, config| {
                vec![
                    FieldSpec::string("attribute")
                        .non_blank()
                        .choices(Choices::keys(ConfigCatalog::attributes))
                        .initial(config.attribute.as_str()),
                    FieldSpec::integer("rank").min(0).max(5),
                    FieldSpec::int32("mod"),
                ]
            }),
            FieldSpec::schema(
                "movement",
                vec![FieldSpec::uint32("rate").nullable()],
            ),
            FieldSpec::schema(
                "encumbrance",
                vec![
                    FieldSpec::uint32("lift").nullable(),
                    FieldSpec::uint32("carry").nullable(),
                ],
            ),
        ]
    }

    fn prepare_derived(
        &self,
        entity: &mut CommonActorData,
        catalog: &ConfigCatalog,
    ) -> Result<(), DerivationIntegrityError> {
        *entity = derive_actor_stats(entity, catalog)?;
        Ok(())
    }
}

/// Compose the common actor model against `catalog`'s id tables.
pub fn common_actor_model(
    catalog: &ConfigCatalog,
) -> Result<DataModel<CommonActorData>, SchemaCompositionError> {
    DataModelBuilder::new("actor")
        .fragment(CommonActorFragment::new(catalog))
        .build()
}
