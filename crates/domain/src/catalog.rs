//! Configuration catalog - the read-only game configuration.
//!
//! Maps every closed id (attribute groups, attributes, resources, skills,
//! weapons, ...) to its static descriptor. A catalog is validated once when it
//! is loaded and then only read; it is passed explicitly into composition,
//! validation and derivation instead of living in process-wide state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::{
    Attribute, AttributeGroup, ConfigId, DamageType, Resource, Skill, WeaponId, WeaponTraitId,
    WeaponType,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeGroupConfig {
    pub label: String,
    /// Attributes summed into this group's defense
    pub attributes: Vec<Attribute>,
    /// Resource governed by this group
    pub resource: Resource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeConfig {
    pub label: String,
    pub label_short: String,
    /// Skills governed by this attribute
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    pub label: String,
    /// Whether actors track a deflect value for this resource
    #[serde(default)]
    pub deflect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillConfig {
    pub label: String,
    pub attribute: Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponTypeConfig {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponConfig {
    pub label: String,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    pub skill: Skill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponTraitConfig {
    pub label: String,
    /// Whether the trait carries a numeric value (e.g. Thrown range)
    #[serde(default)]
    pub has_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageTypeConfig {
    pub label: String,
    #[serde(default)]
    pub ignore_deflect: bool,
}

/// Raw catalog tables as supplied by the host, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTables {
    pub attribute_groups: BTreeMap<AttributeGroup, AttributeGroupConfig>,
    pub attributes: BTreeMap<Attribute, AttributeConfig>,
    pub resources: BTreeMap<Resource, ResourceConfig>,
    pub skills: BTreeMap<Skill, SkillConfig>,
    pub weapon_types: BTreeMap<WeaponType, WeaponTypeConfig>,
    #[serde(default)]
    pub weapons: BTreeMap<WeaponId, WeaponConfig>,
    pub weapon_traits: BTreeMap<WeaponTraitId, WeaponTraitConfig>,
    pub damage_types: BTreeMap<DamageType, DamageTypeConfig>,
}

/// Validated, immutable configuration catalog.
///
/// Only obtainable through [`ConfigCatalog::try_from`], [`ConfigCatalog::from_json`]
/// or [`ConfigCatalog::cosmere`], so every table is known to be complete and
/// cross-consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCatalog {
    tables: CatalogTables,
}

impl ConfigCatalog {
    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tables: CatalogTables =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::try_from(tables)
    }

    /// Serialize the catalog tables back to JSON.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.tables).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// The standard Cosmere RPG configuration.
    pub fn cosmere() -> Self {
        Self {
            tables: cosmere_tables(),
        }
    }

    pub fn tables(&self) -> &CatalogTables {
        &self.tables
    }

    pub fn attribute_groups(&self) -> &BTreeMap<AttributeGroup, AttributeGroupConfig> {
        &self.tables.attribute_groups
    }

    pub fn attribute_group(&self, id: AttributeGroup) -> Option<&AttributeGroupConfig> {
        self.tables.attribute_groups.get(&id)
    }

    pub fn attributes(&self) -> &BTreeMap<Attribute, AttributeConfig> {
        &self.tables.attributes
    }

    pub fn attribute(&self, id: Attribute) -> Option<&AttributeConfig> {
        self.tables.attributes.get(&id)
    }

    pub fn resources(&self) -> &BTreeMap<Resource, ResourceConfig> {
        &self.tables.resources
    }

    pub fn resource(&self, id: Resource) -> Option<&ResourceConfig> {
        self.tables.resources.get(&id)
    }

    pub fn skills(&self) -> &BTreeMap<Skill, SkillConfig> {
        &self.tables.skills
    }

    pub fn skill(&self, id: Skill) -> Option<&SkillConfig> {
        self.tables.skills.get(&id)
    }

    pub fn weapon_types(&self) -> &BTreeMap<WeaponType, WeaponTypeConfig> {
        &self.tables.weapon_types
    }

    pub fn weapons(&self) -> &BTreeMap<WeaponId, WeaponConfig> {
        &self.tables.weapons
    }

    pub fn weapon(&self, id: WeaponId) -> Option<&WeaponConfig> {
        self.tables.weapons.get(&id)
    }

    pub fn weapon_traits(&self) -> &BTreeMap<WeaponTraitId, WeaponTraitConfig> {
        &self.tables.weapon_traits
    }

    pub fn damage_types(&self) -> &BTreeMap<DamageType, DamageTypeConfig> {
        &self.tables.damage_types
    }
}

impl TryFrom<CatalogTables> for ConfigCatalog {
    type Error = CatalogError;

    fn try_from(tables: CatalogTables) -> Result<Self, Self::Error> {
        ensure_complete("attributeGroups", &tables.attribute_groups, &[])?;
        ensure_complete("attributes", &tables.attributes, &[])?;
        ensure_complete("resources", &tables.resources, &[])?;
        ensure_complete("skills", &tables.skills, &[])?;
        ensure_complete("weaponTypes", &tables.weapon_types, &[])?;
        ensure_complete("weapons", &tables.weapons, &[WeaponId::None])?;
        ensure_complete("weaponTraits", &tables.weapon_traits, &[])?;
        ensure_complete("damageTypes", &tables.damage_types, &[])?;

        for attribute in Attribute::ALL {
            let count = tables
                .attribute_groups
                .values()
                .filter(|group| group.attributes.contains(attribute))
                .count();
            if count != 1 {
                return Err(CatalogError::AttributeGrouping {
                    attribute: *attribute,
                    count,
                });
            }
        }

        for (attribute, config) in &tables.attributes {
            for skill in &config.skills {
                if let Some(skill_config) = tables.skills.get(skill) {
                    if skill_config.attribute != *attribute {
                        return Err(CatalogError::InconsistentSkill {
                            skill: *skill,
                            listed: *attribute,
                            governing: skill_config.attribute,
                        });
                    }
                }
            }
        }

        for (skill, config) in &tables.skills {
            let listed = tables
                .attributes
                .get(&config.attribute)
                .is_some_and(|attribute| attribute.skills.contains(skill));
            if !listed {
                return Err(CatalogError::UnlistedSkill {
                    skill: *skill,
                    attribute: config.attribute,
                });
            }
        }

        Ok(Self { tables })
    }
}

/// Every id of `K` (other than `skip`) must have an entry in `table`.
fn ensure_complete<K: ConfigId, V>(
    name: &'static str,
    table: &BTreeMap<K, V>,
    skip: &[K],
) -> Result<(), CatalogError> {
    match K::ALL
        .iter()
        .filter(|id| !skip.contains(id))
        .find(|id| !table.contains_key(id))
    {
        Some(missing) => Err(CatalogError::MissingEntry {
            table: name,
            id: missing.as_str(),
        }),
        None => Ok(()),
    }
}

fn label(text: &str) -> String {
    text.to_string()
}

fn cosmere_tables() -> CatalogTables {
    use Attribute as A;
    use Skill as S;

    let attribute_groups = BTreeMap::from([
        (
            AttributeGroup::Physical,
            AttributeGroupConfig {
                label: label("Physical"),
                attributes: vec![A::Strength, A::Speed],
                resource: Resource::Health,
            },
        ),
        (
            AttributeGroup::Cognitive,
            AttributeGroupConfig {
                label: label("Cognitive"),
                attributes: vec![A::Intellect, A::Willpower],
                resource: Resource::Focus,
            },
        ),
        (
            AttributeGroup::Spiritual,
            AttributeGroupConfig {
                label: label("Spiritual"),
                attributes: vec![A::Awareness, A::Presence],
                resource: Resource::Investiture,
            },
        ),
    ]);

    let attribute = |name: &str, short: &str, skills: Vec<Skill>| AttributeConfig {
        label: label(name),
        label_short: label(short),
        skills,
    };
    let attributes = BTreeMap::from([
        (A::Strength, attribute("Strength", "STR", vec![S::Athletics, S::HeavyWeapons])),
        (
            A::Speed,
            attribute(
                "Speed",
                "SPD",
                vec![S::Agility, S::LightWeapons, S::Stealth, S::Thievery],
            ),
        ),
        (
            A::Intellect,
            attribute(
                "Intellect",
                "INT",
                vec![S::Crafting, S::Deduction, S::Lore, S::Medicine],
            ),
        ),
        (A::Willpower, attribute("Willpower", "WIL", vec![S::Discipline, S::Intimidation])),
        (
            A::Awareness,
            attribute("Awareness", "AWA", vec![S::Insight, S::Perception, S::Survival]),
        ),
        (
            A::Presence,
            attribute("Presence", "PRE", vec![S::Deception, S::Leadership, S::Persuasion]),
        ),
    ]);

    let resources = BTreeMap::from([
        (
            Resource::Health,
            ResourceConfig {
                label: label("Health"),
                deflect: true,
            },
        ),
        (
            Resource::Focus,
            ResourceConfig {
                label: label("Focus"),
                deflect: false,
            },
        ),
        (
            Resource::Investiture,
            ResourceConfig {
                label: label("Investiture"),
                deflect: false,
            },
        ),
    ]);

    let skill = |name: &str, attribute: Attribute| SkillConfig {
        label: label(name),
        attribute,
    };
    let skills = BTreeMap::from([
        (S::Agility, skill("Agility", A::Speed)),
        (S::Athletics, skill("Athletics", A::Strength)),
        (S::HeavyWeapons, skill("Heavy Weaponry", A::Strength)),
        (S::LightWeapons, skill("Light Weaponry", A::Speed)),
        (S::Stealth, skill("Stealth", A::Speed)),
        (S::Thievery, skill("Thievery", A::Speed)),
        (S::Crafting, skill("Crafting", A::Intellect)),
        (S::Deduction, skill("Deduction", A::Intellect)),
        (S::Discipline, skill("Discipline", A::Willpower)),
        (S::Intimidation, skill("Intimidation", A::Willpower)),
        (S::Lore, skill("Lore", A::Intellect)),
        (S::Medicine, skill("Medicine", A::Intellect)),
        (S::Deception, skill("Deception", A::Presence)),
        (S::Insight, skill("Insight", A::Awareness)),
        (S::Leadership, skill("Leadership", A::Presence)),
        (S::Perception, skill("Perception", A::Awareness)),
        (S::Persuasion, skill("Persuasion", A::Presence)),
        (S::Survival, skill("Survival", A::Awareness)),
    ]);

    let weapon_types = BTreeMap::from([
        (WeaponType::Light, WeaponTypeConfig { label: label("Light Weaponry") }),
        (WeaponType::Heavy, WeaponTypeConfig { label: label("Heavy Weaponry") }),
        (WeaponType::Special, WeaponTypeConfig { label: label("Special Weapons") }),
    ]);

    let weapon = |name: &str, weapon_type: WeaponType| WeaponConfig {
        label: label(name),
        weapon_type,
        skill: match weapon_type {
            WeaponType::Heavy => S::HeavyWeapons,
            WeaponType::Light | WeaponType::Special => S::LightWeapons,
        },
    };
    let weapons = BTreeMap::from([
        (WeaponId::Javelin, weapon("Javelin", WeaponType::Light)),
        (WeaponId::Knife, weapon("Knife", WeaponType::Light)),
        (WeaponId::Mace, weapon("Mace", WeaponType::Light)),
        (WeaponId::Rapier, weapon("Rapier", WeaponType::Light)),
        (WeaponId::Shortspear, weapon("Shortspear", WeaponType::Light)),
        (WeaponId::Sidesword, weapon("Sidesword", WeaponType::Light)),
        (WeaponId::Staff, weapon("Staff", WeaponType::Light)),
        (WeaponId::Shortbow, weapon("Shortbow", WeaponType::Light)),
        (WeaponId::Sling, weapon("Sling", WeaponType::Light)),
        (WeaponId::Axe, weapon("Axe", WeaponType::Heavy)),
        (WeaponId::Greatsword, weapon("Greatsword", WeaponType::Heavy)),
        (WeaponId::Hammer, weapon("Hammer", WeaponType::Heavy)),
        (WeaponId::Longspear, weapon("Longspear", WeaponType::Heavy)),
        (WeaponId::Longsword, weapon("Longsword", WeaponType::Heavy)),
        (WeaponId::Poleaxe, weapon("Poleaxe", WeaponType::Heavy)),
        (WeaponId::Shield, weapon("Shield", WeaponType::Heavy)),
        (WeaponId::Crossbow, weapon("Crossbow", WeaponType::Heavy)),
        (WeaponId::Longbow, weapon("Longbow", WeaponType::Heavy)),
        (WeaponId::Warhammer, weapon("Warhammer", WeaponType::Special)),
    ]);

    let weapon_trait = |name: &str, has_value: bool| WeaponTraitConfig {
        label: label(name),
        has_value,
    };
    let weapon_traits = BTreeMap::from([
        (WeaponTraitId::Cumbersome, weapon_trait("Cumbersome", true)),
        (WeaponTraitId::Dangerous, weapon_trait("Dangerous", false)),
        (WeaponTraitId::Deadly, weapon_trait("Deadly", false)),
        (WeaponTraitId::Defensive, weapon_trait("Defensive", false)),
        (WeaponTraitId::Discreet, weapon_trait("Discreet", false)),
        (WeaponTraitId::Indirect, weapon_trait("Indirect", false)),
        (WeaponTraitId::Loaded, weapon_trait("Loaded", true)),
        (WeaponTraitId::Momentum, weapon_trait("Momentum", false)),
        (WeaponTraitId::Offhand, weapon_trait("Offhand", false)),
        (WeaponTraitId::Pierce, weapon_trait("Pierce", false)),
        (WeaponTraitId::Quickdraw, weapon_trait("Quickdraw", false)),
        (WeaponTraitId::Thrown, weapon_trait("Thrown", true)),
        (WeaponTraitId::TwoHanded, weapon_trait("Two-Handed", false)),
        (WeaponTraitId::Unique, weapon_trait("Unique", false)),
        (WeaponTraitId::Fragile, weapon_trait("Fragile", false)),
    ]);

    let damage_type = |name: &str, ignore_deflect: bool| DamageTypeConfig {
        label: label(name),
        ignore_deflect,
    };
    let damage_types = BTreeMap::from([
        (DamageType::Energy, damage_type("Energy", false)),
        (DamageType::Impact, damage_type("Impact", false)),
        (DamageType::Keen, damage_type("Keen", false)),
        (DamageType::Spirit, damage_type("Spirit", true)),
        (DamageType::Vital, damage_type("Vital", true)),
        (DamageType::Healing, damage_type("Healing", true)),
    ]);

    CatalogTables {
        attribute_groups,
        attributes,
        resources,
        skills,
        weapon_types,
        weapons,
        weapon_traits,
        damage_types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_passes_validation() {
        let tables = ConfigCatalog::cosmere().tables().clone();
        assert!(ConfigCatalog::try_from(tables).is_ok());
    }

    #[test]
    fn json_round_trip_preserves_catalog() {
        let catalog = ConfigCatalog::cosmere();
        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"attributeGroups\""));
        assert!(json.contains("\"phy\""));

        let parsed = ConfigCatalog::from_json(&json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn missing_entry_is_rejected() {
        let mut tables = ConfigCatalog::cosmere().tables().clone();
        tables.skills.remove(&Skill::Lore);

        let err = ConfigCatalog::try_from(tables).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingEntry {
                table: "skills",
                id: "lor"
            }
        );
    }

    #[test]
    fn custom_weapon_id_needs_no_entry() {
        let catalog = ConfigCatalog::cosmere();
        assert!(catalog.weapon(WeaponId::None).is_none());
        assert!(catalog.weapon(WeaponId::Longsword).is_some());
    }

    #[test]
    fn skill_listed_under_wrong_attribute_is_rejected() {
        let mut tables = ConfigCatalog::cosmere().tables().clone();
        if let Some(strength) = tables.attributes.get_mut(&Attribute::Strength) {
            strength.skills.push(Skill::Stealth);
        }

        let err = ConfigCatalog::try_from(tables).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InconsistentSkill {
                skill: Skill::Stealth,
                listed: Attribute::Strength,
                governing: Attribute::Speed,
            }
        );
    }

    #[test]
    fn unlisted_skill_is_rejected() {
        let mut tables = ConfigCatalog::cosmere().tables().clone();
        if let Some(awareness) = tables.attributes.get_mut(&Attribute::Awareness) {
            awareness.skills.retain(|skill| *skill != Skill::Survival);
        }

        let err = ConfigCatalog::try_from(tables).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnlistedSkill {
                skill: Skill::Survival,
                attribute: Attribute::Awareness,
            }
        );
    }

    #[test]
    fn attribute_in_two_groups_is_rejected() {
        let mut tables = ConfigCatalog::cosmere().tables().clone();
        if let Some(spiritual) = tables.attribute_groups.get_mut(&AttributeGroup::Spiritual) {
            spiritual.attributes.push(Attribute::Strength);
        }

        let err = ConfigCatalog::try_from(tables).unwrap_err();
        assert_eq!(
            err,
            CatalogError::AttributeGrouping {
                attribute: Attribute::Strength,
                count: 2,
            }
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ConfigCatalog::from_json("{ \"attributes\": 3 }").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
