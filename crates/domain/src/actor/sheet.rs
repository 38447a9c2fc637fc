//! Read-side projections for laying out an actor sheet.
//!
//! Pure grouping and sorting over an already-derived actor plus the catalog.
//! Stat entries are `None` when the actor has no stored entry for the id.

use serde::Serialize;

use crate::catalog::{AttributeConfig, AttributeGroupConfig, ConfigCatalog, ResourceConfig, SkillConfig};
use crate::types::{Attribute, AttributeGroup, Resource, Skill};

use super::data::{AttributeValue, CommonActorData, Defense, ResourceValue, SkillValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeGroupSheet<'a> {
    pub id: AttributeGroup,
    pub config: &'a AttributeGroupConfig,
    pub defense: Option<&'a Defense>,
    pub attributes: Vec<AttributeEntry<'a>>,
    pub skills: Vec<SkillEntry<'a>>,
    pub resource: Option<ResourceEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeEntry<'a> {
    pub id: Attribute,
    pub config: &'a AttributeConfig,
    pub stats: Option<&'a AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillEntry<'a> {
    pub id: Skill,
    pub config: &'a SkillConfig,
    pub stats: Option<&'a SkillValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceEntry<'a> {
    pub id: Resource,
    pub config: &'a ResourceConfig,
    pub stats: Option<&'a ResourceValue>,
}

/// One section per attribute group, in catalog order.
pub fn attribute_groups<'a>(
    actor: &'a CommonActorData,
    catalog: &'a ConfigCatalog,
) -> Vec<AttributeGroupSheet<'a>> {
    catalog
        .attribute_groups()
        .iter()
        .map(|(id, config)| AttributeGroupSheet {
            id: *id,
            config,
            defense: actor.defenses.get(id),
            attributes: attributes_for_group(actor, catalog, *id),
            skills: skills_for_group(actor, catalog, *id),
            resource: resource_for_group(actor, catalog, *id),
        })
        .collect()
}

/// Attributes of a group, in the group's declared order.
pub fn attributes_for_group<'a>(
    actor: &'a CommonActorData,
    catalog: &'a ConfigCatalog,
    group: AttributeGroup,
) -> Vec<AttributeEntry<'a>> {
    let Some(group) = catalog.attribute_group(group) else {
        return Vec::new();
    };

    group
        .attributes
        .iter()
        .filter_map(|id| {
            catalog.attribute(*id).map(|config| AttributeEntry {
                id: *id,
                config,
                stats: actor.attributes.get(id),
            })
        })
        .collect()
}

/// Skills governed by a group's attributes, sorted by id.
pub fn skills_for_group<'a>(
    actor: &'a CommonActorData,
    catalog: &'a ConfigCatalog,
    group: AttributeGroup,
) -> Vec<SkillEntry<'a>> {
    let Some(group) = catalog.attribute_group(group) else {
        return Vec::new();
    };

    let mut skills: Vec<Skill> = group
        .attributes
        .iter()
        .filter_map(|id| catalog.attribute(*id))
        .flat_map(|attribute| attribute.skills.iter().copied())
        .collect();
    skills.sort_by_key(|skill| skill.as_str());

    skills
        .into_iter()
        .filter_map(|id| {
            catalog.skill(id).map(|config| SkillEntry {
                id,
                config,
                stats: actor.skills.get(&id),
            })
        })
        .collect()
}

pub fn resource_for_group<'a>(
    actor: &'a CommonActorData,
    catalog: &'a ConfigCatalog,
    group: AttributeGroup,
) -> Option<ResourceEntry<'a>> {
    let id = catalog.attribute_group(group)?.resource;
    catalog.resource(id).map(|config| ResourceEntry {
        id,
        config,
        stats: actor.resources.get(&id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{common_actor_model, derive_actor_stats};

    fn derived_actor(catalog: &ConfigCatalog) -> CommonActorData {
        let mut actor = common_actor_model(catalog)
            .unwrap()
            .create(catalog)
            .unwrap();
        actor.attributes.get_mut(&Attribute::Speed).unwrap().value = 3;
        derive_actor_stats(&actor, catalog).unwrap()
    }

    #[test]
    fn groups_follow_catalog_order() {
        let catalog = ConfigCatalog::cosmere();
        let actor = derived_actor(&catalog);
        let groups = attribute_groups(&actor, &catalog);

        let ids: Vec<_> = groups.iter().map(|group| group.id).collect();
        assert_eq!(
            ids,
            vec![
                AttributeGroup::Physical,
                AttributeGroup::Cognitive,
                AttributeGroup::Spiritual
            ]
        );
        assert_eq!(groups[0].defense.map(|defense| defense.value), Some(13));
    }

    #[test]
    fn attributes_keep_group_order() {
        let catalog = ConfigCatalog::cosmere();
        let actor = derived_actor(&catalog);
        let attributes = attributes_for_group(&actor, &catalog, AttributeGroup::Physical);

        let ids: Vec<_> = attributes.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![Attribute::Strength, Attribute::Speed]);
        assert_eq!(attributes[1].stats.map(|stats| stats.value), Some(3));
    }

    #[test]
    fn skills_are_sorted_alphabetically_by_id() {
        let catalog = ConfigCatalog::cosmere();
        let actor = derived_actor(&catalog);
        let skills = skills_for_group(&actor, &catalog, AttributeGroup::Physical);

        let ids: Vec<_> = skills.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["agi", "ath", "hwp", "lwp", "stl", "thv"]);
        let agility = skills.iter().find(|entry| entry.id == Skill::Agility).unwrap();
        assert_eq!(agility.stats.map(|stats| stats.modifier), Some(3));
    }

    #[test]
    fn resource_is_the_groups_resource() {
        let catalog = ConfigCatalog::cosmere();
        let actor = derived_actor(&catalog);

        let resource = resource_for_group(&actor, &catalog, AttributeGroup::Cognitive).unwrap();
        assert_eq!(resource.id, Resource::Focus);
        assert_eq!(resource.stats.map(|stats| stats.max), Some(2));
    }
}
