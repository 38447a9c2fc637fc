//! Weapon items.
//!
//! Hold type is derived from traits: an active Two-Handed trait forces a
//! two-handed hold, anything else is one-handed in the main hand unless a
//! hand was already chosen.

use serde::{Deserialize, Serialize};

use crate::catalog::ConfigCatalog;
use crate::error::SchemaCompositionError;
use crate::model::fragments::{
    ActivatableFragment, ActivationData, ActiveTraits, AttackData, AttackingFragment, DamageData,
    DamagingFragment, DescriptionData, DescriptionFragment, EquipData, EquippableFragment,
    ExpertiseFragment, IdentityFragment, ItemTrait, PhysicalData, PhysicalFragment, PhysicalItem,
    TraitsFragment, TypedFragment,
};
use crate::model::{DataModel, DataModelBuilder};
use crate::schema::Choices;
use crate::types::{EquipHand, EquipType, HoldType, WeaponId, WeaponTraitId, WeaponType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponItemData {
    pub id: WeaponId,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    pub description: DescriptionData,
    pub equip: EquipData,
    pub activation: ActivationData,
    pub attack: AttackData,
    pub damage: DamageData,
    pub expertise: bool,
    pub traits: Vec<ItemTrait>,
    #[serde(flatten)]
    pub physical: PhysicalData,
}

impl ActiveTraits for WeaponItemData {
    fn traits(&self) -> &[ItemTrait] {
        &self.traits
    }
}

impl PhysicalItem for WeaponItemData {
    fn physical_mut(&mut self) -> &mut PhysicalData {
        &mut self.physical
    }
}

/// Compose the weapon data model.
pub fn weapon_model() -> Result<DataModel<WeaponItemData>, SchemaCompositionError> {
    DataModelBuilder::new("weapon")
        .fragment(IdentityFragment::new(
            WeaponId::None.as_str(),
            Choices::lazy(|catalog: &ConfigCatalog| {
                std::iter::once(WeaponId::None.as_str())
                    .chain(catalog.weapons().keys().map(WeaponId::as_str))
                    .map(str::to_string)
                    .collect()
            }),
        ))
        .fragment(TypedFragment::new(
            WeaponType::Light.as_str(),
            Choices::keys(ConfigCatalog::weapon_types),
        ))
        .fragment(DescriptionFragment)
        .fragment(EquippableFragment::new(EquipType::Hold))
        .fragment(ActivatableFragment)
        .fragment(AttackingFragment)
        .fragment(DamagingFragment)
        .fragment(ExpertiseFragment)
        .fragment(TraitsFragment::new(Choices::keys(
            ConfigCatalog::weapon_traits,
        )))
        .fragment(PhysicalFragment::partial())
        .derive("hold", |weapon: &mut WeaponItemData, _| {
            resolve_hold(&weapon.traits, &mut weapon.equip);
            Ok(())
        })
        .build()
}

/// Set hold type (and default hand) from the active traits.
///
/// A hand that is already set is never overwritten. Under a two-handed hold
/// the stored hand is left as is but carries no meaning.
pub fn resolve_hold(traits: &dyn ActiveTraits, equip: &mut EquipData) {
    if traits.has_active_trait(WeaponTraitId::TwoHanded) {
        equip.hold = HoldType::TwoHanded;
    } else {
        equip.hold = HoldType::OneHanded;
        equip.hand.get_or_insert(EquipHand::Main);
    }
}
