use serde::{Deserialize, Serialize};

use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};
use crate::types::WeaponTraitId;

/// One entry of an item's ordered trait list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTrait {
    pub id: WeaponTraitId,
    pub active: bool,
}

impl ItemTrait {
    pub fn active(id: WeaponTraitId) -> Self {
        Self { id, active: true }
    }

    pub fn inactive(id: WeaponTraitId) -> Self {
        Self { id, active: false }
    }
}

/// Read access to an ordered trait list.
///
/// Consumed as `&dyn ActiveTraits` by derivation steps that react to traits.
pub trait ActiveTraits {
    fn traits(&self) -> &[ItemTrait];

    /// Traits currently in effect, in stored order.
    fn active_traits(&self) -> Vec<&ItemTrait> {
        self.traits().iter().filter(|t| t.active).collect()
    }

    fn has_active_trait(&self, id: WeaponTraitId) -> bool {
        self.active_traits().iter().any(|t| t.id == id)
    }
}

impl ActiveTraits for Vec<ItemTrait> {
    fn traits(&self) -> &[ItemTrait] {
        self
    }
}

pub struct TraitsFragment {
    choices: Choices,
}

impl TraitsFragment {
    pub fn new(choices: Choices) -> Self {
        Self { choices }
    }
}

impl<E> Fragment<E> for TraitsFragment {
    fn name(&self) -> &'static str {
        "traits"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::array(
            "traits",
            FieldSpec::schema(
                "trait",
                vec![
                    FieldSpec::string("id")
                        .non_blank()
                        .choices(self.choices.clone()),
                    FieldSpec::boolean("active").initial(true),
                ],
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_traits_filters_and_keeps_order() {
        let traits = vec![
            ItemTrait::active(WeaponTraitId::Deadly),
            ItemTrait::inactive(WeaponTraitId::TwoHanded),
            ItemTrait::active(WeaponTraitId::Thrown),
        ];
        let ids: Vec<_> = traits.active_traits().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![WeaponTraitId::Deadly, WeaponTraitId::Thrown]);
    }

    #[test]
    fn has_active_trait_ignores_inactive_entries() {
        let traits = vec![ItemTrait::inactive(WeaponTraitId::TwoHanded)];
        assert!(!traits.has_active_trait(WeaponTraitId::TwoHanded));

        let traits = vec![ItemTrait::active(WeaponTraitId::TwoHanded)];
        assert!(traits.has_active_trait(WeaponTraitId::TwoHanded));
    }

    #[test]
    fn query_works_through_trait_object() {
        let traits = vec![ItemTrait::active(WeaponTraitId::Pierce)];
        let query: &dyn ActiveTraits = &traits;
        assert_eq!(query.active_traits().len(), 1);
    }
}
