//! Loot: plain physical goods with a description and no mechanics.

use serde::{Deserialize, Serialize};

use crate::error::SchemaCompositionError;
use crate::model::fragments::{
    DescriptionData, DescriptionFragment, PhysicalData, PhysicalFragment, PhysicalItem,
};
use crate::model::{DataModel, DataModelBuilder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootItemData {
    pub description: DescriptionData,
    #[serde(flatten)]
    pub physical: PhysicalData,
}

impl PhysicalItem for LootItemData {
    fn physical_mut(&mut self) -> &mut PhysicalData {
        &mut self.physical
    }
}

pub fn loot_model() -> Result<DataModel<LootItemData>, SchemaCompositionError> {
    DataModelBuilder::new("loot")
        .fragment(DescriptionFragment)
        .fragment(PhysicalFragment::new())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConfigCatalog;
    use crate::error::{DomainError, ValidationFailure};
    use serde_json::json;

    #[test]
    fn loot_requires_every_physical_field() {
        let catalog = ConfigCatalog::cosmere();
        let model = loot_model().unwrap();

        let err = model
            .load(
                json!({ "description": { "value": "", "chat": "", "short": "" } }),
                &catalog,
            )
            .unwrap_err();
        match err {
            DomainError::Validation(err) => assert_eq!(err.field, "quantity"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn quantity_beyond_u32_fails_at_the_field() {
        let catalog = ConfigCatalog::cosmere();
        let model = loot_model().unwrap();

        let err = model
            .load(
                json!({
                    "description": { "value": "", "chat": "", "short": "" },
                    "quantity": 5_000_000_000u64,
                    "weight": { "value": 1, "unit": "lb" },
                    "price": { "value": 0, "unit": "mk" }
                }),
                &catalog,
            )
            .unwrap_err();
        match err {
            DomainError::Validation(err) => {
                assert_eq!(err.field, "quantity");
                assert_eq!(
                    err.reason,
                    ValidationFailure::AboveMaximum {
                        max: f64::from(u32::MAX)
                    }
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn loot_total_weight_is_derived() {
        let catalog = ConfigCatalog::cosmere();
        let model = loot_model().unwrap();
        let mut gems = model
            .load(
                json!({
                    "description": { "value": "Infused spheres", "chat": "", "short": "" },
                    "quantity": 20,
                    "weight": { "value": 0.25, "unit": "lb" },
                    "price": { "value": 5, "unit": "mk" }
                }),
                &catalog,
            )
            .unwrap();

        model.prepare_derived(&mut gems, &catalog).unwrap();
        assert_eq!(gems.physical.weight.total, 5.0);
        assert_eq!(gems.physical.price.value, 5);
    }
}
