use serde::{Deserialize, Serialize};

use crate::catalog::ConfigCatalog;
use crate::error::DerivationIntegrityError;
use crate::model::Fragment;
use crate::schema::FieldSpec;

/// Quantity, weight and price of a physical item.
///
/// Every field has a serde default so entity types that only partially carry
/// physical data still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalData {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub price: Price,
}

impl Default for PhysicalData {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            weight: Weight::default(),
            price: Price::default(),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub unit: String,
    /// Derived: `value * quantity`
    #[serde(default)]
    pub total: f64,
}

impl Default for Weight {
    fn default() -> Self {
        Self {
            value: 0.0,
            unit: "lb".to_string(),
            total: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub value: u32,
    pub unit: String,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            value: 0,
            unit: "mk".to_string(),
        }
    }
}

/// Accessor for entities composed with [`PhysicalFragment`].
pub trait PhysicalItem {
    fn physical_mut(&mut self) -> &mut PhysicalData;
}

/// Contributes `quantity`, `weight` and `price`, and derives `weight.total`.
pub struct PhysicalFragment {
    partial: bool,
}

impl PhysicalFragment {
    /// All physical fields are required.
    pub fn new() -> Self {
        Self { partial: false }
    }

    /// Physical fields may be omitted from stored documents.
    pub fn partial() -> Self {
        Self { partial: true }
    }

    fn field(&self, field: FieldSpec) -> FieldSpec {
        if self.partial {
            field.optional()
        } else {
            field
        }
    }
}

impl Default for PhysicalFragment {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PhysicalItem> Fragment<E> for PhysicalFragment {
    fn name(&self) -> &'static str {
        "physical"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            self.field(FieldSpec::uint32("quantity").initial(1)),
            self.field(FieldSpec::schema(
                "weight",
                vec![
                    FieldSpec::number("value").min(0),
                    FieldSpec::string("unit").initial("lb"),
                    FieldSpec::number("total").min(0).optional(),
                ],
            )),
            self.field(FieldSpec::schema(
                "price",
                vec![
                    FieldSpec::uint32("value"),
                    FieldSpec::string("unit").initial("mk"),
                ],
            )),
        ]
    }

    fn prepare_derived(
        &self,
        entity: &mut E,
        _catalog: &ConfigCatalog,
    ) -> Result<(), DerivationIntegrityError> {
        let physical = entity.physical_mut();
        physical.weight.total = physical.weight.value * f64::from(physical.quantity);
        Ok(())
    }
}
