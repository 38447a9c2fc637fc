use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};
use crate::types::{EquipHand, EquipType, HoldType};

/// How an item is equipped.
///
/// The fragment has no derivation of its own; entity types set `hold` and
/// `hand` from other fragments' data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipData {
    #[serde(rename = "type")]
    pub equip_type: EquipType,
    pub hold: HoldType,
    /// Only meaningful while `hold` is one-handed
    pub hand: Option<EquipHand>,
}

pub struct EquippableFragment {
    equip_type: EquipType,
}

impl EquippableFragment {
    pub fn new(equip_type: EquipType) -> Self {
        Self { equip_type }
    }
}

impl<E> Fragment<E> for EquippableFragment {
    fn name(&self) -> &'static str {
        "equippable"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::schema(
            "equip",
            vec![
                FieldSpec::string("type")
                    .choices(Choices::of::<EquipType>())
                    .initial(self.equip_type.as_str()),
                FieldSpec::string("hold")
                    .choices(Choices::of::<HoldType>())
                    .initial(HoldType::OneHanded.as_str()),
                FieldSpec::string("hand")
                    .choices(Choices::of::<EquipHand>())
                    .nullable()
                    .initial(Value::Null),
            ],
        )]
    }
}
