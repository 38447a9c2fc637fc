use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};
use crate::types::AttackType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackData {
    #[serde(rename = "type")]
    pub attack_type: AttackType,
    pub range: AttackRange,
}

/// Attack reach; melee attacks usually leave `value` unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRange {
    pub value: Option<u32>,
    pub unit: String,
    /// Long range, for ranged attacks with a penalty band
    pub long: Option<u32>,
}

pub struct AttackingFragment;

impl<E> Fragment<E> for AttackingFragment {
    fn name(&self) -> &'static str {
        "attacking"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::schema(
            "attack",
            vec![
                FieldSpec::string("type")
                    .choices(Choices::of::<AttackType>())
                    .initial(AttackType::Melee.as_str()),
                FieldSpec::schema(
                    "range",
                    vec![
                        FieldSpec::uint32("value")
                            .nullable()
                            .initial(Value::Null),
                        FieldSpec::string("unit").initial("ft"),
                        FieldSpec::uint32("long")
                            .nullable()
                            .initial(Value::Null),
                    ],
                ),
            ],
        )]
    }
}
