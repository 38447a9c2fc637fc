use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::ConfigCatalog;
use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};
use crate::types::{ActionCostType, ActivationType, Attribute, Skill};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationData {
    #[serde(rename = "type")]
    pub activation_type: ActivationType,
    pub cost: ActionCost,
    /// Skill tested on activation, if any
    pub skill: Option<Skill>,
    /// Overrides the skill's governing attribute
    pub attribute: Option<Attribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCost {
    #[serde(rename = "type")]
    pub cost_type: Option<ActionCostType>,
    pub value: Option<u32>,
}

/// How an item is used: activation type, action cost and tested skill.
pub struct ActivatableFragment;

impl<E> Fragment<E> for ActivatableFragment {
    fn name(&self) -> &'static str {
        "activatable"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::schema(
            "activation",
            vec![
                FieldSpec::string("type")
                    .choices(Choices::of::<ActivationType>())
                    .initial(ActivationType::None.as_str()),
                FieldSpec::schema(
                    "cost",
                    vec![
                        FieldSpec::string("type")
                            .choices(Choices::of::<ActionCostType>())
                            .nullable()
                            .initial(Value::Null),
                        FieldSpec::uint32("value")
                            .nullable()
                            .initial(Value::Null),
                    ],
                ),
                FieldSpec::string("skill")
                    .choices(Choices::keys(ConfigCatalog::skills))
                    .nullable()
                    .initial(Value::Null),
                FieldSpec::string("attribute")
                    .choices(Choices::keys(ConfigCatalog::attributes))
                    .nullable()
                    .initial(Value::Null),
            ],
        )]
    }
}
