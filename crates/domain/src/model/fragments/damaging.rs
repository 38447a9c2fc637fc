use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::ConfigCatalog;
use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};
use crate::types::{Attribute, DamageType, Skill};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageData {
    /// Dice formula, e.g. `1d8`
    pub formula: Option<String>,
    #[serde(rename = "type")]
    pub damage_type: Option<DamageType>,
    pub skill: Option<Skill>,
    pub attribute: Option<Attribute>,
}

pub struct DamagingFragment;

impl<E> Fragment<E> for DamagingFragment {
    fn name(&self) -> &'static str {
        "damaging"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::schema(
            "damage",
            vec![
                FieldSpec::string("formula")
                    .non_blank()
                    .nullable()
                    .initial(Value::Null),
                FieldSpec::string("type")
                    .choices(Choices::keys(ConfigCatalog::damage_types))
                    .nullable()
                    .initial(Value::Null),
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
