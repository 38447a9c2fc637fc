use serde::{Deserialize, Serialize};

use crate::model::Fragment;
use crate::schema::FieldSpec;

/// Rich text shown on the item sheet and in chat cards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptionData {
    pub value: String,
    pub chat: String,
    pub short: String,
}

pub struct DescriptionFragment;

impl<E> Fragment<E> for DescriptionFragment {
    fn name(&self) -> &'static str {
        "description"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::schema(
            "description",
            vec![
                FieldSpec::string("value"),
                FieldSpec::string("chat"),
                FieldSpec::string("short"),
            ],
        )]
    }
}
