use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};

/// Catalog identity of an item (`id`).
pub struct IdentityFragment {
    initial: &'static str,
    choices: Choices,
}

impl IdentityFragment {
    pub fn new(initial: &'static str, choices: Choices) -> Self {
        Self { initial, choices }
    }
}

impl<E> Fragment<E> for IdentityFragment {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::string("id")
            .non_blank()
            .choices(self.choices.clone())
            .initial(self.initial)]
    }
}
