use crate::model::Fragment;
use crate::schema::{Choices, FieldSpec};

/// Item sub-type (`type`), e.g. light or heavy for weapons.
pub struct TypedFragment {
    initial: &'static str,
    choices: Choices,
}

impl TypedFragment {
    pub fn new(initial: &'static str, choices: Choices) -> Self {
        Self { initial, choices }
    }
}

impl<E> Fragment<E> for TypedFragment {
    fn name(&self) -> &'static str {
        "typed"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::string("type")
            .non_blank()
            .choices(self.choices.clone())
            .initial(self.initial)]
    }
}
