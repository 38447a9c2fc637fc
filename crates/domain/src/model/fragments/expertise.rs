use crate::model::Fragment;
use crate::schema::FieldSpec;

/// Whether the owner has expertise with the item.
pub struct ExpertiseFragment;

impl<E> Fragment<E> for ExpertiseFragment {
    fn name(&self) -> &'static str {
        "expertise"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::boolean("expertise")]
    }
}
