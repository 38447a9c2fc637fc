//! Reusable item fragments.
//!
//! Each fragment owns one slice of an item's stored data. Most only declare
//! fields; [`PhysicalFragment`] also derives data, and [`TraitsFragment`]
//! exposes the [`ActiveTraits`] query other derivation steps consume.

mod activatable;
mod attacking;
mod damaging;
mod description;
mod equippable;
mod expertise;
mod identity;
mod physical;
mod traits;
mod typed;

pub use activatable::{ActionCost, ActivatableFragment, ActivationData};
pub use attacking::{AttackData, AttackRange, AttackingFragment};
pub use damaging::{DamageData, DamagingFragment};
pub use description::{DescriptionData, DescriptionFragment};
pub use equippable::{EquipData, EquippableFragment};
pub use expertise::ExpertiseFragment;
pub use identity::IdentityFragment;
pub use physical::{PhysicalData, PhysicalFragment, PhysicalItem, Price, Weight};
pub use traits::{ActiveTraits, ItemTrait, TraitsFragment};
pub use typed::TypedFragment;
