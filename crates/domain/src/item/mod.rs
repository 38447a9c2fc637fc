//! Item data models.
//!
//! Each item type is a composition of the fragments in
//! [`crate::model::fragments`] plus any item-specific derivation.

mod loot;
mod weapon;

pub use loot::{loot_model, LootItemData};
pub use weapon::{resolve_hold, weapon_model, WeaponItemData};
