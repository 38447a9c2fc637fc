//! Actor data models.
//!
//! [`CommonActorData`] is the shared actor shape. Its derived fields are
//! produced by [`derive_actor_stats`] on every derivation pass; [`sheet`]
//! holds the read-side projections used to lay out a character sheet.

mod data;
mod derived;
pub mod sheet;

pub use data::{
    common_actor_model, AttributeValue, CommonActorData, CommonActorFragment, Defense,
    Encumbrance, Movement, ResourceValue, Senses, SkillValue,
};
pub use derived::{
    derive_actor_stats, PiecewiseTable, CARRYING_CAPACITIES, LIFTING_CAPACITIES, MOVEMENT_RATES,
    SENSES_RANGES,
};
