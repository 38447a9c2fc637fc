//! Derived actor statistics.
//!
//! Every derived field is a pure function of the stored fields and the
//! catalog. Stats that scale with an attribute use a [`PiecewiseTable`]
//! indexed by half the attribute value, rounded up.

use crate::catalog::ConfigCatalog;
use crate::error::DerivationIntegrityError;
use crate::types::{Attribute, Resource};

use super::data::CommonActorData;

/// Ascending lookup table keyed by `ceil(value / 2)`.
///
/// The index is capped at the table length, not at the last entry, so values
/// high enough to reach the cap fall one past the end and yield no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecewiseTable(&'static [u32]);

impl PiecewiseTable {
    pub const fn new(entries: &'static [u32]) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &'static [u32] {
        self.0
    }

    /// `min(ceil(value / 2), len)`
    pub fn index_for(&self, value: i32) -> i64 {
        let half = (i64::from(value) + 1).div_euclid(2);
        half.min(self.0.len() as i64)
    }

    pub fn lookup(&self, value: i32) -> Option<u32> {
        usize::try_from(self.index_for(value))
            .ok()
            .and_then(|index| self.0.get(index))
            .copied()
    }
}

/// Senses range in feet by awareness; the last band is unlimited.
pub const SENSES_RANGES: PiecewiseTable = PiecewiseTable::new(&[5, 10, 20, 50, 100, u32::MAX]);

/// Movement rate in feet by speed.
pub const MOVEMENT_RATES: PiecewiseTable = PiecewiseTable::new(&[20, 25, 30, 40, 60, 80]);

/// Lifting capacity in pounds by strength.
pub const LIFTING_CAPACITIES: PiecewiseTable =
    PiecewiseTable::new(&[100, 200, 500, 1000, 5000, 10000]);

/// Carrying capacity in pounds by strength.
pub const CARRYING_CAPACITIES: PiecewiseTable =
    PiecewiseTable::new(&[50, 100, 250, 500, 2500, 5000]);

const OBSCURED_AWARENESS_THRESHOLD: i32 = 9;
const HEALTH_BASE: i32 = 10;
const FOCUS_BASE: i32 = 2;
const DEFENSE_BASE: i32 = 10;

/// Compute every derived field of `stored`.
///
/// Returns a new actor state; `stored` is never modified, so a failure
/// (an attribute referenced by a formula missing from stored state, or a sum
/// leaving the `i32` range) leaves no partial output behind.
pub fn derive_actor_stats(
    stored: &CommonActorData,
    catalog: &ConfigCatalog,
) -> Result<CommonActorData, DerivationIntegrityError> {
    let mut derived = stored.clone();

    let awareness = stored.attribute(Attribute::Awareness)?;
    derived.senses.range = SENSES_RANGES.lookup(awareness);
    derived.senses.obscured_affected = awareness < OBSCURED_AWARENESS_THRESHOLD;

    for (group, defense) in derived.defenses.iter_mut() {
        let config = catalog
            .attribute_group(*group)
            .ok_or(DerivationIntegrityError::MissingAttributeGroup(*group))?;
        let mut terms = vec![DEFENSE_BASE, defense.bonus];
        for attribute in &config.attributes {
            terms.push(stored.attribute(*attribute)?);
        }
        defense.value = checked_sum(&terms, || format!("defenses.{group}.value"))?;
    }

    for (id, resource) in derived.resources.iter_mut() {
        match id {
            Resource::Health => {
                let strength = stored.attribute(Attribute::Strength)?;
                resource.max = checked_sum(&[HEALTH_BASE, strength, resource.bonus], || {
                    format!("resources.{id}.max")
                })?;
            }
            Resource::Focus => {
                let willpower = stored.attribute(Attribute::Willpower)?;
                resource.max = checked_sum(&[FOCUS_BASE, willpower, resource.bonus], || {
                    format!("resources.{id}.max")
                })?;
            }
            Resource::Investiture => {}
        }
        resource.value = resource.value.min(resource.max).max(0);
    }

    for (id, skill) in derived.skills.iter_mut() {
        let attribute = catalog
            .skill(*id)
            .map(|config| config.attribute)
            .ok_or(DerivationIntegrityError::MissingSkill(*id))?;
        skill.modifier = checked_sum(&[stored.attribute(attribute)?, skill.rank], || {
            format!("skills.{id}.mod")
        })?;
    }

    derived.movement.rate = MOVEMENT_RATES.lookup(stored.attribute(Attribute::Speed)?);

    let strength = stored.attribute(Attribute::Strength)?;
    derived.encumbrance.lift = LIFTING_CAPACITIES.lookup(strength);
    derived.encumbrance.carry = CARRYING_CAPACITIES.lookup(strength);

    tracing::trace!(
        defenses = derived.defenses.len(),
        skills = derived.skills.len(),
        "Derived actor stats"
    );
    Ok(derived)
}

fn checked_sum(
    terms: &[i32],
    field: impl FnOnce() -> String,
) -> Result<i32, DerivationIntegrityError> {
    terms
        .iter()
        .try_fold(0i32, |sum, term| sum.checked_add(*term))
        .ok_or_else(|| DerivationIntegrityError::Overflow { field: field() })
}
