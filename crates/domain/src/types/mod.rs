//! # Cosmere Vocabulary Types
//!
//! Closed enumerations for every symbolic id the game configuration is keyed
//! by. Each id serializes as its short wire form (`"phy"`, `"str"`,
//! `"two_handed"`) so stored documents and catalog files stay compact.

use std::fmt;

/// Shared behaviour of the closed id enumerations.
///
/// Lets catalog validation and schema choices work over any id table
/// without stringly-typed lookups.
pub trait ConfigId: Copy + Ord + fmt::Display + 'static {
    /// Name of the id kind, used in error messages
    const KIND: &'static str;

    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Short wire id (e.g. `"str"`)
    fn as_str(&self) -> &'static str;
}

macro_rules! define_config_id {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $id:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $id)] $variant, )+
        }

        impl $name {
            /// Returns the short wire id.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $id, )+
                }
            }
        }

        impl $crate::types::ConfigId for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$( Self::$variant ),+];

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $id => Ok(Self::$variant), )+
                    _ => Err($crate::error::ParseIdError {
                        kind: $kind,
                        id: s.to_string(),
                    }),
                }
            }
        }
    };
}

mod cosmere;
pub use cosmere::{
    ActionCostType, ActivationType, Attribute, AttributeGroup, AttackType, DamageType, EquipHand,
    EquipType, HoldType, Resource, Skill, WeaponId, WeaponTraitId, WeaponType,
};
