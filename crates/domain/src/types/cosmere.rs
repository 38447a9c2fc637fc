//! Cosmere RPG ids.

define_config_id! {
    /// Attribute groups; each governs one defense and one resource.
    AttributeGroup as "attribute group" {
        Physical => "phy",
        Cognitive => "cog",
        Spiritual => "spi",
    }
}

define_config_id! {
    /// The six core attributes, stored as values in `0..=5`.
    Attribute as "attribute" {
        Strength => "str",
        Speed => "spd",
        Intellect => "int",
        Willpower => "wil",
        Awareness => "awa",
        Presence => "pre",
    }
}

define_config_id! {
    Resource as "resource" {
        Health => "hea",
        Focus => "foc",
        Investiture => "inv",
    }
}

define_config_id! {
    Skill as "skill" {
        Agility => "agi",
        Athletics => "ath",
        HeavyWeapons => "hwp",
        LightWeapons => "lwp",
        Stealth => "stl",
        Thievery => "thv",

        Crafting => "cra",
        Deduction => "ded",
        Discipline => "dis",
        Intimidation => "inm",
        Lore => "lor",
        Medicine => "med",

        Deception => "dec",
        Insight => "ins",
        Leadership => "lea",
        Perception => "prc",
        Persuasion => "prs",
        Survival => "sur",
    }
}

define_config_id! {
    WeaponType as "weapon type" {
        Light => "light",
        Heavy => "heavy",
        Special => "special",
    }
}

define_config_id! {
    /// Catalogued weapons. `None` marks a custom weapon with no catalog entry.
    WeaponId as "weapon" {
        None => "none",
        Javelin => "javelin",
        Knife => "knife",
        Mace => "mace",
        Rapier => "rapier",
        Shortspear => "shortspear",
        Sidesword => "sidesword",
        Staff => "staff",
        Shortbow => "shortbow",
        Sling => "sling",
        Axe => "axe",
        Greatsword => "greatsword",
        Hammer => "hammer",
        Longspear => "longspear",
        Longsword => "longsword",
        Poleaxe => "poleaxe",
        Shield => "shield",
        Crossbow => "crossbow",
        Longbow => "longbow",
        Warhammer => "warhammer",
    }
}

define_config_id! {
    WeaponTraitId as "weapon trait" {
        Cumbersome => "cumbersome",
        Dangerous => "dangerous",
        Deadly => "deadly",
        Defensive => "defensive",
        Discreet => "discreet",
        Indirect => "indirect",
        Loaded => "loaded",
        Momentum => "momentum",
        Offhand => "offhand",
        Pierce => "pierce",
        Quickdraw => "quickdraw",
        Thrown => "thrown",
        TwoHanded => "two_handed",
        Unique => "unique",
        Fragile => "fragile",
    }
}

define_config_id! {
    HoldType as "hold type" {
        OneHanded => "one_handed",
        TwoHanded => "two_handed",
    }
}

define_config_id! {
    EquipHand as "equip hand" {
        Main => "main",
        Off => "off",
    }
}

define_config_id! {
    EquipType as "equip type" {
        Hold => "hold",
        Wear => "wear",
    }
}

define_config_id! {
    ActivationType as "activation type" {
        None => "none",
        Utility => "utility",
        SkillTest => "skill_test",
    }
}

define_config_id! {
    ActionCostType as "action cost type" {
        Action => "action",
        Reaction => "reaction",
        FreeAction => "free_action",
        Special => "special",
    }
}

define_config_id! {
    AttackType as "attack type" {
        Melee => "melee",
        Ranged => "ranged",
    }
}

define_config_id! {
    DamageType as "damage type" {
        Energy => "energy",
        Impact => "impact",
        Keen => "keen",
        Spirit => "spirit",
        Vital => "vital",
        Healing => "heal",
    }
}
