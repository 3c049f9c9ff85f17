//! Standard attribute table.
//!
//! Identities are fixed so that stored values and content tables written for
//! other server builds keep pointing at the same channels.

use super::{
    AttributeError, AttributeId, AttributeRegistry, Modifier, ModifierOp, RegenerationRule,
};

macro_rules! standard_attributes {
    ($($(#[$meta:meta])* $ident:ident = $uuid:literal, $name:literal, $description:literal;)*) => {
        $(
            $(#[$meta])*
            pub const $ident: AttributeId = AttributeId::from_uuid(uuid::uuid!($uuid));
        )*

        const STANDARD_TABLE: &[(AttributeId, &str, &str)] = &[
            $(($ident, $name, $description),)*
        ];
    };
}

standard_attributes! {
    BASE_STRENGTH = "123282FE-FEAD-448E-AD2C-BAECE939B4B1", "Base Strength", "The base strength of the character.";
    TOTAL_STRENGTH = "F59709A3-44B0-4147-AAEB-E90CEC251641", "Total Strength", "The base strength plus every strength bonus.";
    BASE_AGILITY = "1AE9C014-E3CD-4703-BD05-1B65F5F94CEB", "Base Agility", "";
    TOTAL_AGILITY = "364F1207-00F8-485B-9F2C-74E04CB78C73", "Total Agility", "";
    BASE_VITALITY = "6CA5C3A6-B109-45A5-87A7-FDCB107B4982", "Base Vitality", "";
    TOTAL_VITALITY = "6A0076E4-69DC-42E7-A92B-C8711392EF82", "Total Vitality", "";
    BASE_ENERGY = "01B0EF28-F7A0-46B5-97BA-2B624A54CD75", "Base Energy", "";
    TOTAL_ENERGY = "12956B45-007C-453A-AE1F-36475B8CEBBF", "Total Energy", "";
    BASE_LEADERSHIP = "6AF2C9DF-3AE4-4721-8462-9A8EC7F56FE4", "Base Leadership", "";
    TOTAL_LEADERSHIP = "35E04272-63F3-4EBB-8FB5-EF2128DDB9F6", "Total Leadership", "";

    /// Character level. Gated modifiers compare against this channel.
    LEVEL = "560931AD-0901-4342-B7F4-FD2E2FCC0563", "Level", "The level of the character.";

    CURRENT_HEALTH = "20686FFD-7A96-4BE2-9889-2A4DD9FF5A25", "Current Health", "";
    MAXIMUM_HEALTH = "A6C39A5C-295F-415E-A314-5E9F9A748D27", "Maximum Health", "";
    CURRENT_MANA = "B3299EE6-3815-4E48-B620-95DB78F8A142", "Current Mana", "";
    MAXIMUM_MANA = "17CB8826-0677-4C93-A0C9-C0E3D2DA7D73", "Maximum Mana", "";
    CURRENT_SHIELD = "0E255161-8A3D-4367-BFF0-EFCD238C16FD", "Current Shield", "";
    MAXIMUM_SHIELD = "BC745471-6EC6-48BC-8C7A-C8AACA3A92D9", "Maximum Shield", "";
    CURRENT_ABILITY = "39EB6747-0689-4BBF-B832-8936E00C5DF6", "Current Ability", "";
    MAXIMUM_ABILITY = "466BBBBA-C1D8-45DC-8832-2EAA1130ACFD", "Maximum Ability", "";

    MINIMUM_PHYS_BASE_DMG = "3E8D6A02-E973-4AE4-9DF3-CDDC3D3183B3", "Minimum Physical Base Damage", "";
    MAXIMUM_PHYS_BASE_DMG = "8A918EA2-893A-48B2-A684-3E71526CA71F", "Maximum Physical Base Damage", "";
    MINIMUM_WIZ_BASE_DMG = "65583A02-AB94-4A17-9B79-86ECC82DC835", "Minimum Wizardry Base Damage", "";
    MAXIMUM_WIZ_BASE_DMG = "44B8236A-BF5B-4082-BA8B-5DEDA1458D33", "Maximum Wizardry Base Damage", "";
    /// Scales the damage of every skill the actor casts.
    SKILL_MULTIPLIER = "D9FB3323-6DF5-48F7-8253-FDBB5EF82114", "Skill Multiplier", "";
    ATTACK_DAMAGE_INCREASE = "0765CCD2-C70A-4338-BF49-0D652364C223", "Attack Damage Increase", "";
    DEFENSE_BASE = "EB098C46-60D4-4CA6-BBD4-5B6270A1407B", "Defense Base", "";
    DAMAGE_RECEIVE_DECREMENT = "9D9761EF-EF47-4E5C-8106-EBC555786F20", "Damage Receive Decrement", "";

    ICE_RESISTANCE = "47235C36-41BB-44B4-8823-6FC415709F59", "Ice Resistance", "";
    FIRE_RESISTANCE = "9AE4D80D-5706-48B9-AD11-EAC4FE088A81", "Fire Resistance", "";
    POISON_RESISTANCE = "3D50D0B7-63A2-4DA9-8855-12173EAE6B39", "Poison Resistance", "";
    LIGHTNING_RESISTANCE = "3E339393-2D17-452E-81D9-3987947A407F", "Lightning Resistance", "";

    MANA_RECOVERY = "E4EC7913-5004-48FC-ACB1-E1764237A251", "Mana Recovery", "Fraction of maximum mana restored per regeneration tick.";
    HEALTH_RECOVERY = "0A427A13-3708-4125-BA83-A2DF7C0753B8", "Health Recovery", "Fraction of maximum health restored per regeneration tick.";
    ABILITY_RECOVERY = "A3E274F5-FA74-4E6A-97EA-D0930AAF0374", "Ability Recovery", "Fraction of maximum ability restored per regeneration tick.";
    SHIELD_RECOVERY = "6B99AA99-C1A3-413B-8C70-602567EB5163", "Shield Recovery", "Fraction of maximum shield restored per regeneration tick.";

    MANA_AFTER_MONSTER_KILL = "3DE9DEE5-C717-456B-8E94-6C224553674F", "Mana After Monster Kill", "Fraction of maximum mana restored after killing a monster.";
    HEALTH_AFTER_MONSTER_KILL = "0498AA9E-A4BB-4DE5-B112-58D921101899", "Health After Monster Kill", "Fraction of maximum health restored after killing a monster.";
    SHIELD_AFTER_MONSTER_KILL = "783F0178-C23C-4F20-BE10-B73D3D31D4F6", "Shield After Monster Kill", "Fraction of maximum shield restored after killing a monster.";
    ABILITY_AFTER_MONSTER_KILL = "47433CD1-C7D5-4BF5-AC52-E0F33BF90504", "Ability After Monster Kill", "Fraction of maximum ability restored after killing a monster.";
}

const INTERVAL_REGENERATION: [RegenerationRule; 4] = [
    RegenerationRule::new(MANA_RECOVERY, CURRENT_MANA, MAXIMUM_MANA),
    RegenerationRule::new(HEALTH_RECOVERY, CURRENT_HEALTH, MAXIMUM_HEALTH),
    RegenerationRule::new(ABILITY_RECOVERY, CURRENT_ABILITY, MAXIMUM_ABILITY),
    RegenerationRule::new(SHIELD_RECOVERY, CURRENT_SHIELD, MAXIMUM_SHIELD),
];

const AFTER_KILL_REGENERATION: [RegenerationRule; 4] = [
    RegenerationRule::new(MANA_AFTER_MONSTER_KILL, CURRENT_MANA, MAXIMUM_MANA),
    RegenerationRule::new(HEALTH_AFTER_MONSTER_KILL, CURRENT_HEALTH, MAXIMUM_HEALTH),
    RegenerationRule::new(SHIELD_AFTER_MONSTER_KILL, CURRENT_SHIELD, MAXIMUM_SHIELD),
    RegenerationRule::new(ABILITY_AFTER_MONSTER_KILL, CURRENT_ABILITY, MAXIMUM_ABILITY),
];

/// Builds a registry holding the whole standard table.
///
/// # Errors
///
/// `DuplicateDefinition` if the table reuses an identity.
pub fn standard_registry() -> Result<AttributeRegistry, AttributeError> {
    let mut registry = AttributeRegistry::new();
    for &(id, name, description) in STANDARD_TABLE {
        registry.register(id, name, description)?;
    }
    Ok(registry)
}

/// Rules applied by the periodic regeneration tick: mana, health, ability,
/// shield.
pub fn interval_regeneration_rules() -> &'static [RegenerationRule] {
    &INTERVAL_REGENERATION
}

/// Rules applied to an attacker after it kills a monster.
pub fn after_kill_regeneration_rules() -> &'static [RegenerationRule] {
    &AFTER_KILL_REGENERATION
}

/// `total = base` for the five primary stats, so bonuses can target the total
/// without touching what the player distributed.
pub fn primary_stat_totals() -> Vec<Modifier> {
    [
        (TOTAL_STRENGTH, BASE_STRENGTH),
        (TOTAL_AGILITY, BASE_AGILITY),
        (TOTAL_VITALITY, BASE_VITALITY),
        (TOTAL_ENERGY, BASE_ENERGY),
        (TOTAL_LEADERSHIP, BASE_LEADERSHIP),
    ]
    .into_iter()
    .map(|(total, base)| Modifier::derived(total, ModifierOp::Additive, base, 1.0))
    .collect()
}
