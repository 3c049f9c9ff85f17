//! Built-in demo content: one map, a class, a few skills and monsters.

use anyhow::Result;
use tracing::info;

use realm_core::attributes::stats;
use realm_core::{
    ActorKind, ClassTemplate, EntityId, MapId, Modifier, ModifierOp, Position, Skill,
    SkillCatalog, SkillId, SkillKind, SkillList,
};
use realm_runtime::Realm;

pub const LORENCIA: MapId = MapId(0);

pub const FLAME: SkillId = SkillId(5);
pub const EVIL_SPIRIT: SkillId = SkillId(9);
pub const TWISTING_SLASH: SkillId = SkillId(41);
pub const ARMOR_MASTERY: SkillId = SkillId(300);

pub const DEMO_WIZARD: EntityId = EntityId(1);

pub fn skill_catalog() -> SkillCatalog {
    SkillCatalog::new()
        .with(
            Skill::new(FLAME, "Flame", SkillKind::AreaSkillAutomaticHits)
                .with_cost(stats::CURRENT_MANA, 50.0)
                .with_range(6)
                .with_damage_multiplier(1.2)
                .with_requirement(stats::TOTAL_ENERGY, 35.0),
        )
        .with(
            Skill::new(EVIL_SPIRIT, "Evil Spirit", SkillKind::AreaSkillExplicitHits)
                .with_cost(stats::CURRENT_MANA, 90.0)
                .with_range(6),
        )
        .with(
            Skill::new(TWISTING_SLASH, "Twisting Slash", SkillKind::AreaSkillAutomaticHits)
                .with_cost(stats::CURRENT_ABILITY, 10.0)
                .with_range(2)
                .with_requirement(stats::LEVEL, 30.0),
        )
        .with(Skill::new(ARMOR_MASTERY, "Armor Mastery", SkillKind::PassiveBoost))
}

/// Starting wizard: pools derive from vitality and energy, damage from
/// energy.
pub fn wizard_template() -> ClassTemplate {
    ClassTemplate::new("Dark Wizard")
        .with_base(stats::LEVEL, 1.0)
        .with_base(stats::BASE_STRENGTH, 18.0)
        .with_base(stats::BASE_AGILITY, 18.0)
        .with_base(stats::BASE_VITALITY, 15.0)
        .with_base(stats::BASE_ENERGY, 30.0)
        .with_base(stats::MAXIMUM_HEALTH, 30.0)
        .with_base(stats::CURRENT_HEALTH, 60.0)
        .with_base(stats::MAXIMUM_MANA, 0.0)
        .with_base(stats::CURRENT_MANA, 60.0)
        .with_base(stats::MANA_RECOVERY, 0.037)
        .with_base(stats::HEALTH_RECOVERY, 0.01)
        .with_base(stats::MANA_AFTER_MONSTER_KILL, 0.0125)
        .with_relationships(stats::primary_stat_totals())
        .with_relationship(Modifier::derived(
            stats::MAXIMUM_HEALTH,
            ModifierOp::Additive,
            stats::TOTAL_VITALITY,
            2.0,
        ))
        .with_relationship(Modifier::derived(
            stats::MAXIMUM_MANA,
            ModifierOp::Additive,
            stats::TOTAL_ENERGY,
            2.0,
        ))
        .with_relationship(Modifier::derived(
            stats::MINIMUM_PHYS_BASE_DMG,
            ModifierOp::Additive,
            stats::TOTAL_ENERGY,
            1.0 / 9.0,
        ))
        .with_relationship(Modifier::derived(
            stats::MAXIMUM_PHYS_BASE_DMG,
            ModifierOp::Additive,
            stats::TOTAL_ENERGY,
            1.0 / 4.0,
        ))
}

pub fn monster_template(name: &str, health: f64, defense: f64) -> ClassTemplate {
    ClassTemplate::new(name)
        .with_base(stats::CURRENT_HEALTH, health)
        .with_base(stats::MAXIMUM_HEALTH, health)
        .with_base(stats::DEFENSE_BASE, defense)
}

/// Loads the demo map with a wizard and a handful of monsters around it.
pub fn populate(realm: &Realm) -> Result<()> {
    realm.add_map(LORENCIA);

    let wizard = realm
        .create_actor(DEMO_WIZARD, ActorKind::Player, "Merlin", &wizard_template())?
        .at(LORENCIA, Position::new(130, 130))
        .with_skills([FLAME, EVIL_SPIRIT].into_iter().collect::<SkillList>());
    realm.spawn(wizard)?;

    let monsters = [
        (100, "Spider", 30.0, 1.0, Position::new(132, 131)),
        (101, "Budge Dragon", 60.0, 3.0, Position::new(128, 133)),
        (102, "Bull Fighter", 100.0, 6.0, Position::new(135, 127)),
        (103, "Hound", 140.0, 9.0, Position::new(150, 150)),
    ];
    for (id, name, health, defense, position) in monsters {
        let monster = realm
            .create_actor(
                EntityId(id),
                ActorKind::Monster,
                name,
                &monster_template(name, health, defense),
            )?
            .at(LORENCIA, position);
        realm.spawn(monster)?;
    }

    info!(
        target: "realm::server",
        map = %LORENCIA,
        actors = realm.world().actor_count(),
        "demo content loaded"
    );
    Ok(())
}
