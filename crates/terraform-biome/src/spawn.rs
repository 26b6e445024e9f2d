//! Mob spawn tables.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;

/// Spawn category an entity is counted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnGroup {
    Monster,
    Creature,
    Ambient,
    WaterCreature,
    Misc,
}

impl SpawnGroup {
    pub const ALL: [SpawnGroup; 5] = [
        SpawnGroup::Monster,
        SpawnGroup::Creature,
        SpawnGroup::Ambient,
        SpawnGroup::WaterCreature,
        SpawnGroup::Misc,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityType {
    pub name: Cow<'static, str>,
    pub group: SpawnGroup,
}

impl EntityType {
    pub const SHEEP: EntityType = EntityType::new("sheep", SpawnGroup::Creature);
    pub const PIG: EntityType = EntityType::new("pig", SpawnGroup::Creature);
    pub const CHICKEN: EntityType = EntityType::new("chicken", SpawnGroup::Creature);
    pub const COW: EntityType = EntityType::new("cow", SpawnGroup::Creature);
    pub const WOLF: EntityType = EntityType::new("wolf", SpawnGroup::Creature);
    pub const RABBIT: EntityType = EntityType::new("rabbit", SpawnGroup::Creature);
    pub const BAT: EntityType = EntityType::new("bat", SpawnGroup::Ambient);
    pub const SQUID: EntityType = EntityType::new("squid", SpawnGroup::WaterCreature);
    pub const SPIDER: EntityType = EntityType::new("spider", SpawnGroup::Monster);
    pub const ZOMBIE: EntityType = EntityType::new("zombie", SpawnGroup::Monster);
    pub const ZOMBIE_VILLAGER: EntityType = EntityType::new("zombie_villager", SpawnGroup::Monster);
    pub const SKELETON: EntityType = EntityType::new("skeleton", SpawnGroup::Monster);
    pub const CREEPER: EntityType = EntityType::new("creeper", SpawnGroup::Monster);
    pub const SLIME: EntityType = EntityType::new("slime", SpawnGroup::Monster);
    pub const ENDERMAN: EntityType = EntityType::new("enderman", SpawnGroup::Monster);
    pub const WITCH: EntityType = EntityType::new("witch", SpawnGroup::Monster);

    pub const KNOWN: [EntityType; 16] = [
        EntityType::SHEEP,
        EntityType::PIG,
        EntityType::CHICKEN,
        EntityType::COW,
        EntityType::WOLF,
        EntityType::RABBIT,
        EntityType::BAT,
        EntityType::SQUID,
        EntityType::SPIDER,
        EntityType::ZOMBIE,
        EntityType::ZOMBIE_VILLAGER,
        EntityType::SKELETON,
        EntityType::CREEPER,
        EntityType::SLIME,
        EntityType::ENDERMAN,
        EntityType::WITCH,
    ];

    pub const fn new(name: &'static str, group: SpawnGroup) -> Self {
        Self {
            name: Cow::Borrowed(name),
            group,
        }
    }

    pub fn custom(name: impl Into<String>, group: SpawnGroup) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            group,
        }
    }

    pub fn by_name(name: &str) -> Option<EntityType> {
        Self::KNOWN.iter().find(|e| e.name == name).cloned()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Weighted spawn candidate; packs of `min_group..=max_group` are spawned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpawnEntry {
    pub entity: EntityType,
    pub weight: u32,
    pub min_group: u32,
    pub max_group: u32,
}

impl SpawnEntry {
    pub const fn new(entity: EntityType, weight: u32, min_group: u32, max_group: u32) -> Self {
        Self {
            entity,
            weight,
            min_group,
            max_group,
        }
    }

    #[inline]
    pub fn group(&self) -> SpawnGroup {
        self.entity.group
    }
}

/// Passive animals, bats and the usual overworld monsters.
pub const DEFAULT_SPAWN_ENTRIES: [SpawnEntry; 13] = [
    SpawnEntry::new(EntityType::SHEEP, 12, 4, 4),
    SpawnEntry::new(EntityType::PIG, 10, 4, 4),
    SpawnEntry::new(EntityType::CHICKEN, 10, 4, 4),
    SpawnEntry::new(EntityType::COW, 8, 4, 4),
    SpawnEntry::new(EntityType::BAT, 10, 8, 8),
    SpawnEntry::new(EntityType::SPIDER, 100, 4, 4),
    SpawnEntry::new(EntityType::ZOMBIE, 95, 4, 4),
    SpawnEntry::new(EntityType::ZOMBIE_VILLAGER, 5, 1, 1),
    SpawnEntry::new(EntityType::SKELETON, 100, 4, 4),
    SpawnEntry::new(EntityType::CREEPER, 100, 4, 4),
    SpawnEntry::new(EntityType::SLIME, 100, 4, 4),
    SpawnEntry::new(EntityType::ENDERMAN, 10, 1, 4),
    SpawnEntry::new(EntityType::WITCH, 5, 1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_groups() {
        let monsters = DEFAULT_SPAWN_ENTRIES
            .iter()
            .filter(|e| e.group() == SpawnGroup::Monster)
            .count();
        assert_eq!(monsters, 8);
        assert_eq!(DEFAULT_SPAWN_ENTRIES[4].entity, EntityType::BAT);
        assert_eq!(DEFAULT_SPAWN_ENTRIES[4].group(), SpawnGroup::Ambient);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(EntityType::by_name("witch"), Some(EntityType::WITCH));
        assert_eq!(EntityType::by_name("ghast"), None);
        assert_eq!(EntityType::custom("ghast", SpawnGroup::Monster).to_string(), "ghast");
    }
}
