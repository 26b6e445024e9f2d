use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use serde::Deserialize;
use terraform_feature::{Decorator, FeatureConfig, FeatureKey};
use terraform_world::ConfiguredSurfaceBuilder;

use crate::color::{default_foliage_color, default_grass_color};
use crate::spawn::{SpawnEntry, SpawnGroup};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precipitation {
    None,
    Rain,
    Snow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    None,
    Taiga,
    ExtremeHills,
    Jungle,
    Mesa,
    Plains,
    Savanna,
    Icy,
    Beach,
    Forest,
    Ocean,
    Desert,
    River,
    Swamp,
    Mushroom,
}

/// Decoration passes, in the order a chunk runs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStep {
    RawGeneration,
    Lakes,
    LocalModifications,
    UndergroundStructures,
    SurfaceStructures,
    UndergroundOres,
    UndergroundDecoration,
    VegetalDecoration,
    TopLayerModification,
}

impl GenerationStep {
    pub const ALL: [GenerationStep; 9] = [
        GenerationStep::RawGeneration,
        GenerationStep::Lakes,
        GenerationStep::LocalModifications,
        GenerationStep::UndergroundStructures,
        GenerationStep::SurfaceStructures,
        GenerationStep::UndergroundOres,
        GenerationStep::UndergroundDecoration,
        GenerationStep::VegetalDecoration,
        GenerationStep::TopLayerModification,
    ];
}

/// A feature key bound to its placement config and decorator.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfiguredFeature {
    pub feature: FeatureKey,
    pub config: FeatureConfig,
    pub decorator: Decorator,
}

impl ConfiguredFeature {
    pub fn new(feature: impl Into<FeatureKey>, config: FeatureConfig, decorator: Decorator) -> Self {
        Self {
            feature: feature.into(),
            config,
            decorator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct StructureKey(pub String);

impl From<&str> for StructureKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Terrain and climate settings every biome carries.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeSettings {
    pub surface_builder: ConfiguredSurfaceBuilder,
    pub precipitation: Precipitation,
    pub category: Category,
    pub depth: f32,
    pub scale: f32,
    pub temperature: f32,
    pub downfall: f32,
    pub water_color: u32,
    pub water_fog_color: u32,
    pub parent: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Biome {
    pub settings: BiomeSettings,
    features: BTreeMap<GenerationStep, Vec<ConfiguredFeature>>,
    structures: BTreeMap<StructureKey, FeatureConfig>,
    spawns: BTreeMap<SpawnGroup, Vec<SpawnEntry>>,
    grass_color: Option<u32>,
    foliage_color: Option<u32>,
    spawn_chance: f32,
}

impl Biome {
    pub(crate) fn new(settings: BiomeSettings, spawns: &[SpawnEntry], spawn_chance: f32) -> Self {
        let mut biome = Self {
            settings,
            features: BTreeMap::new(),
            structures: BTreeMap::new(),
            spawns: BTreeMap::new(),
            grass_color: None,
            foliage_color: None,
            spawn_chance,
        };
        for entry in spawns {
            biome.add_spawn(entry.clone());
        }
        biome
    }

    pub fn add_feature(&mut self, step: GenerationStep, feature: ConfiguredFeature) {
        self.features.entry(step).or_default().push(feature);
    }

    pub fn add_structure_feature(&mut self, key: StructureKey, config: FeatureConfig) {
        self.structures.insert(key, config);
    }

    pub fn add_spawn(&mut self, entry: SpawnEntry) {
        self.spawns.entry(entry.group()).or_default().push(entry);
    }

    pub(crate) fn set_grass_and_foliage_colors(&mut self, grass: Option<u32>, foliage: Option<u32>) {
        self.grass_color = grass;
        self.foliage_color = foliage;
    }

    pub fn features(&self, step: GenerationStep) -> &[ConfiguredFeature] {
        self.features.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty steps in generation order.
    pub fn steps(&self) -> impl Iterator<Item = (GenerationStep, &[ConfiguredFeature])> {
        self.features.iter().map(|(s, f)| (*s, f.as_slice()))
    }

    pub fn feature_count(&self) -> usize {
        self.features.values().map(Vec::len).sum()
    }

    pub fn structures(&self) -> impl Iterator<Item = (&StructureKey, &FeatureConfig)> {
        self.structures.iter()
    }

    pub fn has_structure(&self, key: &StructureKey) -> bool {
        self.structures.contains_key(key)
    }

    pub fn spawns(&self, group: SpawnGroup) -> &[SpawnEntry] {
        self.spawns.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn grass_color(&self) -> u32 {
        self.grass_color
            .unwrap_or_else(|| default_grass_color(self.settings.temperature, self.settings.downfall))
    }

    pub fn foliage_color(&self) -> u32 {
        self.foliage_color
            .unwrap_or_else(|| default_foliage_color(self.settings.temperature, self.settings.downfall))
    }

    pub fn max_spawn_limit(&self) -> f32 {
        self.spawn_chance
    }

    /// Weighted pick from the group's spawn table, with a pack size drawn from
    /// the entry's group range.
    pub fn pick_spawn(&self, group: SpawnGroup, rng: &mut dyn RngCore) -> Option<(&SpawnEntry, u32)> {
        let entries = self.spawns(group);
        let total: u64 = entries.iter().map(|e| u64::from(e.weight)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = rng.gen_range(0..total);
        for entry in entries {
            let weight = u64::from(entry.weight);
            if roll < weight {
                let size = if entry.max_group > entry.min_group {
                    rng.gen_range(entry.min_group..=entry.max_group)
                } else {
                    entry.min_group
                };
                return Some((entry, size));
            }
            roll -= weight;
        }
        None
    }
}
