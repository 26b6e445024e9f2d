//! Fluent biome assembly.
//!
//! A [`BiomeBuilder`] collects settings, vegetation and spawns and turns them
//! into a [`Biome`] on [`BiomeBuilder::build`]. Shared configuration lives in
//! a [`BiomeTemplate`], which freezes its builder and hands out independent
//! copies to derive variants from.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use terraform_blocks::Block;
use terraform_feature::registry::{DOUBLE_PLANT_FEATURE, GRASS_FEATURE};
use terraform_feature::{Decorator, FeatureConfig, FeatureKey};
use terraform_world::ConfiguredSurfaceBuilder;

use crate::biome::{
    Biome, BiomeSettings, Category, ConfiguredFeature, GenerationStep, Precipitation, StructureKey,
};
use crate::error::BuildError;
use crate::spawn::{DEFAULT_SPAWN_ENTRIES, SpawnEntry};

/// Scale applied to a tree's share of the chunk's trees to get the chance of
/// one extra attempt.
pub const TREE_EXTRA_CHANCE_SCALE: f32 = 0.1;

pub const DEFAULT_SPAWN_CHANCE: f32 = 0.1;

/// A reusable bundle of features applied to a biome during `build`.
pub trait DefaultFeature: Send + Sync {
    fn add(&self, biome: &mut Biome);
}

impl<F> DefaultFeature for F
where
    F: Fn(&mut Biome) + Send + Sync,
{
    fn add(&self, biome: &mut Biome) {
        self(biome)
    }
}

#[derive(Clone)]
pub struct BiomeBuilder {
    surface_builder: Option<ConfiguredSurfaceBuilder>,
    precipitation: Option<Precipitation>,
    category: Option<Category>,
    depth: Option<f32>,
    scale: Option<f32>,
    temperature: Option<f32>,
    downfall: Option<f32>,
    water_color: Option<u32>,
    water_fog_color: Option<u32>,
    parent: Option<String>,

    default_features: Vec<Arc<dyn DefaultFeature>>,
    features: Vec<(GenerationStep, ConfiguredFeature)>,
    structure_features: BTreeMap<StructureKey, FeatureConfig>,
    tree_features: BTreeMap<FeatureKey, u32>,
    rare_tree_features: BTreeMap<FeatureKey, u32>,
    plant_features: BTreeMap<Block, u32>,
    double_plant_features: BTreeMap<Block, u32>,
    spawn_entries: Vec<SpawnEntry>,
    grass_color: Option<u32>,
    foliage_color: Option<u32>,
    spawn_chance: f32,
    template: bool,
}

impl Default for BiomeBuilder {
    fn default() -> Self {
        Self {
            surface_builder: None,
            precipitation: None,
            category: None,
            depth: None,
            scale: None,
            temperature: None,
            downfall: None,
            water_color: None,
            water_fog_color: None,
            parent: None,
            default_features: Vec::new(),
            features: Vec::new(),
            structure_features: BTreeMap::new(),
            tree_features: BTreeMap::new(),
            rare_tree_features: BTreeMap::new(),
            plant_features: BTreeMap::new(),
            double_plant_features: BTreeMap::new(),
            spawn_entries: Vec::new(),
            grass_color: None,
            foliage_color: None,
            spawn_chance: DEFAULT_SPAWN_CHANCE,
            template: false,
        }
    }
}

impl fmt::Debug for BiomeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiomeBuilder")
            .field("category", &self.category)
            .field("depth", &self.depth)
            .field("scale", &self.scale)
            .field("trees", &self.tree_features)
            .field("rare_trees", &self.rare_tree_features)
            .field("default_features", &self.default_features.len())
            .field("spawns", &self.spawn_entries.len())
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl BiomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks this builder as a template; `build` refuses frozen builders.
    pub fn frozen(mut self) -> Self {
        self.template = true;
        self
    }

    pub fn is_template(&self) -> bool {
        self.template
    }

    pub fn surface_builder(mut self, surface: ConfiguredSurfaceBuilder) -> Self {
        self.surface_builder = Some(surface);
        self
    }

    pub fn precipitation(mut self, precipitation: Precipitation) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn depth(mut self, depth: f32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn downfall(mut self, downfall: f32) -> Self {
        self.downfall = Some(downfall);
        self
    }

    pub fn water_color(mut self, color: u32) -> Self {
        self.water_color = Some(color);
        self
    }

    pub fn water_fog_color(mut self, color: u32) -> Self {
        self.water_fog_color = Some(color);
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn grass_color(mut self, color: u32) -> Self {
        self.grass_color = Some(color);
        self
    }

    pub fn foliage_color(mut self, color: u32) -> Self {
        self.foliage_color = Some(color);
        self
    }

    pub fn spawn_chance(mut self, chance: f32) -> Self {
        self.spawn_chance = chance;
        self
    }

    /// `count` trees per chunk, sharing the extra-tree chance with the
    /// biome's other trees. Re-adding a feature replaces its count.
    pub fn add_tree_feature(mut self, feature: impl Into<FeatureKey>, count: u32) -> Self {
        self.tree_features.insert(feature.into(), count);
        self
    }

    /// One tree in every `chance` chunks on average.
    pub fn add_rare_tree_feature(mut self, feature: impl Into<FeatureKey>, chance: u32) -> Self {
        self.rare_tree_features.insert(feature.into(), chance);
        self
    }

    pub fn add_grass_feature(mut self, block: Block, count: u32) -> Self {
        self.plant_features.insert(block, count);
        self
    }

    pub fn add_double_grass_feature(mut self, block: Block, count: u32) -> Self {
        self.double_plant_features.insert(block, count);
        self
    }

    pub fn add_custom_feature(mut self, step: GenerationStep, feature: ConfiguredFeature) -> Self {
        self.features.push((step, feature));
        self
    }

    pub fn add_structure_feature(mut self, key: impl Into<StructureKey>, config: FeatureConfig) -> Self {
        self.structure_features.insert(key.into(), config);
        self
    }

    pub fn add_structure_features<K, I>(mut self, keys: I) -> Self
    where
        K: Into<StructureKey>,
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.structure_features.insert(key.into(), FeatureConfig::Default);
        }
        self
    }

    pub fn add_default_feature(mut self, feature: impl DefaultFeature + 'static) -> Self {
        self.default_features.push(Arc::new(feature));
        self
    }

    pub fn add_default_features<I>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn DefaultFeature>>,
    {
        self.default_features.extend(features);
        self
    }

    pub fn add_spawn_entry(mut self, entry: SpawnEntry) -> Self {
        self.spawn_entries.push(entry);
        self
    }

    pub fn add_default_spawn_entries(mut self) -> Self {
        self.spawn_entries.extend(DEFAULT_SPAWN_ENTRIES.iter().cloned());
        self
    }

    fn settings(&self) -> Result<BiomeSettings, BuildError> {
        fn req<T: Clone>(v: &Option<T>, name: &'static str) -> Result<T, BuildError> {
            v.clone().ok_or(BuildError::MissingSetting(name))
        }
        Ok(BiomeSettings {
            surface_builder: req(&self.surface_builder, "surface_builder")?,
            precipitation: req(&self.precipitation, "precipitation")?,
            category: req(&self.category, "category")?,
            depth: req(&self.depth, "depth")?,
            scale: req(&self.scale, "scale")?,
            temperature: req(&self.temperature, "temperature")?,
            downfall: req(&self.downfall, "downfall")?,
            water_color: req(&self.water_color, "water_color")?,
            water_fog_color: req(&self.water_fog_color, "water_fog_color")?,
            parent: self.parent.clone(),
        })
    }

    pub fn build(&self) -> Result<Biome, BuildError> {
        if self.template {
            return Err(BuildError::FrozenTemplate);
        }
        let mut biome = Biome::new(self.settings()?, &self.spawn_entries, self.spawn_chance);
        biome.set_grass_and_foliage_colors(self.grass_color, self.foliage_color);

        for (key, config) in &self.structure_features {
            biome.add_structure_feature(key.clone(), *config);
        }

        let total: u64 = self.tree_features.values().map(|&c| u64::from(c)).sum();
        for (feature, &count) in &self.tree_features {
            let weight = if total == 0 {
                0.0
            } else {
                count as f32 / total as f32
            };
            biome.add_feature(
                GenerationStep::VegetalDecoration,
                ConfiguredFeature::new(
                    feature.clone(),
                    FeatureConfig::Default,
                    Decorator::CountExtraHeightmap {
                        count,
                        extra_chance: TREE_EXTRA_CHANCE_SCALE * weight,
                        extra_count: 1,
                    },
                ),
            );
        }

        for (feature, &chance) in &self.rare_tree_features {
            biome.add_feature(
                GenerationStep::VegetalDecoration,
                ConfiguredFeature::new(
                    feature.clone(),
                    FeatureConfig::Default,
                    Decorator::ChanceHeightmap { chance },
                ),
            );
        }

        for feature in &self.default_features {
            feature.add(&mut biome);
        }

        for (step, feature) in &self.features {
            biome.add_feature(*step, feature.clone());
        }

        for (&block, &count) in &self.plant_features {
            biome.add_feature(
                GenerationStep::VegetalDecoration,
                ConfiguredFeature::new(
                    GRASS_FEATURE,
                    FeatureConfig::Plant { block },
                    Decorator::CountHeightmapDouble { count },
                ),
            );
        }

        for (&block, &count) in &self.double_plant_features {
            biome.add_feature(
                GenerationStep::VegetalDecoration,
                ConfiguredFeature::new(
                    DOUBLE_PLANT_FEATURE,
                    FeatureConfig::Plant { block },
                    Decorator::CountHeightmap32 { count },
                ),
            );
        }

        log::debug!(
            "built {:?} biome with {} features and {} structures",
            biome.settings.category,
            biome.feature_count(),
            self.structure_features.len()
        );
        Ok(biome)
    }
}

/// Frozen builder that variants are derived from.
#[derive(Clone, Debug)]
pub struct BiomeTemplate {
    builder: BiomeBuilder,
}

impl BiomeTemplate {
    pub fn new(builder: BiomeBuilder) -> Self {
        Self {
            builder: builder.frozen(),
        }
    }

    /// Unfrozen copy of the template's builder.
    pub fn builder(&self) -> BiomeBuilder {
        let mut b = self.builder.clone();
        b.template = false;
        b
    }
}
