//! TOML biome packs.
//!
//! ```toml
//! [templates.forest]
//! surface = { top = "grass_block", under = "dirt", underwater = "gravel" }
//! precipitation = "rain"
//! category = "forest"
//! trees = { oak = 8, fallen_oak = 1 }
//!
//! [biomes.oak_forest]
//! template = "forest"
//! grass_color = "#79c05a"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use terraform_blocks::{Block, BlockRegistry};
use terraform_feature::{Decorator, FeatureConfig, FeatureKey};
use terraform_world::{ConfiguredSurfaceBuilder, SurfaceBuilder, SurfaceConfig};

use crate::biome::{Biome, Category, ConfiguredFeature, GenerationStep, Precipitation};
use crate::builder::{BiomeBuilder, BiomeTemplate};
use crate::error::ConfigError;
use crate::spawn::{EntityType, SpawnEntry, SpawnGroup};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BiomePackConfig {
    #[serde(default)]
    pub templates: BTreeMap<String, BiomeDef>,
    #[serde(default)]
    pub biomes: BTreeMap<String, BiomeDef>,
}

/// Everything a biome or template table may set. Absent keys leave the
/// builder (or the template's value) untouched.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct BiomeDef {
    pub template: Option<String>,
    pub surface: Option<SurfaceDef>,
    pub precipitation: Option<Precipitation>,
    pub category: Option<Category>,
    pub depth: Option<f32>,
    pub scale: Option<f32>,
    pub temperature: Option<f32>,
    pub downfall: Option<f32>,
    pub water_color: Option<ColorDef>,
    pub water_fog_color: Option<ColorDef>,
    pub parent: Option<String>,
    pub grass_color: Option<ColorDef>,
    pub foliage_color: Option<ColorDef>,
    pub spawn_chance: Option<f32>,
    #[serde(default)]
    pub default_spawns: bool,
    #[serde(default)]
    pub spawns: Vec<SpawnDef>,
    #[serde(default)]
    pub trees: BTreeMap<String, u32>,
    #[serde(default)]
    pub rare_trees: BTreeMap<String, u32>,
    #[serde(default)]
    pub grass: BTreeMap<String, u32>,
    #[serde(default)]
    pub double_grass: BTreeMap<String, u32>,
    #[serde(default)]
    pub structures: Vec<String>,
    #[serde(default)]
    pub features: Vec<CustomFeatureDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SurfaceDef {
    #[serde(default)]
    pub builder: SurfaceBuilder,
    pub top: String,
    pub under: String,
    pub underwater: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Rgb(u32),
    Hex(String),
}

impl ColorDef {
    pub fn to_rgb(&self) -> Result<u32, ConfigError> {
        match self {
            ColorDef::Rgb(c) if *c <= 0xFF_FFFF => Ok(*c),
            ColorDef::Rgb(c) => Err(ConfigError::BadColor(c.to_string())),
            ColorDef::Hex(s) => s
                .strip_prefix('#')
                .filter(|h| h.len() == 6)
                .and_then(|h| u32::from_str_radix(h, 16).ok())
                .ok_or_else(|| ConfigError::BadColor(s.clone())),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SpawnDef {
    pub entity: String,
    // Needed only for entities outside the built-in table
    pub group: Option<SpawnGroup>,
    pub weight: u32,
    pub min_group: u32,
    pub max_group: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CustomFeatureDef {
    pub step: GenerationStep,
    pub feature: String,
    /// Plant block for grass-like features.
    pub block: Option<String>,
    pub decorator: Decorator,
}

fn block(blocks: &BlockRegistry, owner: &str, name: &str) -> Result<Block, ConfigError> {
    blocks
        .make_block_by_name(name, None)
        .ok_or_else(|| ConfigError::UnknownBlock {
            owner: owner.to_string(),
            block: name.to_string(),
        })
}

impl BiomeDef {
    /// Applies this table on top of `b`.
    pub fn apply(
        &self,
        owner: &str,
        mut b: BiomeBuilder,
        blocks: &BlockRegistry,
    ) -> Result<BiomeBuilder, ConfigError> {
        if let Some(s) = &self.surface {
            let config = SurfaceConfig {
                top: block(blocks, owner, &s.top)?,
                under: block(blocks, owner, &s.under)?,
                underwater: block(blocks, owner, &s.underwater)?,
            };
            b = b.surface_builder(ConfiguredSurfaceBuilder::new(s.builder, config));
        }
        if let Some(v) = self.precipitation {
            b = b.precipitation(v);
        }
        if let Some(v) = self.category {
            b = b.category(v);
        }
        if let Some(v) = self.depth {
            b = b.depth(v);
        }
        if let Some(v) = self.scale {
            b = b.scale(v);
        }
        if let Some(v) = self.temperature {
            b = b.temperature(v);
        }
        if let Some(v) = self.downfall {
            b = b.downfall(v);
        }
        if let Some(c) = &self.water_color {
            b = b.water_color(c.to_rgb()?);
        }
        if let Some(c) = &self.water_fog_color {
            b = b.water_fog_color(c.to_rgb()?);
        }
        if let Some(p) = &self.parent {
            b = b.parent(p.clone());
        }
        if let Some(c) = &self.grass_color {
            b = b.grass_color(c.to_rgb()?);
        }
        if let Some(c) = &self.foliage_color {
            b = b.foliage_color(c.to_rgb()?);
        }
        if let Some(v) = self.spawn_chance {
            b = b.spawn_chance(v);
        }
        if self.default_spawns {
            b = b.add_default_spawn_entries();
        }
        for s in &self.spawns {
            let entity = match (EntityType::by_name(&s.entity), s.group) {
                (Some(known), None) => known,
                (_, Some(group)) => EntityType::custom(s.entity.clone(), group),
                (None, None) => {
                    return Err(ConfigError::UnknownEntity {
                        owner: owner.to_string(),
                        entity: s.entity.clone(),
                    });
                }
            };
            b = b.add_spawn_entry(SpawnEntry::new(entity, s.weight, s.min_group, s.max_group));
        }
        for (key, &count) in &self.trees {
            b = b.add_tree_feature(key.as_str(), count);
        }
        for (key, &chance) in &self.rare_trees {
            b = b.add_rare_tree_feature(key.as_str(), chance);
        }
        for (name, &count) in &self.grass {
            b = b.add_grass_feature(block(blocks, owner, name)?, count);
        }
        for (name, &count) in &self.double_grass {
            b = b.add_double_grass_feature(block(blocks, owner, name)?, count);
        }
        b = b.add_structure_features(self.structures.iter().map(String::as_str));
        for f in &self.features {
            f.decorator
                .validate()
                .map_err(|source| ConfigError::BadDecorator {
                    owner: owner.to_string(),
                    source,
                })?;
            let config = match &f.block {
                Some(name) => FeatureConfig::Plant {
                    block: block(blocks, owner, name)?,
                },
                None => FeatureConfig::Default,
            };
            b = b.add_custom_feature(
                f.step,
                ConfiguredFeature::new(FeatureKey::new(f.feature.clone()), config, f.decorator),
            );
        }
        Ok(b)
    }
}

/// Templates and built biomes of one pack.
#[derive(Clone, Debug, Default)]
pub struct BiomePack {
    pub templates: BTreeMap<String, BiomeTemplate>,
    pub biomes: BTreeMap<String, Biome>,
}

impl BiomePack {
    fn base_builder(&self, name: &str, def: &BiomeDef) -> Result<BiomeBuilder, ConfigError> {
        match &def.template {
            Some(t) => self
                .templates
                .get(t)
                .map(BiomeTemplate::builder)
                .ok_or_else(|| ConfigError::UnknownTemplate {
                    biome: name.to_string(),
                    template: t.clone(),
                }),
            None => Ok(BiomeBuilder::new()),
        }
    }

    pub fn from_config(cfg: &BiomePackConfig, blocks: &BlockRegistry) -> Result<Self, ConfigError> {
        let mut pack = BiomePack::default();

        // Templates may derive from each other; resolve parents first.
        let mut pending: Vec<(&String, &BiomeDef)> = cfg.templates.iter().collect();
        while !pending.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = pending.into_iter().partition(|(_, def)| {
                def.template
                    .as_ref()
                    .is_none_or(|t| pack.templates.contains_key(t))
            });
            if let ([], [(name, def), ..]) = (ready.as_slice(), blocked.as_slice()) {
                return Err(ConfigError::UnknownTemplate {
                    biome: name.to_string(),
                    template: def.template.clone().unwrap_or_default(),
                });
            }
            for (name, def) in ready {
                let builder = def.apply(name, pack.base_builder(name, def)?, blocks)?;
                pack.templates.insert(name.clone(), BiomeTemplate::new(builder));
            }
            pending = blocked;
        }

        for (name, def) in &cfg.biomes {
            let biome = def
                .apply(name, pack.base_builder(name, def)?, blocks)?
                .build()
                .map_err(|source| ConfigError::Build {
                    biome: name.clone(),
                    source,
                })?;
            log::debug!("loaded biome `{}` ({} features)", name, biome.feature_count());
            pack.biomes.insert(name.clone(), biome);
        }
        Ok(pack)
    }

    pub fn from_toml_str(s: &str, blocks: &BlockRegistry) -> Result<Self, ConfigError> {
        let cfg: BiomePackConfig = toml::from_str(s)?;
        Self::from_config(&cfg, blocks)
    }

    pub fn load_from_path(path: impl AsRef<Path>, blocks: &BlockRegistry) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s, blocks)
    }

    pub fn get(&self, name: &str) -> Option<&Biome> {
        self.biomes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.biomes.keys().map(String::as_str)
    }
}
