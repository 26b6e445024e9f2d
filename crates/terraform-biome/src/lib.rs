//! Biome definitions: settings, vegetation, structures and spawn tables,
//! assembled through a fluent builder and applied to chunks.
#![forbid(unsafe_code)]

pub mod biome;
pub mod builder;
pub mod color;
pub mod config;
pub mod decorate;
mod error;
pub mod spawn;

pub use biome::{
    Biome, BiomeSettings, Category, ConfiguredFeature, GenerationStep, Precipitation, StructureKey,
};
pub use builder::{BiomeBuilder, BiomeTemplate, DefaultFeature, TREE_EXTRA_CHANCE_SCALE};
pub use config::BiomePack;
pub use decorate::{DecorationReport, FeatureStats, decorate_chunk};
pub use error::{BuildError, ConfigError};
pub use spawn::{DEFAULT_SPAWN_ENTRIES, EntityType, SpawnEntry, SpawnGroup};
