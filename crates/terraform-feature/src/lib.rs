//! Placement rules (features) and their spatial distribution (decorators).
#![forbid(unsafe_code)]

pub mod config;
pub mod decorator;
mod error;
pub mod fallen_log;
pub mod plant;
pub mod registry;
pub mod tree;

use std::collections::BTreeSet;
use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use terraform_blocks::{Block, BlockRegistry, tags};
use terraform_geom::{BlockBox, BlockPos};
use terraform_world::WorldAccess;

pub use decorator::Decorator;
pub use error::FeatureError;
pub use fallen_log::{AxisBlocks, FLOATING_LOG_FACTOR, FallenLogConfig, FallenLogFeature};
pub use plant::{DoublePlantFeature, GrassFeature};
pub use registry::FeatureRegistry;
pub use tree::{SimpleTreeFeature, TreeConfig};

/// Name a feature is registered under.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureKey(pub String);

impl FeatureKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-placement configuration handed to a feature by its biome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeatureConfig {
    #[default]
    Default,
    /// Plant block placed by grass-like features.
    Plant { block: Block },
}

/// Decorator-facing placement rule.
pub trait Feature: Send + Sync {
    fn place(
        &self,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        config: &FeatureConfig,
    ) -> bool;
}

/// Tree-style placement rule. Written log positions go to `out` and `bbox`
/// grows to cover every written block.
pub trait TreeFeature: Send + Sync {
    fn generate(
        &self,
        out: &mut BTreeSet<BlockPos>,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        bbox: &mut BlockBox,
    ) -> bool;
}

/// Runs a [`TreeFeature`] as a plain [`Feature`], discarding its outputs.
pub struct TreeFeaturePlacer<T>(pub T);

impl<T: TreeFeature> Feature for TreeFeaturePlacer<T> {
    fn place(
        &self,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        _config: &FeatureConfig,
    ) -> bool {
        let mut out = BTreeSet::new();
        let mut bbox = BlockBox::EMPTY;
        self.0.generate(&mut out, world, rng, origin, &mut bbox)
    }
}

/// Writes `block`, grows `bbox`, and records log blocks in `out`. A write
/// the host drops leaves `out` and `bbox` alone and returns `false`.
pub fn set_block_state(
    out: &mut BTreeSet<BlockPos>,
    world: &mut dyn WorldAccess,
    pos: BlockPos,
    block: Block,
    bbox: &mut BlockBox,
) -> bool {
    if !world.set_block(pos, block) {
        return false;
    }
    bbox.encompass(pos);
    if world.registry().view(block).has_tag(tags::LOGS) {
        out.insert(pos);
    }
    true
}

pub(crate) fn resolve_block(registry: &BlockRegistry, name: &str) -> Result<Block, FeatureError> {
    registry
        .make_block_by_name(name, None)
        .ok_or_else(|| FeatureError::UnknownBlock(name.to_string()))
}
