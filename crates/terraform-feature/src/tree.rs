use std::collections::BTreeSet;

use rand::{Rng, RngCore};
use serde::Deserialize;
use terraform_blocks::{Block, BlockRegistry};
use terraform_geom::{BlockBox, BlockPos};
use terraform_world::WorldAccess;

use crate::fallen_log::{AxisBlocks, DIRT_NAME};
use crate::{FeatureError, TreeFeature, resolve_block, set_block_state};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    #[serde(default = "default_trunk_max")]
    pub trunk_max: i32,
    #[serde(default = "default_leaf_radius")]
    pub leaf_radius: i32,
}
fn default_trunk_min() -> i32 {
    4
}
fn default_trunk_max() -> i32 {
    6
}
fn default_leaf_radius() -> i32 {
    2
}
impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            trunk_min: default_trunk_min(),
            trunk_max: default_trunk_max(),
            leaf_radius: default_leaf_radius(),
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.trunk_min < 1 || self.trunk_max < self.trunk_min || self.leaf_radius < 0 {
            return Err(FeatureError::InvalidConfig {
                feature: "tree",
                reason: format!(
                    "need 1 <= trunk_min <= trunk_max and leaf_radius >= 0 (got {}..={}, r={})",
                    self.trunk_min, self.trunk_max, self.leaf_radius
                ),
            });
        }
        Ok(())
    }
}

/// Straight trunk with a diamond-shaped canopy around its top.
#[derive(Clone, Debug)]
pub struct SimpleTreeFeature {
    log: Block,
    leaves: Block,
    dirt: Block,
    config: TreeConfig,
}

impl SimpleTreeFeature {
    pub fn new(
        registry: &BlockRegistry,
        log: &str,
        leaves: &str,
        config: TreeConfig,
    ) -> Result<Self, FeatureError> {
        config.validate()?;
        // Logs without an axis property are used as-is.
        let log = match AxisBlocks::resolve(registry, log) {
            Ok(axes) => axes.y,
            Err(FeatureError::MissingState { .. }) => resolve_block(registry, log)?,
            Err(e) => return Err(e),
        };
        Ok(Self {
            log,
            leaves: resolve_block(registry, leaves)?,
            dirt: resolve_block(registry, DIRT_NAME)?,
            config,
        })
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Canopy offsets relative to the top trunk block.
    fn canopy(&self) -> impl Iterator<Item = BlockPos> + '_ {
        let r = self.config.leaf_radius;
        (-2..=2).flat_map(move |dy: i32| {
            let rad = if dy.abs() == 2 { r - 1 } else { r };
            let extra = if dy >= 1 { 0 } else { 1 };
            (-r..=r).flat_map(move |dx: i32| {
                (-r..=r).filter_map(move |dz: i32| {
                    let man = dx.abs() + dz.abs();
                    if man <= rad + extra && !(dx == 0 && dz == 0 && dy <= 0) {
                        Some(BlockPos::new(dx, dy, dz))
                    } else {
                        None
                    }
                })
            })
        })
    }
}

impl TreeFeature for SimpleTreeFeature {
    fn generate(
        &self,
        out: &mut BTreeSet<BlockPos>,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        bbox: &mut BlockBox,
    ) -> bool {
        let height = rng.gen_range(self.config.trunk_min..=self.config.trunk_max);
        let soil = origin.down();
        if !world.test_block(soil, &|v| v.is_natural_dirt_or_grass()) {
            return false;
        }
        for dy in 0..height {
            if !world.test_block(origin.up_by(dy), &|v| v.is_air_or_leaves()) {
                log::trace!("tree at {:?}: trunk blocked at dy={}", origin, dy);
                return false;
            }
        }

        set_block_state(out, world, soil, self.dirt, bbox);
        for dy in 0..height {
            set_block_state(out, world, origin.up_by(dy), self.log, bbox);
        }
        let top = origin.up_by(height - 1);
        for off in self.canopy() {
            let p = top + off;
            if world.test_block(p, &|v| v.is_air()) {
                set_block_state(out, world, p, self.leaves, bbox);
            }
        }
        true
    }
}
