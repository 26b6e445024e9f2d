//! Horizontal "fallen log" decoration.
//!
//! A log of `min_length + rand(variance)` blocks is laid along a random
//! horizontal direction starting one step away from the origin. The origin
//! must sit on natural dirt or grass, every log position must be air or
//! leaves inside the writable volume, and the log may not hang over open
//! space for more than half of its length. All checks run before the first write, so a rejected
//! placement never touches the world.

use std::collections::BTreeSet;

use rand::{Rng, RngCore};
use serde::Deserialize;
use terraform_blocks::{Block, BlockRegistry};
use terraform_geom::{Axis, AxisDirection, BlockBox, BlockPos, Direction};
use terraform_world::WorldAccess;

use crate::{FeatureError, TreeFeature, resolve_block, set_block_state};

/// A log is rejected when `FLOATING_LOG_FACTOR * unsupported > length`.
pub const FLOATING_LOG_FACTOR: u32 = 2;

pub const DIRT_NAME: &str = "dirt";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct FallenLogConfig {
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    #[serde(default = "default_variance")]
    pub variance: u32,
}
fn default_min_length() -> u32 {
    5
}
fn default_variance() -> u32 {
    8
}
impl Default for FallenLogConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            variance: default_variance(),
        }
    }
}

impl FallenLogConfig {
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.min_length < 1 || self.variance < 1 {
            return Err(FeatureError::InvalidConfig {
                feature: "fallen_log",
                reason: format!(
                    "min_length and variance must be >= 1 (got {} and {})",
                    self.min_length, self.variance
                ),
            });
        }
        Ok(())
    }
}

/// One block per `axis` orientation of an orientable block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisBlocks {
    pub x: Block,
    pub y: Block,
    pub z: Block,
}

impl AxisBlocks {
    pub fn resolve(registry: &BlockRegistry, name: &str) -> Result<Self, FeatureError> {
        let base = resolve_block(registry, name)?;
        let ty = registry
            .get(base.id)
            .ok_or_else(|| FeatureError::UnknownBlock(name.to_string()))?;
        let oriented = |axis: Axis| -> Result<Block, FeatureError> {
            let state = ty.with_prop(base.state, "axis", axis.as_str()).ok_or_else(|| {
                FeatureError::MissingState {
                    block: name.to_string(),
                    prop: "axis",
                    value: axis.as_str(),
                }
            })?;
            Ok(Block::new(base.id, state))
        };
        Ok(Self {
            x: oriented(Axis::X)?,
            y: oriented(Axis::Y)?,
            z: oriented(Axis::Z)?,
        })
    }

    #[inline]
    pub fn for_axis(&self, axis: Axis) -> Block {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FallenLogFeature {
    log: AxisBlocks,
    dirt: Block,
    config: FallenLogConfig,
}

impl FallenLogFeature {
    pub fn new(registry: &BlockRegistry, log: &str) -> Result<Self, FeatureError> {
        Self::with_config(registry, log, FallenLogConfig::default())
    }

    pub fn with_config(
        registry: &BlockRegistry,
        log: &str,
        config: FallenLogConfig,
    ) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self {
            log: AxisBlocks::resolve(registry, log)?,
            dirt: resolve_block(registry, DIRT_NAME)?,
            config,
        })
    }

    pub fn config(&self) -> &FallenLogConfig {
        &self.config
    }

    pub fn log_blocks(&self) -> &AxisBlocks {
        &self.log
    }
}

impl TreeFeature for FallenLogFeature {
    fn generate(
        &self,
        out: &mut BTreeSet<BlockPos>,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        bbox: &mut BlockBox,
    ) -> bool {
        let length = self.config.min_length + rng.gen_range(0..self.config.variance);

        let axis = if rng.gen_bool(0.5) { Axis::X } else { Axis::Z };
        let sign = if rng.gen_bool(0.5) {
            AxisDirection::Positive
        } else {
            AxisDirection::Negative
        };
        let direction = Direction::from_axis(axis, sign);

        if !world.test_block(origin.down(), &|v| v.is_natural_dirt_or_grass()) {
            log::trace!("fallen log at {:?}: no dirt below origin", origin);
            return false;
        }

        let mut air = 0u32;
        let mut pos = origin;
        for _ in 0..length {
            pos = pos.offset(direction);
            if !world.is_writable(pos) || !world.is_writable(pos.down()) {
                log::trace!("fallen log at {:?}: {:?} is outside the world", origin, pos);
                return false;
            }
            if !world.test_block(pos.down(), &|v| v.is_opaque()) {
                air += 1;
            }
            if !world.test_block(pos, &|v| v.is_air_or_leaves()) {
                log::trace!("fallen log at {:?}: blocked at {:?}", origin, pos);
                return false;
            }
        }

        if air * FLOATING_LOG_FACTOR > length {
            log::trace!(
                "fallen log at {:?}: {} of {} blocks unsupported",
                origin,
                air,
                length
            );
            return false;
        }

        let log = self.log.for_axis(axis);
        let mut pos = origin;
        for _ in 0..length {
            pos = pos.offset(direction);
            set_block_state(out, world, pos, log, bbox);
            let below = pos.down();
            if world.test_block(below, &|v| v.is_natural_dirt_or_grass()) {
                set_block_state(out, world, below, self.dirt, bbox);
            }
        }
        true
    }
}
