//! Decorators choose where in a chunk a feature is attempted.

use rand::{Rng, RngCore};
use serde::Deserialize;
use terraform_geom::BlockPos;
use terraform_world::TestableWorld;

use crate::FeatureError;

pub const CHUNK_WIDTH: i32 = 16;

// Random column of the chunk and its surface height.
fn surface_column<W: TestableWorld + ?Sized>(
    world: &W,
    rng: &mut dyn RngCore,
    chunk_origin: BlockPos,
) -> (i32, i32, i32) {
    let x = chunk_origin.x + rng.gen_range(0..CHUNK_WIDTH);
    let z = chunk_origin.z + rng.gen_range(0..CHUNK_WIDTH);
    (x, z, world.top_y(x, z))
}

// Probability for `gen_bool`; NaN and out-of-range chances are clamped.
fn probability(chance: f32) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        f64::from(chance.clamp(0.0, 1.0))
    }
}

fn extra_attempts(rng: &mut dyn RngCore, count: u32, extra_chance: f32, extra_count: u32) -> u32 {
    if rng.gen_bool(probability(extra_chance)) {
        count.saturating_add(extra_count)
    } else {
        count
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decorator {
    /// `count` attempts on the surface.
    CountHeightmap { count: u32 },
    /// `count` attempts on the surface, plus `extra_count` more with
    /// probability `extra_chance`.
    CountExtraHeightmap {
        count: u32,
        extra_chance: f32,
        extra_count: u32,
    },
    /// One surface attempt with probability `1 / chance`.
    ChanceHeightmap { chance: u32 },
    /// `count` attempts at a random height up to twice the surface height.
    CountHeightmapDouble { count: u32 },
    /// `count` attempts at a random height up to 32 above the surface.
    CountHeightmap32 { count: u32 },
}

impl Decorator {
    /// Attempt positions for the chunk whose lowest corner is `chunk_origin`.
    /// Heights are measured from `chunk_origin.y`, the floor of the world.
    pub fn positions<W: TestableWorld + ?Sized>(
        &self,
        world: &W,
        rng: &mut dyn RngCore,
        chunk_origin: BlockPos,
    ) -> Vec<BlockPos> {
        let floor = chunk_origin.y;
        let mut out = Vec::new();
        match *self {
            Decorator::CountHeightmap { count } => {
                for _ in 0..count {
                    let (x, z, top) = surface_column(world, rng, chunk_origin);
                    out.push(BlockPos::new(x, top, z));
                }
            }
            Decorator::CountExtraHeightmap {
                count,
                extra_chance,
                extra_count,
            } => {
                for _ in 0..extra_attempts(rng, count, extra_chance, extra_count) {
                    let (x, z, top) = surface_column(world, rng, chunk_origin);
                    out.push(BlockPos::new(x, top, z));
                }
            }
            Decorator::ChanceHeightmap { chance } => {
                if chance > 0 && rng.gen_bool(1.0 / f64::from(chance)) {
                    let (x, z, top) = surface_column(world, rng, chunk_origin);
                    out.push(BlockPos::new(x, top, z));
                }
            }
            Decorator::CountHeightmapDouble { count } => {
                for _ in 0..count {
                    let (x, z, top) = surface_column(world, rng, chunk_origin);
                    let span = (top - floor) * 2;
                    if span > 0 {
                        out.push(BlockPos::new(x, floor + rng.gen_range(0..span), z));
                    }
                }
            }
            Decorator::CountHeightmap32 { count } => {
                for _ in 0..count {
                    let (x, z, top) = surface_column(world, rng, chunk_origin);
                    let span = top - floor + 32;
                    if span > 0 {
                        out.push(BlockPos::new(x, floor + rng.gen_range(0..span), z));
                    }
                }
            }
        }
        out
    }

    /// Rejects chances that are not a probability.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if let Decorator::CountExtraHeightmap { extra_chance, .. } = *self {
            if !(0.0..=1.0).contains(&extra_chance) {
                return Err(FeatureError::InvalidConfig {
                    feature: "count_extra_heightmap",
                    reason: format!("extra_chance must be within [0, 1] (got {extra_chance})"),
                });
            }
        }
        Ok(())
    }

    /// Mean attempts per chunk.
    pub fn expected_attempts(&self) -> f32 {
        match *self {
            Decorator::CountHeightmap { count }
            | Decorator::CountHeightmapDouble { count }
            | Decorator::CountHeightmap32 { count } => count as f32,
            Decorator::CountExtraHeightmap {
                count,
                extra_chance,
                extra_count,
            } => count as f32 + probability(extra_chance) as f32 * extra_count as f32,
            Decorator::ChanceHeightmap { chance } => {
                if chance == 0 {
                    0.0
                } else {
                    1.0 / chance as f32
                }
            }
        }
    }
}
