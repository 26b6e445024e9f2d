use rand::{Rng, RngCore};
use terraform_blocks::{Block, tags};
use terraform_geom::BlockPos;
use terraform_world::WorldAccess;

use crate::{Feature, FeatureConfig};

const GRASS_TRIES: u32 = 128;
const DOUBLE_PLANT_TRIES: u32 = 64;
// Bound on how far grass scatters down through air and canopy to find ground.
const MAX_DESCENT: i32 = 64;

/// Random offset in `(-spread, spread)` on each axis, denser near zero.
fn scatter(rng: &mut dyn RngCore, origin: BlockPos) -> BlockPos {
    let dx = rng.gen_range(0..8) - rng.gen_range(0..8);
    let dy = rng.gen_range(0..4) - rng.gen_range(0..4);
    let dz = rng.gen_range(0..8) - rng.gen_range(0..8);
    origin + BlockPos::new(dx, dy, dz)
}

fn plant_block(config: &FeatureConfig) -> Option<Block> {
    match config {
        FeatureConfig::Plant { block } => Some(*block),
        FeatureConfig::Default => None,
    }
}

/// Scatters a single-block plant around the origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrassFeature;

impl Feature for GrassFeature {
    fn place(
        &self,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        config: &FeatureConfig,
    ) -> bool {
        let Some(plant) = plant_block(config) else {
            log::warn!("grass feature at {:?} has no plant block configured", origin);
            return false;
        };
        let mut base = origin;
        let mut steps = 0;
        while steps < MAX_DESCENT && world.test_block(base, &|v| v.is_air_or_leaves()) {
            base = base.down();
            steps += 1;
        }

        let mut placed = 0u32;
        for _ in 0..GRASS_TRIES {
            let p = scatter(rng, base);
            if world.test_block(p, &|v| v.is_air())
                && world.test_block(p.down(), &|v| v.has_tag(tags::PLANT_SOIL))
                && world.set_block(p, plant)
            {
                placed += 1;
            }
        }
        placed > 0
    }
}

/// Scatters two-block-tall plants; the block needs a `half` property with
/// `lower` and `upper` values.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoublePlantFeature;

impl Feature for DoublePlantFeature {
    fn place(
        &self,
        world: &mut dyn WorldAccess,
        rng: &mut dyn RngCore,
        origin: BlockPos,
        config: &FeatureConfig,
    ) -> bool {
        let Some(plant) = plant_block(config) else {
            log::warn!("double plant feature at {:?} has no plant block configured", origin);
            return false;
        };
        let (lower, upper) = {
            let Some(ty) = world.registry().get(plant.id) else {
                return false;
            };
            match (
                ty.with_prop(plant.state, "half", "lower"),
                ty.with_prop(plant.state, "half", "upper"),
            ) {
                (Some(l), Some(u)) => (Block::new(plant.id, l), Block::new(plant.id, u)),
                _ => {
                    log::warn!("double plant `{}` has no `half` property", ty.name);
                    return false;
                }
            }
        };

        let mut placed = false;
        for _ in 0..DOUBLE_PLANT_TRIES {
            let p = scatter(rng, origin);
            if world.test_block(p, &|v| v.is_air())
                && world.test_block(p.up(), &|v| v.is_air())
                && world.test_block(p.down(), &|v| v.has_tag(tags::PLANT_SOIL))
                && world.is_writable(p)
                && world.is_writable(p.up())
            {
                placed |= world.set_block(p, lower) & world.set_block(p.up(), upper);
            }
        }
        placed
    }
}
