//! Column surface builders: which block a terrain column gets at each height.

use serde::Deserialize;
use terraform_blocks::Block;
use terraform_geom::BlockPos;

use crate::WorldAccess;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceBuilder {
    /// Top block, then `under` for the topsoil layers, stone below.
    #[default]
    Default,
    /// Bare stone up to the surface.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub top: Block,
    pub under: Block,
    /// Replaces `top` on columns whose surface sits below sea level.
    pub underwater: Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfiguredSurfaceBuilder {
    pub builder: SurfaceBuilder,
    pub config: SurfaceConfig,
}

/// Host-wide column parameters shared by every biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayers {
    pub stone: Block,
    pub water: Block,
    pub sea_level: i32,
    pub topsoil_thickness: i32,
}

impl ConfiguredSurfaceBuilder {
    pub fn new(builder: SurfaceBuilder, config: SurfaceConfig) -> Self {
        Self { builder, config }
    }

    /// Block at height `y` in a column whose first air block is `height`.
    pub fn select_block(&self, y: i32, height: i32, layers: &ColumnLayers) -> Block {
        if y >= height {
            return if y < layers.sea_level {
                layers.water
            } else {
                Block::AIR
            };
        }
        match self.builder {
            SurfaceBuilder::None => layers.stone,
            SurfaceBuilder::Default => {
                let submerged = height <= layers.sea_level;
                if y == height - 1 {
                    if submerged {
                        self.config.underwater
                    } else {
                        self.config.top
                    }
                } else if y + layers.topsoil_thickness >= height {
                    if submerged {
                        self.config.underwater
                    } else {
                        self.config.under
                    }
                } else {
                    layers.stone
                }
            }
        }
    }

    /// Fills the column at (`x`, `z`) from `min_y` up to `max_y` exclusive.
    pub fn build_column(
        &self,
        world: &mut dyn WorldAccess,
        x: i32,
        z: i32,
        height: i32,
        min_y: i32,
        max_y: i32,
        layers: &ColumnLayers,
    ) {
        for y in min_y..max_y {
            let b = self.select_block(y, height, layers);
            if b != Block::AIR {
                world.set_block(BlockPos::new(x, y, z), b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: Block = Block::new(1, 0);
    const DIRT: Block = Block::new(2, 0);
    const GRASS: Block = Block::new(3, 0);
    const SAND: Block = Block::new(4, 0);
    const WATER: Block = Block::new(5, 0);

    fn layers() -> ColumnLayers {
        ColumnLayers {
            stone: STONE,
            water: WATER,
            sea_level: 10,
            topsoil_thickness: 3,
        }
    }

    fn grassy() -> ConfiguredSurfaceBuilder {
        ConfiguredSurfaceBuilder::new(
            SurfaceBuilder::Default,
            SurfaceConfig {
                top: GRASS,
                under: DIRT,
                underwater: SAND,
            },
        )
    }

    #[test]
    fn dry_column_layers() {
        let s = grassy();
        let l = layers();
        assert_eq!(s.select_block(20, 20, &l), Block::AIR);
        assert_eq!(s.select_block(19, 20, &l), GRASS);
        assert_eq!(s.select_block(18, 20, &l), DIRT);
        assert_eq!(s.select_block(17, 20, &l), DIRT);
        assert_eq!(s.select_block(16, 20, &l), STONE);
    }

    #[test]
    fn submerged_column_uses_underwater_and_water_fill() {
        let s = grassy();
        let l = layers();
        assert_eq!(s.select_block(7, 8, &l), SAND);
        assert_eq!(s.select_block(8, 8, &l), WATER);
        assert_eq!(s.select_block(9, 8, &l), WATER);
        assert_eq!(s.select_block(10, 8, &l), Block::AIR);
    }

    #[test]
    fn none_builder_is_bare_stone() {
        let s = ConfiguredSurfaceBuilder::new(SurfaceBuilder::None, grassy().config);
        assert_eq!(s.select_block(19, 20, &layers()), STONE);
    }
}
