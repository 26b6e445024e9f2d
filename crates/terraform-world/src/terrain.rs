//! Noise heightfield used to shape demo terrain before decoration.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

use crate::surface::{ColumnLayers, ConfiguredSurfaceBuilder};
use crate::{TestableWorld, VoxelRegion};

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainParams {
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    // Blocks of relief per unit of biome depth/scale
    #[serde(default = "default_vertical_scale")]
    pub vertical_scale: f32,
    #[serde(default = "default_topsoil")]
    pub topsoil_thickness: i32,
}
fn default_frequency() -> f32 {
    0.02
}
fn default_sea_level() -> i32 {
    32
}
fn default_vertical_scale() -> f32 {
    16.0
}
fn default_topsoil() -> i32 {
    3
}
impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            sea_level: default_sea_level(),
            vertical_scale: default_vertical_scale(),
            topsoil_thickness: default_topsoil(),
        }
    }
}

pub struct TerrainShaper {
    noise: FastNoiseLite,
    pub params: TerrainParams,
}

impl TerrainShaper {
    pub fn new(seed: i32, params: TerrainParams) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(params.frequency));
        Self { noise, params }
    }

    /// First air block of the column, clamped into `[min_y + 1, max_y - 1]`.
    pub fn height_at(&self, x: i32, z: i32, depth: f32, scale: f32, min_y: i32, max_y: i32) -> i32 {
        let n = self.noise.get_noise_2d(x as f32, z as f32);
        let offset = (depth + scale * n) * self.params.vertical_scale;
        let h = self.params.sea_level + offset.round() as i32;
        h.clamp(min_y + 1, (max_y - 1).max(min_y + 1))
    }

    /// Shapes every column of `region` and lays down the biome surface.
    pub fn shape_region(
        &self,
        region: &mut VoxelRegion,
        surface: &ConfiguredSurfaceBuilder,
        depth: f32,
        scale: f32,
        layers: &ColumnLayers,
    ) {
        let min_y = region.origin.y;
        let max_y = min_y + region.sy as i32;
        for lz in 0..region.sz as i32 {
            for lx in 0..region.sx as i32 {
                let x = region.origin.x + lx;
                let z = region.origin.z + lz;
                let height = self.height_at(x, z, depth, scale, min_y, max_y);
                surface.build_column(&mut *region, x, z, height, min_y, max_y, layers);
            }
        }
        log::debug!(
            "shaped {}x{} columns, sample top at origin = {}",
            region.sx,
            region.sz,
            region.top_y(region.origin.x, region.origin.z)
        );
    }
}
