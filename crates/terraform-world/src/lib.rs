//! World-generation host capabilities and an in-memory voxel region implementing them.
#![forbid(unsafe_code)]

mod region;
pub mod surface;
pub mod terrain;

use terraform_blocks::{Block, BlockRegistry, BlockView};
use terraform_geom::BlockPos;

pub use region::VoxelRegion;
pub use surface::{ColumnLayers, ConfiguredSurfaceBuilder, SurfaceBuilder, SurfaceConfig};
pub use terrain::{TerrainParams, TerrainShaper};

/// Read side of a generation host.
pub trait TestableWorld {
    fn registry(&self) -> &BlockRegistry;

    fn block_at(&self, pos: BlockPos) -> Block;

    #[inline]
    fn test_block(&self, pos: BlockPos, pred: &dyn Fn(BlockView<'_>) -> bool) -> bool {
        pred(self.registry().view(self.block_at(pos)))
    }

    /// One above the highest solid or fluid block of the column.
    fn top_y(&self, x: i32, z: i32) -> i32;

    /// Whether a write at `pos` would be stored. Unbounded hosts keep the
    /// default.
    #[inline]
    fn is_writable(&self, _pos: BlockPos) -> bool {
        true
    }
}

/// Write side of a generation host. Returns `false` when the position is
/// outside the writable volume and nothing was stored.
pub trait ModifiableWorld {
    fn set_block(&mut self, pos: BlockPos, block: Block) -> bool;
}

pub trait WorldAccess: TestableWorld + ModifiableWorld {}

impl<T: TestableWorld + ModifiableWorld + ?Sized> WorldAccess for T {}
