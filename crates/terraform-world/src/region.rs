use std::sync::Arc;

use terraform_blocks::{Block, BlockRegistry, tags};
use terraform_geom::{BlockBox, BlockPos};

use crate::{ModifiableWorld, TestableWorld};

/// Dense block buffer covering `sx * sy * sz` blocks starting at `origin`.
/// Reads outside the buffer see air; writes outside are dropped.
#[derive(Clone, Debug)]
pub struct VoxelRegion {
    pub origin: BlockPos,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
    registry: Arc<BlockRegistry>,
}

impl VoxelRegion {
    pub fn new(registry: Arc<BlockRegistry>, origin: BlockPos, sx: usize, sy: usize, sz: usize) -> Self {
        Self::from_blocks(registry, origin, sx, sy, sz, Vec::new())
    }

    pub fn from_blocks(
        registry: Arc<BlockRegistry>,
        origin: BlockPos,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        VoxelRegion {
            origin,
            sx,
            sy,
            sz,
            blocks: b,
            registry,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    fn local(&self, pos: BlockPos) -> Option<(usize, usize, usize)> {
        let l = pos - self.origin;
        if l.x < 0 || l.y < 0 || l.z < 0 {
            return None;
        }
        let (lx, ly, lz) = (l.x as usize, l.y as usize, l.z as usize);
        if lx >= self.sx || ly >= self.sy || lz >= self.sz {
            return None;
        }
        Some((lx, ly, lz))
    }

    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.local(pos).is_some()
    }

    #[inline]
    pub fn get(&self, pos: BlockPos) -> Option<Block> {
        let (x, y, z) = self.local(pos)?;
        Some(self.blocks[self.idx(x, y, z)])
    }

    pub fn bounds(&self) -> BlockBox {
        if self.blocks.is_empty() {
            return BlockBox::EMPTY;
        }
        let max = self.origin
            + BlockPos::new(self.sx as i32 - 1, self.sy as i32 - 1, self.sz as i32 - 1);
        BlockBox::new(self.origin, max)
    }

    #[inline]
    pub fn registry_arc(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    pub fn count(&self, block: Block) -> usize {
        self.blocks.iter().filter(|b| **b == block).count()
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| *b == Block::AIR)
    }

    /// All non-air blocks with their world positions.
    pub fn snapshot(&self) -> Vec<(BlockPos, Block)> {
        let mut out = Vec::new();
        for y in 0..self.sy {
            for z in 0..self.sz {
                for x in 0..self.sx {
                    let b = self.blocks[self.idx(x, y, z)];
                    if b != Block::AIR {
                        let p = self.origin + BlockPos::new(x as i32, y as i32, z as i32);
                        out.push((p, b));
                    }
                }
            }
        }
        out
    }
}

impl TestableWorld for VoxelRegion {
    #[inline]
    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    #[inline]
    fn block_at(&self, pos: BlockPos) -> Block {
        self.get(pos).unwrap_or(Block::AIR)
    }

    #[inline]
    fn is_writable(&self, pos: BlockPos) -> bool {
        self.contains(pos)
    }

    fn top_y(&self, x: i32, z: i32) -> i32 {
        let floor = self.origin.y;
        let lx = x - self.origin.x;
        let lz = z - self.origin.z;
        if lx < 0 || lz < 0 || lx as usize >= self.sx || lz as usize >= self.sz {
            return floor;
        }
        for ly in (0..self.sy).rev() {
            let b = self.blocks[self.idx(lx as usize, ly, lz as usize)];
            let view = self.registry.view(b);
            if view.ty.is_solid() || view.has_tag(tags::FLUID) {
                return floor + ly as i32 + 1;
            }
        }
        floor
    }
}

impl ModifiableWorld for VoxelRegion {
    fn set_block(&mut self, pos: BlockPos, block: Block) -> bool {
        let Some((x, y, z)) = self.local(pos) else {
            log::trace!("dropped write outside region at {:?}", pos);
            return false;
        };
        let i = self.idx(x, y, z);
        self.blocks[i] = block;
        true
    }
}
