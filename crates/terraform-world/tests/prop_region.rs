use std::sync::Arc;

use proptest::prelude::*;
use terraform_blocks::{Block, BlockRegistry};
use terraform_geom::BlockPos;
use terraform_world::{ModifiableWorld, TestableWorld, VoxelRegion};

fn registry() -> Arc<BlockRegistry> {
    Arc::new(
        BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "air"

            [[blocks]]
            name = "stone"

            [[blocks]]
            name = "water"
            solid = false
            tags = ["fluid"]

            [[blocks]]
            name = "short_grass"
            solid = false
        "#,
        )
        .expect("registry"),
    )
}

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

#[test]
fn top_y_ignores_plants_but_counts_fluids() {
    let reg = registry();
    let stone = reg.make_block_by_name("stone", None).unwrap();
    let water = reg.make_block_by_name("water", None).unwrap();
    let plant = reg.make_block_by_name("short_grass", None).unwrap();
    let mut r = VoxelRegion::new(reg, BlockPos::new(0, 10, 0), 2, 8, 1);
    assert_eq!(r.top_y(0, 0), 10);
    r.set_block(BlockPos::new(0, 12, 0), stone);
    r.set_block(BlockPos::new(0, 13, 0), plant);
    assert_eq!(r.top_y(0, 0), 13);
    r.set_block(BlockPos::new(1, 11, 0), stone);
    r.set_block(BlockPos::new(1, 12, 0), water);
    assert_eq!(r.top_y(1, 0), 13);
    // columns outside the region report the floor
    assert_eq!(r.top_y(5, 0), 10);
}

#[test]
fn snapshot_lists_non_air_in_world_coords() {
    let reg = registry();
    let stone = reg.make_block_by_name("stone", None).unwrap();
    let mut r = VoxelRegion::new(reg, BlockPos::new(-4, 0, 7), 3, 3, 3);
    assert!(r.is_all_air());
    r.set_block(BlockPos::new(-3, 1, 8), stone);
    assert_eq!(r.snapshot(), vec![(BlockPos::new(-3, 1, 8), stone)]);
    assert_eq!(r.count(stone), 1);
    assert!(r.test_block(BlockPos::new(-3, 1, 8), &|v| v.is_opaque()));
    assert!(r.test_block(BlockPos::new(-3, 2, 8), &|v| v.is_air()));
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx * sy * sz;
        let r = VoxelRegion::new(registry(), BlockPos::ORIGIN, sx, sy, sz);
        let mut seen = vec![false; expect];
        for y in 0..sy { for z in 0..sz { for x in 0..sx {
            let i = r.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // writes land inside the bounds and are dropped outside
    #[test]
    fn set_block_respects_bounds(ox in small_i32(), oy in small_i32(), oz in small_i32(),
                                 sx in dim(), sy in dim(), sz in dim(),
                                 dx in -2i32..10, dy in -2i32..10, dz in -2i32..10) {
        let reg = registry();
        let stone = reg.make_block_by_name("stone", None).unwrap();
        let origin = BlockPos::new(ox, oy, oz);
        let mut r = VoxelRegion::new(reg, origin, sx, sy, sz);
        let p = origin + BlockPos::new(dx, dy, dz);
        let inside = dx >= 0 && dy >= 0 && dz >= 0
            && (dx as usize) < sx && (dy as usize) < sy && (dz as usize) < sz;
        prop_assert_eq!(r.contains(p), inside);
        prop_assert_eq!(r.bounds().contains(p), inside);
        prop_assert_eq!(r.set_block(p, stone), inside);
        if inside {
            prop_assert_eq!(r.get(p), Some(stone));
            prop_assert_eq!(r.count(stone), 1);
        } else {
            prop_assert_eq!(r.get(p), None);
            prop_assert_eq!(r.block_at(p), Block::AIR);
            prop_assert!(r.is_all_air());
        }
    }

    // from_blocks resizes or preserves to exact length
    #[test]
    fn from_blocks_resizes(sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx * sy * sz;
        let ok = VoxelRegion::from_blocks(registry(), BlockPos::ORIGIN, sx, sy, sz, vec![Block::AIR; expect]);
        prop_assert_eq!(ok.blocks.len(), expect);
        let resized = VoxelRegion::from_blocks(registry(), BlockPos::ORIGIN, sx, sy, sz, vec![Block::AIR; expect + 3]);
        prop_assert_eq!(resized.blocks.len(), expect);
    }
}
