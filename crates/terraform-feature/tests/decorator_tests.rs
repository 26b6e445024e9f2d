use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terraform_blocks::BlockRegistry;
use terraform_feature::Decorator;
use terraform_feature::decorator::CHUNK_WIDTH;
use terraform_geom::BlockPos;
use terraform_world::{ModifiableWorld, VoxelRegion};

const SURFACE: i32 = 10;

// One chunk of stone, surface at SURFACE everywhere.
fn chunk(origin: BlockPos) -> VoxelRegion {
    let reg = Arc::new(
        BlockRegistry::from_toml_str("[[blocks]]\nname = \"air\"\n[[blocks]]\nname = \"stone\"\n")
            .expect("registry"),
    );
    let stone = reg.make_block_by_name("stone", None).expect("stone");
    let mut region = VoxelRegion::new(reg, origin, 16, 64, 16);
    for y in 0..SURFACE {
        for z in 0..16 {
            for x in 0..16 {
                region.set_block(origin + BlockPos::new(x, y, z), stone);
            }
        }
    }
    region
}

fn in_chunk(p: BlockPos, origin: BlockPos) -> bool {
    (origin.x..origin.x + CHUNK_WIDTH).contains(&p.x) && (origin.z..origin.z + CHUNK_WIDTH).contains(&p.z)
}

#[test]
fn heightmap_count_lands_on_surface() {
    let origin = BlockPos::new(32, 0, -16);
    let world = chunk(origin);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let ps = Decorator::CountHeightmap { count: 7 }.positions(&world, &mut rng, origin);
    assert_eq!(ps.len(), 7);
    for p in ps {
        assert!(in_chunk(p, origin));
        assert_eq!(p.y, SURFACE);
    }
}

#[test]
fn extra_count_follows_chance_extremes() {
    let origin = BlockPos::ORIGIN;
    let world = chunk(origin);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let never = Decorator::CountExtraHeightmap {
        count: 3,
        extra_chance: 0.0,
        extra_count: 1,
    };
    let always = Decorator::CountExtraHeightmap {
        count: 3,
        extra_chance: 1.0,
        extra_count: 1,
    };
    for _ in 0..20 {
        assert_eq!(never.positions(&world, &mut rng, origin).len(), 3);
        assert_eq!(always.positions(&world, &mut rng, origin).len(), 4);
    }
    assert!((always.expected_attempts() - 4.0).abs() < 1e-6);
}

#[test]
fn chance_heightmap_bounds() {
    let origin = BlockPos::ORIGIN;
    let world = chunk(origin);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..20 {
        assert_eq!(Decorator::ChanceHeightmap { chance: 1 }.positions(&world, &mut rng, origin).len(), 1);
        assert!(Decorator::ChanceHeightmap { chance: 0 }.positions(&world, &mut rng, origin).is_empty());
    }
    let hits: usize = (0..400)
        .map(|_| Decorator::ChanceHeightmap { chance: 4 }.positions(&world, &mut rng, origin).len())
        .sum();
    assert!((50..150).contains(&hits), "hits = {hits}");
}

#[test]
fn scattered_heights_stay_in_range() {
    let origin = BlockPos::ORIGIN;
    let world = chunk(origin);
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let double = Decorator::CountHeightmapDouble { count: 50 };
    let doubled = double.positions(&world, &mut rng, origin);
    assert_eq!(doubled.len(), 50);
    for p in doubled {
        assert!((0..SURFACE * 2).contains(&p.y));
    }
    let high = Decorator::CountHeightmap32 { count: 50 };
    let raised = high.positions(&world, &mut rng, origin);
    assert_eq!(raised.len(), 50);
    for p in raised {
        assert!((0..SURFACE + 32).contains(&p.y));
    }
}

#[test]
fn empty_columns_skip_double_height() {
    let origin = BlockPos::new(0, 0, 100);
    // region sits elsewhere: every column reads as floor height
    let world = chunk(BlockPos::ORIGIN);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(Decorator::CountHeightmapDouble { count: 8 }.positions(&world, &mut rng, origin).is_empty());
    assert_eq!(Decorator::CountHeightmap32 { count: 8 }.positions(&world, &mut rng, origin).len(), 8);
}

#[test]
fn decorators_parse_from_toml() {
    let d: Decorator = toml::from_str("type = \"count_extra_heightmap\"\ncount = 2\nextra_chance = 0.5\nextra_count = 1\n").unwrap();
    assert_eq!(
        d,
        Decorator::CountExtraHeightmap {
            count: 2,
            extra_chance: 0.5,
            extra_count: 1
        }
    );
    let d: Decorator = toml::from_str("type = \"chance_heightmap\"\nchance = 3\n").unwrap();
    assert!((d.expected_attempts() - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn out_of_range_chances_are_clamped_and_refused() {
    let origin = BlockPos::ORIGIN;
    let world = chunk(origin);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let nan = Decorator::CountExtraHeightmap {
        count: 2,
        extra_chance: f32::NAN,
        extra_count: 3,
    };
    assert_eq!(nan.positions(&world, &mut rng, origin).len(), 2);
    assert!((nan.expected_attempts() - 2.0).abs() < 1e-6);
    assert!(nan.validate().is_err());

    let above = Decorator::CountExtraHeightmap {
        count: 0,
        extra_chance: 7.5,
        extra_count: 2,
    };
    assert_eq!(above.positions(&world, &mut rng, origin).len(), 2);
    assert!(above.validate().is_err());

    let ok = Decorator::CountExtraHeightmap {
        count: 1,
        extra_chance: 0.1,
        extra_count: 1,
    };
    assert!(ok.validate().is_ok());
    assert!(Decorator::CountHeightmap { count: 4 }.validate().is_ok());
}
