use hashbrown::HashMap;
use terraform_biome::{Biome, DecorationReport, SpawnGroup};
use terraform_blocks::BlockId;
use terraform_world::VoxelRegion;

/// Block counts by id, most common first.
fn histogram(region: &VoxelRegion) -> Vec<(BlockId, usize)> {
    let mut counts: HashMap<BlockId, usize> = HashMap::new();
    for b in &region.blocks {
        *counts.entry(b.id).or_default() += 1;
    }
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    out
}

pub fn print(name: &str, biome: &Biome, report: &DecorationReport, region: &VoxelRegion) {
    let s = &biome.settings;
    println!("biome {name} ({:?}, {:?})", s.category, s.precipitation);
    println!(
        "  grass #{:06x}  foliage #{:06x}  water #{:06x}  spawn limit {:.2}",
        biome.grass_color(),
        biome.foliage_color(),
        s.water_color,
        biome.max_spawn_limit()
    );
    for group in SpawnGroup::ALL {
        let spawns = biome.spawns(group);
        if !spawns.is_empty() {
            let names: Vec<String> = spawns
                .iter()
                .map(|e| format!("{}x{}", e.entity, e.weight))
                .collect();
            println!("  {:?}: {}", group, names.join(" "));
        }
    }

    println!("\nregion {}x{}x{}", region.sx, region.sy, region.sz);
    let registry = region.registry_arc();
    for (id, n) in histogram(region).into_iter().take(12) {
        let label = registry.get(id).map(|t| t.name.as_str()).unwrap_or("?");
        println!("  {:<16} {:>8}", label, n);
    }

    println!("\nfeatures");
    print!("{report}");
    println!("total placements: {}", report.total_placed());
}
