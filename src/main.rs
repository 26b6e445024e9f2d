use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terraform_biome::{BiomePack, DecorationReport, decorate_chunk};
use terraform_blocks::BlockRegistry;
use terraform_feature::FeatureRegistry;
use terraform_geom::BlockPos;
use terraform_world::{ColumnLayers, TerrainParams, TerrainShaper, VoxelRegion};

mod summary;

const CHUNK: usize = 16;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate and decorate a patch of biome terrain")]
struct Args {
    /// Block palette
    #[arg(long, default_value = "assets/blocks.toml")]
    blocks: PathBuf,

    /// Feature definitions
    #[arg(long, default_value = "assets/features.toml")]
    features: PathBuf,

    /// Biome pack
    #[arg(long, default_value = "assets/biomes.toml")]
    biomes: PathBuf,

    /// Optional terrain noise parameters (TOML)
    #[arg(long)]
    terrain: Option<PathBuf>,

    /// Biome to generate; defaults to the first one in the pack
    #[arg(long)]
    biome: Option<String>,

    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Width of the generated area in chunks
    #[arg(long, default_value_t = 2)]
    chunks: usize,

    #[arg(long, default_value_t = 96)]
    height: usize,

    /// List the biomes in the pack and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let blocks = Arc::new(BlockRegistry::load_from_path(&args.blocks)?);
    let features = FeatureRegistry::load_from_path(&args.features, &blocks)?;
    let pack = BiomePack::load_from_path(&args.biomes, &blocks)?;
    log::info!(
        "loaded {} blocks, {} features, {} biomes",
        blocks.by_name.len(),
        features.len(),
        pack.biomes.len()
    );

    if args.list {
        for name in pack.names() {
            if let Some(b) = pack.get(name) {
                println!(
                    "{:<20} {:?}, depth {:.2}, scale {:.2}, {} features",
                    name,
                    b.settings.category,
                    b.settings.depth,
                    b.settings.scale,
                    b.feature_count()
                );
            }
        }
        return Ok(());
    }

    let name = match args.biome.as_deref().or_else(|| pack.names().next()) {
        Some(n) => n.to_string(),
        None => return Err("biome pack is empty".into()),
    };
    let biome = pack
        .get(&name)
        .ok_or_else(|| format!("unknown biome `{name}`"))?;

    let params = match &args.terrain {
        Some(path) => toml::from_str::<TerrainParams>(&std::fs::read_to_string(path)?)?,
        None => TerrainParams::default(),
    };
    let layers = ColumnLayers {
        stone: blocks
            .make_block_by_name("stone", None)
            .ok_or("block palette has no `stone`")?,
        water: blocks
            .make_block_by_name("water", None)
            .ok_or("block palette has no `water`")?,
        sea_level: params.sea_level,
        topsoil_thickness: params.topsoil_thickness,
    };

    let width = args.chunks.max(1) * CHUNK;
    let mut region = VoxelRegion::new(blocks.clone(), BlockPos::ORIGIN, width, args.height, width);
    let shaper = TerrainShaper::new(args.seed as i32, params);
    shaper.shape_region(
        &mut region,
        &biome.settings.surface_builder,
        biome.settings.depth,
        biome.settings.scale,
        &layers,
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut report = DecorationReport::default();
    for cz in 0..args.chunks.max(1) {
        for cx in 0..args.chunks.max(1) {
            let origin = BlockPos::new((cx * CHUNK) as i32, 0, (cz * CHUNK) as i32);
            report.merge(decorate_chunk(biome, &features, &mut region, &mut rng, origin));
        }
    }

    summary::print(&name, biome, &report, &region);
    Ok(())
}
