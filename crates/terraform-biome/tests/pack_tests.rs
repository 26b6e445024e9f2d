use std::path::PathBuf;

use terraform_biome::{
    BiomePack, BuildError, Category, ConfigError, EntityType, GenerationStep, SpawnGroup,
    StructureKey,
};
use terraform_blocks::BlockRegistry;
use terraform_feature::{Decorator, FeatureConfig, FeatureRegistry};

const BLOCKS: &str = r#"
[[blocks]]
name = "air"

[[blocks]]
name = "stone"

[[blocks]]
name = "dirt"
tags = ["natural_dirt", "plant_soil"]

[[blocks]]
name = "grass_block"
tags = ["grass", "plant_soil"]

[[blocks]]
name = "gravel"

[[blocks]]
name = "short_grass"
solid = false
"#;

const PACK: &str = r##"
[templates.forest]
surface = { top = "grass_block", under = "dirt", underwater = "gravel" }
precipitation = "rain"
category = "forest"
depth = 0.1
scale = 0.2
temperature = 0.7
downfall = 0.8
water_color = "#3f76e4"
water_fog_color = 329011
default_spawns = true
trees = { oak = 8, fallen_oak = 2 }
grass = { short_grass = 4 }

[templates.dark_forest]
template = "forest"
rare_trees = { dead_oak = 6 }

[biomes.oak_forest]
template = "forest"
grass_color = "#79c05a"
spawn_chance = 0.12
structures = ["village", "mineshaft"]
spawns = [
    { entity = "wolf", weight = 5, min_group = 4, max_group = 4 },
    { entity = "moth", group = "ambient", weight = 20, min_group = 2, max_group = 3 },
]

[biomes.spooky]
template = "dark_forest"
category = "swamp"
features = [
    { step = "local_modifications", feature = "boulder", decorator = { type = "chance_heightmap", chance = 16 } },
    { step = "vegetal_decoration", feature = "grass", block = "short_grass", decorator = { type = "count_heightmap", count = 2 } },
]
"##;

fn blocks() -> BlockRegistry {
    BlockRegistry::from_toml_str(BLOCKS).expect("blocks")
}

#[test]
fn pack_resolves_templates_and_overrides() {
    let pack = BiomePack::from_toml_str(PACK, &blocks()).unwrap();
    assert_eq!(pack.names().collect::<Vec<_>>(), ["oak_forest", "spooky"]);
    assert_eq!(pack.templates.len(), 2);

    let oak = pack.get("oak_forest").unwrap();
    assert_eq!(oak.settings.category, Category::Forest);
    assert_eq!(oak.settings.water_color, 0x3F76E4);
    assert_eq!(oak.settings.water_fog_color, 329011);
    assert_eq!(oak.grass_color(), 0x79C05A);
    assert!((oak.max_spawn_limit() - 0.12).abs() < 1e-6);
    assert!(oak.has_structure(&StructureKey::from("mineshaft")));
    // 2 trees + 1 grass
    assert_eq!(oak.features(GenerationStep::VegetalDecoration).len(), 3);
    assert_eq!(oak.spawns(SpawnGroup::Creature).len(), 5);
    let ambient = oak.spawns(SpawnGroup::Ambient);
    assert_eq!(ambient.len(), 2);
    assert_eq!(ambient[1].entity, EntityType::custom("moth", SpawnGroup::Ambient));

    let spooky = pack.get("spooky").unwrap();
    assert_eq!(spooky.settings.category, Category::Swamp);
    assert!(!spooky.has_structure(&StructureKey::from("village")));
    let local = spooky.features(GenerationStep::LocalModifications);
    assert_eq!(local[0].decorator, Decorator::ChanceHeightmap { chance: 16 });
    let veg = spooky.features(GenerationStep::VegetalDecoration);
    assert_eq!(veg.len(), 5);
    assert_eq!(veg[2].feature.as_str(), "dead_oak");
    assert!(matches!(veg[3].config, FeatureConfig::Plant { .. }));
}

#[test]
fn unknown_references_are_errors() {
    let reg = blocks();
    let err = BiomePack::from_toml_str("[biomes.a]\ntemplate = \"nope\"\n", &reg).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTemplate { template, .. } if template == "nope"));

    let err = BiomePack::from_toml_str(
        "[templates.a]\ntemplate = \"b\"\n[templates.b]\ntemplate = \"a\"\n",
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTemplate { .. }));

    let err = BiomePack::from_toml_str("[biomes.a]\ngrass = { fern = 3 }\n", &reg).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownBlock { block, .. } if block == "fern"));

    let err = BiomePack::from_toml_str(
        "[biomes.a]\nspawns = [{ entity = \"moth\", weight = 1, min_group = 1, max_group = 1 }]\n",
        &reg,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownEntity { .. }));

    let err = BiomePack::from_toml_str("[biomes.a]\nwater_color = \"blue\"\n", &reg).unwrap_err();
    assert!(matches!(err, ConfigError::BadColor(c) if c == "blue"));

    let err = BiomePack::from_toml_str("[biomes.a]\ncategory = \"plains\"\n", &reg).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Build {
            source: BuildError::MissingSetting("surface_builder"),
            ..
        }
    ));

    let err = BiomePack::from_toml_str("[biomes.a]\ncategory = \"lava_lake\"\n", &reg).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn bad_decorator_chances_are_rejected() {
    let reg = blocks();
    for chance in ["nan", "1.5", "-0.25"] {
        let pack = format!(
            "{PACK}\n[biomes.bad]\ntemplate = \"forest\"\nfeatures = [{{ step = \"vegetal_decoration\", feature = \"oak\", decorator = {{ type = \"count_extra_heightmap\", count = 1, extra_chance = {chance}, extra_count = 1 }} }}]\n"
        );
        let err = BiomePack::from_toml_str(&pack, &reg).unwrap_err();
        assert!(
            matches!(&err, ConfigError::BadDecorator { owner, .. } if owner == "bad"),
            "{chance}: {err}"
        );
    }
}

#[test]
fn huge_tree_counts_load() {
    let reg = blocks();
    let pack = format!("{PACK}\n[biomes.dense]\ntemplate = \"forest\"\ntrees = {{ a = 4294967295, b = 1 }}\n");
    let pack = BiomePack::from_toml_str(&pack, &reg).unwrap();
    let veg = pack.get("dense").unwrap().features(GenerationStep::VegetalDecoration);
    assert!(veg.iter().any(|f| matches!(
        f.decorator,
        Decorator::CountExtraHeightmap { count: u32::MAX, .. }
    )));
}

#[test]
fn bundled_assets_load_together() {
    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets");
    let blocks = BlockRegistry::load_from_path(assets.join("blocks.toml")).expect("blocks");
    let features = FeatureRegistry::load_from_path(assets.join("features.toml"), &blocks).unwrap();
    let pack = BiomePack::load_from_path(assets.join("biomes.toml"), &blocks).unwrap();
    assert!(pack.names().count() > 0);

    // every feature a bundled biome uses is registered
    for name in pack.names() {
        let biome = pack.get(name).unwrap();
        for (_, configured) in biome.steps() {
            for cf in configured {
                assert!(features.contains(&cf.feature), "{name}: {}", cf.feature);
            }
        }
    }
}
