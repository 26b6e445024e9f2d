use serde::Deserialize;
use std::collections::BTreeMap;

// features.toml: one table per feature, keyed by the feature's registry name
#[derive(Clone, Debug, Deserialize, Default)]
pub struct FeaturesConfig {
    #[serde(default)]
    pub features: BTreeMap<String, FeatureDef>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureDef {
    FallenLog {
        log: String,
        #[serde(default = "default_min_length")]
        min_length: u32,
        #[serde(default = "default_variance")]
        variance: u32,
    },
    Tree {
        log: String,
        leaves: String,
        #[serde(default = "default_trunk_min")]
        trunk_min: i32,
        #[serde(default = "default_trunk_max")]
        trunk_max: i32,
        #[serde(default = "default_leaf_radius")]
        leaf_radius: i32,
    },
}

fn default_min_length() -> u32 {
    5
}
fn default_variance() -> u32 {
    8
}
fn default_trunk_min() -> i32 {
    4
}
fn default_trunk_max() -> i32 {
    6
}
fn default_leaf_radius() -> i32 {
    2
}
