use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use terraform_blocks::BlockRegistry;

use crate::config::{FeatureDef, FeaturesConfig};
use crate::{
    DoublePlantFeature, Feature, FeatureError, FeatureKey, FallenLogConfig, FallenLogFeature,
    GrassFeature, SimpleTreeFeature, TreeConfig, TreeFeature, TreeFeaturePlacer,
};

pub const GRASS_FEATURE: &str = "grass";
pub const DOUBLE_PLANT_FEATURE: &str = "double_plant";

/// Features addressable by key from biome definitions.
#[derive(Clone, Default)]
pub struct FeatureRegistry {
    features: BTreeMap<FeatureKey, Arc<dyn Feature>>,
}

impl fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.features.keys()).finish()
    }
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the plant features every biome builder relies on.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(GRASS_FEATURE, GrassFeature);
        reg.register(DOUBLE_PLANT_FEATURE, DoublePlantFeature);
        reg
    }

    pub fn register(
        &mut self,
        key: impl Into<FeatureKey>,
        feature: impl Feature + 'static,
    ) -> Option<Arc<dyn Feature>> {
        self.features.insert(key.into(), Arc::new(feature))
    }

    pub fn register_tree(
        &mut self,
        key: impl Into<FeatureKey>,
        feature: impl TreeFeature + 'static,
    ) -> Option<Arc<dyn Feature>> {
        self.register(key, TreeFeaturePlacer(feature))
    }

    pub fn get(&self, key: &FeatureKey) -> Option<Arc<dyn Feature>> {
        self.features.get(key).cloned()
    }

    pub fn contains(&self, key: &FeatureKey) -> bool {
        self.features.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &FeatureKey> {
        self.features.keys()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Builtins plus every feature defined in `cfg`.
    pub fn from_config(cfg: &FeaturesConfig, blocks: &BlockRegistry) -> Result<Self, FeatureError> {
        let mut reg = Self::with_builtins();
        for (name, def) in &cfg.features {
            match def {
                FeatureDef::FallenLog {
                    log,
                    min_length,
                    variance,
                } => {
                    let config = FallenLogConfig {
                        min_length: *min_length,
                        variance: *variance,
                    };
                    reg.register_tree(
                        name.as_str(),
                        FallenLogFeature::with_config(blocks, log, config)?,
                    );
                }
                FeatureDef::Tree {
                    log,
                    leaves,
                    trunk_min,
                    trunk_max,
                    leaf_radius,
                } => {
                    let config = TreeConfig {
                        trunk_min: *trunk_min,
                        trunk_max: *trunk_max,
                        leaf_radius: *leaf_radius,
                    };
                    reg.register_tree(
                        name.as_str(),
                        SimpleTreeFeature::new(blocks, log, leaves, config)?,
                    );
                }
            }
            log::debug!("registered feature `{}`", name);
        }
        Ok(reg)
    }

    pub fn from_toml_str(s: &str, blocks: &BlockRegistry) -> Result<Self, FeatureError> {
        let cfg: FeaturesConfig = toml::from_str(s)?;
        Self::from_config(&cfg, blocks)
    }

    pub fn load_from_path(path: impl AsRef<Path>, blocks: &BlockRegistry) -> Result<Self, FeatureError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s, blocks)
    }
}
