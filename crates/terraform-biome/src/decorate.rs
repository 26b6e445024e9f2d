use std::collections::BTreeMap;
use std::fmt;

use rand::RngCore;
use terraform_feature::{FeatureKey, FeatureRegistry};
use terraform_geom::BlockPos;
use terraform_world::WorldAccess;

use crate::biome::{Biome, GenerationStep};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureStats {
    pub attempts: u32,
    pub placed: u32,
}

/// Per-feature outcome of decorating one or more chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecorationReport {
    pub features: BTreeMap<FeatureKey, FeatureStats>,
    /// Keys the biome referenced that the registry does not know.
    pub missing: BTreeMap<FeatureKey, u32>,
}

impl DecorationReport {
    pub fn total_placed(&self) -> u32 {
        self.features.values().map(|s| s.placed).sum()
    }

    pub fn merge(&mut self, other: DecorationReport) {
        for (key, s) in other.features {
            let e = self.features.entry(key).or_default();
            e.attempts += s.attempts;
            e.placed += s.placed;
        }
        for (key, n) in other.missing {
            *self.missing.entry(key).or_default() += n;
        }
    }
}

impl fmt::Display for DecorationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, s) in &self.features {
            writeln!(f, "{:<20} {:>6} placed / {:>6} attempts", key, s.placed, s.attempts)?;
        }
        for (key, n) in &self.missing {
            writeln!(f, "{:<20} unregistered ({} configured uses)", key, n)?;
        }
        Ok(())
    }
}

/// Runs every configured feature of `biome` over the chunk at
/// `chunk_origin`, step by step in generation order.
pub fn decorate_chunk(
    biome: &Biome,
    registry: &FeatureRegistry,
    world: &mut dyn WorldAccess,
    rng: &mut dyn RngCore,
    chunk_origin: BlockPos,
) -> DecorationReport {
    let mut report = DecorationReport::default();
    for step in GenerationStep::ALL {
        for configured in biome.features(step) {
            let Some(feature) = registry.get(&configured.feature) else {
                log::warn!("biome feature `{}` is not registered", configured.feature);
                *report.missing.entry(configured.feature.clone()).or_default() += 1;
                continue;
            };
            let positions = configured.decorator.positions(&*world, rng, chunk_origin);
            let stats = report.features.entry(configured.feature.clone()).or_default();
            for pos in positions {
                stats.attempts += 1;
                if feature.place(world, rng, pos, &configured.config) {
                    stats.placed += 1;
                }
            }
        }
    }
    log::debug!(
        "decorated chunk at {:?}: {} placements",
        chunk_origin,
        report.total_placed()
    );
    report
}
