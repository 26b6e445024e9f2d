//! Tag names consulted by world generation.

/// Dirt variants that count as natural ground (dirt, coarse dirt, podzol).
pub const NATURAL_DIRT: &str = "natural_dirt";
pub const GRASS: &str = "grass";
pub const LEAVES: &str = "leaves";
/// Blocks recorded in a tree feature's output set.
pub const LOGS: &str = "logs";
/// Ground that small plants may be placed on.
pub const PLANT_SOIL: &str = "plant_soil";
/// Non-solid blocks that still cap a column's heightmap.
pub const FLUID: &str = "fluid";
