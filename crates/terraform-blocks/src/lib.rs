//! Block, block-state, and registry crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod tags;
pub mod types;

pub use registry::{BlockRegistry, BlockType, BlockView};
pub use types::{Block, BlockId, BlockState};
