use serde::Deserialize;
use std::collections::HashMap;

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    // Defaults to `solid` when absent
    #[serde(default)]
    pub opaque: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    // property name -> allowed values, first value is the default
    #[serde(default)]
    pub state_schema: Option<HashMap<String, Vec<String>>>,
}

impl BlockDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            solid: None,
            opaque: None,
            tags: Vec::new(),
            state_schema: None,
        }
    }
}
