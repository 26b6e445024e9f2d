use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::config::{BlockDef, BlocksConfig};
use super::tags;
use super::types::{Block, BlockId, BlockState};

pub const AIR_NAME: &str = "air";

static AIR_FALLBACK: LazyLock<BlockType> = LazyLock::new(|| {
    let mut ty = BlockType::placeholder(Block::AIR.id);
    ty.name = AIR_NAME.to_string();
    ty
});

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            if reg.get(id).is_some_and(|t| !t.name.is_empty()) {
                return Err(format!("block id {id} assigned twice (`{}`)", def.name).into());
            }
            let ty = BlockType::compile(id, def);
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }
        // Block::AIR is id 0; the registry must agree with it.
        match reg.blocks.first() {
            Some(t) if t.name == AIR_NAME => {}
            _ => return Err("blocks config must define `air` with id 0".into()),
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();
        Ok(reg)
    }

    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name)?;
        let state = if let Some(p) = props {
            self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0)
        } else {
            0
        };
        Some(Block { id, state })
    }

    /// Type-aware view of `block`; unknown ids read as air.
    #[inline]
    pub fn view(&self, block: Block) -> BlockView<'_> {
        let ty = self
            .get(block.id)
            .filter(|t| !t.name.is_empty())
            .unwrap_or(&AIR_FALLBACK);
        BlockView { block, ty }
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub opaque: bool,
    pub tags: Vec<String>,
    #[allow(dead_code)]
    pub state_schema: HashMap<String, Vec<String>>, // property name -> allowed values
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    fn compile(id: BlockId, def: BlockDef) -> Self {
        let solid = def.solid.unwrap_or(def.name != AIR_NAME);
        let opaque = def.opaque.unwrap_or(solid);
        let state_schema = def.state_schema.unwrap_or_default();
        let (state_fields, prop_index) = compute_state_layout(&state_schema);
        BlockType {
            id,
            name: def.name,
            solid,
            opaque,
            tags: def.tags,
            state_schema,
            state_fields,
            prop_index,
        }
    }

    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            opaque: false,
            tags: Vec::new(),
            state_schema: HashMap::new(),
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let idx: usize = (((state as u32) >> f.offset) & f.mask()) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    pub fn pack_state(&self, props: &HashMap<String, String>) -> BlockState {
        if self.state_fields.is_empty() {
            return 0;
        }
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & f.mask()) << f.offset;
        }
        acc as BlockState
    }

    /// Replaces a single property in `state`. `None` if the property or the
    /// value is not part of this block's schema.
    pub fn with_prop(&self, state: BlockState, prop: &str, value: &str) -> Option<BlockState> {
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        let sel = f.values.iter().position(|s| s == value)? as u32;
        let cleared = (state as u32) & !(f.mask() << f.offset);
        Some((cleared | ((sel & f.mask()) << f.offset)) as BlockState)
    }
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

impl StateField {
    #[inline]
    fn mask(&self) -> u32 {
        if self.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.bits) - 1
        }
    }
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let mut index: HashMap<String, usize> = HashMap::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        index.insert(f.name.clone(), i);
    }
    (fields, index)
}

/// A block paired with its registered type, handed to world predicates.
#[derive(Clone, Copy, Debug)]
pub struct BlockView<'a> {
    pub block: Block,
    pub ty: &'a BlockType,
}

impl<'a> BlockView<'a> {
    #[inline]
    pub fn is_air(&self) -> bool {
        self.ty.name == AIR_NAME
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.ty.is_opaque()
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.ty.has_tag(tag)
    }

    pub fn is_natural_dirt_or_grass(&self) -> bool {
        self.has_tag(tags::NATURAL_DIRT) || self.has_tag(tags::GRASS)
    }

    pub fn is_air_or_leaves(&self) -> bool {
        self.is_air() || self.has_tag(tags::LEAVES)
    }

    pub fn prop(&self, prop: &str) -> Option<&'a str> {
        self.ty.state_prop_value(self.block.state, prop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg() -> BlockRegistry {
        BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "air"

            [[blocks]]
            name = "grass_block"
            tags = ["grass", "plant_soil"]

            [[blocks]]
            name = "oak_leaves"
            opaque = false
            tags = ["leaves"]

            [[blocks]]
            name = "oak_log"
            tags = ["logs"]
            state_schema = { axis = ["y", "x", "z"] }
        "#,
        )
        .expect("registry")
    }

    #[test]
    fn air_defaults_to_non_solid() {
        let r = reg();
        let air = r.view(Block::AIR);
        assert!(air.is_air());
        assert!(!air.is_opaque());
        assert!(air.is_air_or_leaves());
    }

    #[test]
    fn opaque_follows_solid_unless_overridden() {
        let r = reg();
        let grass = r.make_block_by_name("grass_block", None).unwrap();
        let leaves = r.make_block_by_name("oak_leaves", None).unwrap();
        assert!(r.view(grass).is_opaque());
        assert!(r.view(grass).is_natural_dirt_or_grass());
        assert!(r.get(leaves.id).unwrap().is_solid());
        assert!(!r.view(leaves).is_opaque());
        assert!(r.view(leaves).is_air_or_leaves());
    }

    #[test]
    fn with_prop_rewrites_only_target_field() {
        let r = reg();
        let log = r.make_block_by_name("oak_log", None).unwrap();
        let ty = r.get(log.id).unwrap();
        assert_eq!(ty.state_prop_value(log.state, "axis"), Some("y"));
        let x = ty.with_prop(log.state, "axis", "x").unwrap();
        let z = ty.with_prop(x, "axis", "z").unwrap();
        assert_eq!(ty.state_prop_value(x, "axis"), Some("x"));
        assert_eq!(ty.state_prop_value(z, "axis"), Some("z"));
        assert_eq!(ty.with_prop(z, "axis", "w"), None);
        assert_eq!(ty.with_prop(z, "facing", "x"), None);
    }

    #[test]
    fn prop_outlives_the_view() {
        let r = reg();
        let props = HashMap::from([("axis".to_string(), "z".to_string())]);
        let log = r.make_block_by_name("oak_log", Some(&props)).unwrap();
        let axis = r.view(log).prop("axis");
        assert_eq!(axis, Some("z"));
        assert_eq!(r.view(log).prop("facing"), None);
    }

    #[test]
    fn unknown_id_views_as_air() {
        let r = reg();
        assert!(r.view(Block::new(999, 0)).is_air());
    }

    #[test]
    fn missing_air_is_rejected() {
        let err = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "stone"
        "#,
        );
        assert!(err.is_err());
    }
}
