#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("unknown block `{0}`")]
    UnknownBlock(String),

    #[error("block `{block}` has no `{prop}` state value `{value}`")]
    MissingState {
        block: String,
        prop: &'static str,
        value: &'static str,
    },

    #[error("invalid {feature} config: {reason}")]
    InvalidConfig {
        feature: &'static str,
        reason: String,
    },

    #[error("failed to read features: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse features: {0}")]
    Parse(#[from] toml::de::Error),
}
