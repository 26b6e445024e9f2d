use terraform_feature::FeatureError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("tried to build a frozen biome template")]
    FrozenTemplate,

    #[error("biome setting `{0}` was never supplied")]
    MissingSetting(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read biome pack: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse biome pack: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("biome `{biome}` refers to unknown template `{template}`")]
    UnknownTemplate { biome: String, template: String },

    #[error("`{owner}` refers to unknown block `{block}`")]
    UnknownBlock { owner: String, block: String },

    #[error("`{owner}` spawns unknown entity `{entity}` without a spawn group")]
    UnknownEntity { owner: String, entity: String },

    #[error("`{owner}` has a bad decorator: {source}")]
    BadDecorator {
        owner: String,
        #[source]
        source: FeatureError,
    },

    #[error("bad color `{0}`, expected \"#rrggbb\" or an integer")]
    BadColor(String),

    #[error("biome `{biome}`: {source}")]
    Build {
        biome: String,
        #[source]
        source: BuildError,
    },
}
