use thiserror::Error;

use crate::component::ComponentId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bar is not attached to a host surface")]
    Detached,

    #[error("Height constraint is not installed on the host surface")]
    MissingHeightConstraint,

    #[error("Unknown component: {0:?}")]
    UnknownComponent(ComponentId),

    #[error("No component is selected")]
    NoSelection,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
