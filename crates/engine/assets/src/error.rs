use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse glTF {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("{0} contains no skinned mesh")]
    NoSkinnedMesh(PathBuf),

    #[error("{0} contains no animations")]
    NoAnimations(PathBuf),

    #[error("mesh primitive is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, AssetError>;
