use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read shader {path}: {source}")]
    ShaderFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Shader(String),

    #[error("GL error: {0}")]
    Gl(String),
}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        RenderError::Gl(message)
    }
}
