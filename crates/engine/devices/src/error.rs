use thiserror::Error;

/// Failure to parse a key, mouse button or action name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingParseError {
    #[error("unknown key name: {0}")]
    UnknownKey(String),

    #[error("unknown mouse button: {0}")]
    UnknownMouseButton(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),
}
