use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised by the quiz core and its catalog loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Contract violation by the caller: negative or fractional counts, empty poem lists.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Poem data could not be decoded or failed validation.
    #[error("poem catalog rejected: {0}")]
    Catalog(String),
}

impl GameError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
