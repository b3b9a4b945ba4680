use thiserror::Error;

/// The main error type for the `fibre_di` library.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Identifier \"{0}\" is not defined.")]
  UndefinedIdentifier(String),

  #[error("Identifier \"{0}\" does not contain an object definition.")]
  InvalidExtension(String),

  #[error("Identifier \"{id}\" does not resolve to a value of type {expected}.")]
  TypeMismatch { id: String, expected: &'static str },

  /// A failure raised by a definition itself. The container never produces
  /// this variant; it only carries it back to the caller of `get`.
  #[error(transparent)]
  Definition(Box<dyn std::error::Error + Send + Sync>),

  #[cfg(feature = "json")]
  #[error("Parameters must be a JSON object, got {0}")]
  InvalidParameters(&'static str),

  #[cfg(feature = "json")]
  #[error("Failed to parse parameters: {0}")]
  Json(#[from] serde_json::Error),
}

impl Error {
  /// Wraps an arbitrary error raised inside a definition.
  pub fn definition<E>(err: E) -> Self
  where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
  {
    Error::Definition(err.into())
  }

  /// Returns the identifier this error refers to, if any.
  pub fn identifier(&self) -> Option<&str> {
    match self {
      Error::UndefinedIdentifier(id) | Error::InvalidExtension(id) => Some(id.as_str()),
      Error::TypeMismatch { id, .. } => Some(id.as_str()),
      _ => None,
    }
  }
}

/// A convenience `Result` type alias for `fibre_di` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
