use thiserror::Error;

/// Raised when a producer's declared parameter list cannot be located or
/// is syntactically malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no parameter list found in `{producer}`")]
    MissingParameterList { producer: String },
    #[error("unterminated parameter list in `{producer}`")]
    UnterminatedParameterList { producer: String },
    #[error("empty parameter name in `{producer}`")]
    EmptyParameterName { producer: String },
    #[error("`{name}` is not a valid parameter name")]
    InvalidParameterName { name: String },
}
