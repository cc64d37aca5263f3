use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeclError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeclError {
    #[error("`{name}` is not a valid Java identifier: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },
    #[error("a variable must have a type")]
    NullType,
    #[error("{0} cannot be the type of a variable")]
    InvalidVariableType(&'static str),
}
