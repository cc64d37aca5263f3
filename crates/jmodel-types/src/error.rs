use thiserror::Error;

use crate::{ClassId, TypeVarId};

pub type Result<T> = std::result::Result<T, TypeError>;

/// Errors raised while building types. All of them indicate a caller bug; the
/// assignability predicate itself never fails.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("`{class}` declares {expected} type parameter(s) but {found} argument(s) were supplied")]
    ArityMismatch {
        class: String,
        expected: usize,
        found: usize,
    },
    #[error("wildcards cannot be nested: `{0}` is already a wildcard")]
    InvalidWildcardTarget(String),
    #[error("a wildcard is only valid as a type argument, not as {0}")]
    WildcardOutsideArguments(&'static str),
    #[error("only classes and parameterized classes can be narrowed, got `{0}`")]
    NotGeneric(String),
    #[error("unknown class {0:?}")]
    UnknownClass(ClassId),
    #[error("unknown type parameter {0:?}")]
    UnknownTypeVar(TypeVarId),
    #[error("`{name}` is already defined as {existing:?}")]
    DuplicateClass { name: String, existing: ClassId },
    #[error("`{class}` was narrowed with {narrowed} argument(s) and cannot be redeclared with {declared} type parameter(s)")]
    ArityChange {
        class: String,
        narrowed: usize,
        declared: usize,
    },
    #[error("`{ty}` cannot be a supertype of `{class}`")]
    InvalidSupertype { class: String, ty: String },
}
