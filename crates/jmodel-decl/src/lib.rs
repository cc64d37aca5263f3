//! Declarations that hold references into a [`jmodel_types::TypeModel`].

#![forbid(unsafe_code)]

mod annotation;
mod error;
mod ident;
mod modifiers;
mod variable;

pub use crate::annotation::{AnnotationUse, AnnotationValue};
pub use crate::error::{DeclError, Result};
pub use crate::ident::{is_java_identifier, validate_java_identifier, IdentifierError};
pub use crate::modifiers::Modifiers;
pub use crate::variable::{DeclaredVariable, ExprId};
