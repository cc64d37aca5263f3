//! In-memory model of Java's nominal type system.
//!
//! A [`TypeModel`] owns classes and type variables; [`Type`] nodes are immutable
//! values that refer to them by id. Generic instantiations are built with
//! [`TypeModel::narrow`] and compared with [`is_assignable`].
//!
//! ```
//! use jmodel_types::{is_assignable, TypeModel};
//!
//! let model = TypeModel::with_java_lang();
//! let list = model.class_id("java.util.List").unwrap();
//! let integer = model.class_id("java.lang.Integer").unwrap();
//! let list_integer = model.narrow_class(list, vec![integer.into()]).unwrap();
//!
//! assert!(is_assignable(&model, &model.root_type(), &list_integer));
//! assert!(is_assignable(&model, &list.into(), &list_integer));
//! ```

#![forbid(unsafe_code)]

mod assignable;
mod config;
mod error;
mod format;
mod model;
mod narrow;
mod ty;

pub use crate::assignable::{is_assignable, is_subclass};
pub use crate::config::{Bootstrap, ConfigError, ModelConfig, DEFAULT_ROOT_CLASS};
pub use crate::error::{Result, TypeError};
pub use crate::format::{format_type, NameStyle, TypeDisplay};
pub use crate::model::{ClassDef, ClassKind, TypeEnv, TypeModel, TypeVarDef, TypeVarOwner};
pub use crate::ty::{ClassId, ParameterizedType, PrimitiveType, Type, TypeVarId, WildcardBound};

impl TypeModel {
    /// Method form of [`is_assignable`].
    pub fn is_assignable(&self, target: &Type, source: &Type) -> bool {
        is_assignable(self, target, source)
    }
}
