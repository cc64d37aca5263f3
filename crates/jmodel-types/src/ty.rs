//! Type nodes.
//!
//! Every node is an immutable value. Equality and hashing are structural, so two
//! `List<String>` nodes built independently compare equal and can be used as the
//! same map key.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identity of a class or interface inside one [`crate::TypeModel`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        ClassId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Identity of a formal type parameter inside one [`crate::TypeModel`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVarId(u32);

impl TypeVarId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        TypeVarId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeVarId({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Void,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        PrimitiveType::ALL
            .into_iter()
            .find(|prim| prim.keyword() == keyword)
    }

    /// Fully-qualified name of the wrapper class (`int` -> `java.lang.Integer`).
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
            PrimitiveType::Void => "java.lang.Void",
        }
    }
}

/// Bound of a wildcard type argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildcardBound {
    /// `?`, equivalent to `? extends <root>`.
    Unbounded,
    /// `? extends T`
    Extends(Box<Type>),
    /// `? super T`
    Super(Box<Type>),
}

/// A generic class applied to type arguments, e.g. `Map<String, ? extends Number>`.
///
/// Only the narrowing operations on [`crate::TypeModel`] build these, so `args.len()`
/// always matches the erasure's declared parameter count.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterizedType {
    erasure: ClassId,
    args: Vec<Type>,
}

impl ParameterizedType {
    pub(crate) fn new(erasure: ClassId, args: Vec<Type>) -> Self {
        Self { erasure, args }
    }

    pub fn erasure(&self) -> ClassId {
        self.erasure
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    /// A class or interface without type arguments. For generic classes this is the raw type.
    Class(ClassId),
    Array(Box<Type>),
    TypeVar(TypeVarId),
    Parameterized(Arc<ParameterizedType>),
    /// Only legal as an argument of a [`Type::Parameterized`].
    Wildcard(WildcardBound),
}

impl Type {
    pub fn int() -> Type {
        Type::Primitive(PrimitiveType::Int)
    }

    pub fn boolean() -> Type {
        Type::Primitive(PrimitiveType::Boolean)
    }

    pub fn void() -> Type {
        Type::Primitive(PrimitiveType::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard(_))
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Type::Parameterized(_))
    }

    /// Whether values of this type are references (everything except primitives and
    /// wildcards).
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::Class(_) | Type::Array(_) | Type::TypeVar(_) | Type::Parameterized(_)
        )
    }

    /// The class behind a raw or parameterized type.
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Type::Class(id) => Some(*id),
            Type::Parameterized(p) => Some(p.erasure()),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Type arguments of a parameterized type; empty for everything else.
    pub fn type_args(&self) -> &[Type] {
        match self {
            Type::Parameterized(p) => p.args(),
            _ => &[],
        }
    }

    /// Drop type arguments, recursively through array elements.
    ///
    /// Type variables and wildcards are returned unchanged; erasing those needs the
    /// declared bounds, see [`crate::TypeModel::erasure`].
    pub fn erasure(&self) -> Type {
        match self {
            Type::Parameterized(p) => Type::Class(p.erasure()),
            Type::Array(elem) => Type::Array(Box::new(elem.erasure())),
            other => other.clone(),
        }
    }
}

impl From<PrimitiveType> for Type {
    fn from(prim: PrimitiveType) -> Self {
        Type::Primitive(prim)
    }
}

impl From<ClassId> for Type {
    fn from(id: ClassId) -> Self {
        Type::Class(id)
    }
}
