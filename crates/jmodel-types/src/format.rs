//! Java-like rendering of type nodes, used by emitters and in error messages.

use std::fmt;

use crate::{ClassId, Type, TypeEnv, TypeModel, WildcardBound};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameStyle {
    /// `java.util.List<java.lang.String>`
    #[default]
    Qualified,
    /// `List<String>`
    Simple,
}

pub struct TypeDisplay<'a> {
    env: &'a dyn TypeEnv,
    ty: &'a Type,
    style: NameStyle,
}

impl<'a> TypeDisplay<'a> {
    pub fn new(env: &'a dyn TypeEnv, ty: &'a Type, style: NameStyle) -> Self {
        Self { env, ty, style }
    }

    fn class_name(&self, f: &mut fmt::Formatter<'_>, id: ClassId) -> fmt::Result {
        let Some(def) = self.env.class(id) else {
            return write!(f, "<unknown class {}>", id.idx());
        };
        let name = match self.style {
            NameStyle::Qualified => def.name.as_str(),
            NameStyle::Simple => def.name.rsplit('.').next().unwrap_or(&def.name),
        };
        f.write_str(name)
    }

    fn write_type(&self, f: &mut fmt::Formatter<'_>, ty: &Type) -> fmt::Result {
        match ty {
            Type::Primitive(prim) => f.write_str(prim.keyword()),
            Type::Class(id) => self.class_name(f, *id),
            Type::Array(elem) => {
                self.write_type(f, elem)?;
                f.write_str("[]")
            }
            Type::TypeVar(id) => match self.env.type_param(*id) {
                Some(def) => f.write_str(&def.name),
                None => write!(f, "<unknown type variable {}>", id.idx()),
            },
            Type::Parameterized(p) => {
                self.class_name(f, p.erasure())?;
                f.write_str("<")?;
                for (idx, arg) in p.args().iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    self.write_type(f, arg)?;
                }
                f.write_str(">")
            }
            Type::Wildcard(WildcardBound::Unbounded) => f.write_str("?"),
            Type::Wildcard(WildcardBound::Extends(bound)) => {
                f.write_str("? extends ")?;
                self.write_type(f, bound)
            }
            Type::Wildcard(WildcardBound::Super(bound)) => {
                f.write_str("? super ")?;
                self.write_type(f, bound)
            }
        }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_type(f, self.ty)
    }
}

pub fn format_type(env: &dyn TypeEnv, ty: &Type, style: NameStyle) -> String {
    TypeDisplay::new(env, ty, style).to_string()
}

impl TypeModel {
    /// Fully-qualified rendering, usable with `{}`.
    pub fn display<'a>(&'a self, ty: &'a Type) -> TypeDisplay<'a> {
        TypeDisplay::new(self, ty, NameStyle::Qualified)
    }

    pub fn render(&self, ty: &Type, style: NameStyle) -> String {
        format_type(self, ty, style)
    }
}
