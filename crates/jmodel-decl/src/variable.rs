use std::fmt;

use jmodel_types::{NameStyle, PrimitiveType, Type, TypeDisplay, TypeEnv};

use crate::ident::validate_java_identifier;
use crate::{AnnotationUse, DeclError, Modifiers, Result};

/// Opaque handle to an initializer expression owned by the expression builder.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    pub fn from_raw(raw: u32) -> Self {
        ExprId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// A local variable, parameter or field.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredVariable {
    mods: Modifiers,
    ty: Type,
    name: String,
    init: Option<ExprId>,
    /// `None` until the first annotation is added.
    annotations: Option<Vec<AnnotationUse>>,
}

fn check_name(name: &str) -> Result<()> {
    validate_java_identifier(name).map_err(|err| DeclError::InvalidIdentifier {
        name: name.to_string(),
        reason: err.reason(),
    })
}

fn check_type(ty: Option<Type>) -> Result<Type> {
    match ty {
        None => Err(DeclError::NullType),
        Some(Type::Primitive(PrimitiveType::Void)) => Err(DeclError::InvalidVariableType("void")),
        Some(Type::Wildcard(_)) => Err(DeclError::InvalidVariableType("a wildcard")),
        Some(ty) => Ok(ty),
    }
}

impl DeclaredVariable {
    pub fn new(
        mods: Modifiers,
        ty: impl Into<Option<Type>>,
        name: &str,
        init: Option<ExprId>,
    ) -> Result<Self> {
        let ty = check_type(ty.into())?;
        check_name(name)?;
        Ok(Self {
            mods,
            ty,
            name: name.to_string(),
            init,
            annotations: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        check_name(new_name)?;
        tracing::debug!(target: "jmodel.decl", from = %self.name, to = %new_name, "renamed variable");
        self.name = new_name.to_string();
        Ok(())
    }

    /// Always present.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Install a new type and hand back the previous one.
    ///
    /// Passing `None` fails with [`DeclError::NullType`] and leaves the variable
    /// unchanged.
    pub fn retype(&mut self, new_type: impl Into<Option<Type>>) -> Result<Type> {
        let new_type = check_type(new_type.into())?;
        tracing::debug!(target: "jmodel.decl", name = %self.name, "retyped variable");
        Ok(std::mem::replace(&mut self.ty, new_type))
    }

    pub fn mods(&self) -> Modifiers {
        self.mods
    }

    pub fn initializer(&self) -> Option<ExprId> {
        self.init
    }

    pub fn set_initializer(&mut self, init: impl Into<Option<ExprId>>) -> &mut Self {
        self.init = init.into();
        self
    }

    /// Append a use of `annotation` and return it for member configuration.
    pub fn annotate(&mut self, annotation: Type) -> &mut AnnotationUse {
        let annotations = self.annotations.get_or_insert_with(Vec::new);
        annotations.push(AnnotationUse::new(annotation));
        let last = annotations.len() - 1;
        &mut annotations[last]
    }

    pub fn annotations(&self) -> &[AnnotationUse] {
        self.annotations.as_deref().unwrap_or_default()
    }

    pub fn is_annotated(&self) -> bool {
        self.annotations.is_some()
    }

    /// `@Ann mods Type name`, without the initializer.
    pub fn render_signature(&self, env: &dyn TypeEnv, style: NameStyle) -> String {
        let mut parts: Vec<String> = self
            .annotations()
            .iter()
            .map(|annotation| annotation.render(env, style))
            .collect();
        parts.extend(self.mods.keywords().map(str::to_string));
        parts.push(TypeDisplay::new(env, &self.ty, style).to_string());
        parts.push(self.name.clone());
        parts.join(" ")
    }
}
