//! Construction of parameterized and wildcard types.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    ClassId, NameStyle, ParameterizedType, Result, Type, TypeEnv, TypeError, TypeModel,
    WildcardBound,
};

/// Deduplicates parameterized nodes so that narrowing the same erasure with equal
/// arguments hands back the same allocation.
#[derive(Debug, Default)]
pub(crate) struct NarrowingCache {
    interned: Mutex<HashSet<Arc<ParameterizedType>>>,
}

impl Clone for NarrowingCache {
    fn clone(&self) -> Self {
        Self {
            interned: Mutex::new(self.interned.lock().clone()),
        }
    }
}

impl NarrowingCache {
    pub(crate) fn intern(&self, candidate: ParameterizedType) -> Arc<ParameterizedType> {
        let mut interned = self.interned.lock();
        if let Some(existing) = interned.get(&candidate) {
            tracing::trace!(target: "jmodel.types", erasure = ?candidate.erasure(), "narrowing cache hit");
            return Arc::clone(existing);
        }

        let node = Arc::new(candidate);
        interned.insert(Arc::clone(&node));
        tracing::trace!(
            target: "jmodel.types",
            erasure = ?node.erasure(),
            interned = interned.len(),
            "narrowing cache miss"
        );
        node
    }

    /// Argument count of the nodes already built for `erasure`, if any.
    pub(crate) fn narrowed_arity(&self, erasure: ClassId) -> Option<usize> {
        self.interned
            .lock()
            .iter()
            .find(|node| node.erasure() == erasure)
            .map(|node| node.args().len())
    }

    pub(crate) fn len(&self) -> usize {
        self.interned.lock().len()
    }
}

impl TypeModel {
    /// Apply type arguments to a generic class.
    ///
    /// `ty` may be the raw class or an existing parameterization, in which case its
    /// erasure is re-narrowed. A non-generic class narrowed with zero arguments is
    /// returned as is.
    pub fn narrow(&self, ty: &Type, args: Vec<Type>) -> Result<Type> {
        let Some(erasure) = ty.class_id() else {
            return Err(TypeError::NotGeneric(self.render(ty, NameStyle::Qualified)));
        };
        self.narrow_class(erasure, args)
    }

    pub fn narrow_class(&self, erasure: ClassId, args: Vec<Type>) -> Result<Type> {
        let def = self.class(erasure).ok_or(TypeError::UnknownClass(erasure))?;
        let expected = def.type_params.len();
        if args.len() != expected {
            return Err(TypeError::ArityMismatch {
                class: def.name.clone(),
                expected,
                found: args.len(),
            });
        }
        if expected == 0 {
            return Ok(Type::Class(erasure));
        }

        Ok(Type::Parameterized(
            self.cache.intern(ParameterizedType::new(erasure, args)),
        ))
    }

    /// Number of distinct parameterized nodes built so far.
    pub fn interned_count(&self) -> usize {
        self.cache.len()
    }
}

impl Type {
    /// `?`
    pub fn wildcard() -> Type {
        Type::Wildcard(WildcardBound::Unbounded)
    }

    /// `? extends self`
    pub fn wildcard_extends(&self) -> Result<Type> {
        self.ensure_wildcard_target()?;
        Ok(Type::Wildcard(WildcardBound::Extends(Box::new(self.clone()))))
    }

    /// `? super self`
    pub fn wildcard_super(&self) -> Result<Type> {
        self.ensure_wildcard_target()?;
        Ok(Type::Wildcard(WildcardBound::Super(Box::new(self.clone()))))
    }

    pub fn array_of(element: Type) -> Result<Type> {
        if element.is_wildcard() {
            return Err(TypeError::WildcardOutsideArguments("an array element type"));
        }
        Ok(Type::Array(Box::new(element)))
    }

    /// `self[]`
    pub fn array(&self) -> Result<Type> {
        Type::array_of(self.clone())
    }

    fn ensure_wildcard_target(&self) -> Result<()> {
        match self {
            Type::Wildcard(bound) => Err(TypeError::InvalidWildcardTarget(
                describe_wildcard(bound).to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn describe_wildcard(bound: &WildcardBound) -> &'static str {
    match bound {
        WildcardBound::Unbounded => "?",
        WildcardBound::Extends(_) => "? extends ...",
        WildcardBound::Super(_) => "? super ...",
    }
}
