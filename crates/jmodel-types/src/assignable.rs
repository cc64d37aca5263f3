//! Assignment compatibility between modeled types.
//!
//! The rules follow Java's generics: type arguments are invariant unless a wildcard
//! relaxes them, `? extends` is covariant, `? super` is contravariant, and a raw type
//! accepts any of its parameterizations. Inherited generic substitution
//! (`ArrayList<String>` viewed as `List<String>`) is not modeled: two parameterized
//! types are only compared when they share an erasure.

use std::collections::{HashSet, VecDeque};

use crate::{ClassId, Type, TypeEnv, TypeVarId, WildcardBound};

/// Whether a value of type `source` may be assigned to a variable of type `target`.
///
/// Total and side-effect free: malformed input (a standalone wildcard, an unknown
/// class) compares as not assignable instead of failing.
pub fn is_assignable(env: &dyn TypeEnv, target: &Type, source: &Type) -> bool {
    let root = Type::Class(env.root());
    let mut checker = Checker {
        env,
        root: &root,
        source_vars: Vec::new(),
    };
    checker.assignable(target, source, Position::TopLevel)
}

/// Whether `sub` is `sup` or reaches it through declared superclasses and interfaces.
/// Every class is a subclass of the root.
pub fn is_subclass(env: &dyn TypeEnv, sub: ClassId, sup: ClassId) -> bool {
    if sub == sup || sup == env.root() {
        return true;
    }

    let mut queue = VecDeque::from([sub]);
    let mut seen = HashSet::from([sub]);
    while let Some(current) = queue.pop_front() {
        let Some(def) = env.class(current) else {
            continue;
        };
        for parent in def
            .super_class
            .iter()
            .chain(def.interfaces.iter())
            .filter_map(Type::class_id)
        {
            if parent == sup {
                return true;
            }
            if seen.insert(parent) {
                queue.push_back(parent);
            }
        }
    }
    false
}

/// Unchecked raw-to-parameterized conversion is only allowed at the outermost level;
/// wildcard bounds are compared in `Nested` position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    TopLevel,
    Nested,
}

/// A type argument seen through its variance.
#[derive(Clone, Copy)]
enum Arg<'a> {
    Exact(&'a Type),
    Extends(&'a Type),
    Super(&'a Type),
}

impl<'a> Arg<'a> {
    fn of(ty: &'a Type, root: &'a Type) -> Self {
        match ty {
            Type::Wildcard(WildcardBound::Unbounded) => Arg::Extends(root),
            Type::Wildcard(WildcardBound::Extends(bound)) => Arg::Extends(bound),
            Type::Wildcard(WildcardBound::Super(bound)) => Arg::Super(bound),
            other => Arg::Exact(other),
        }
    }
}

struct Checker<'a> {
    env: &'a dyn TypeEnv,
    root: &'a Type,
    /// Type variables whose bounds are being expanded on the source side.
    source_vars: Vec<TypeVarId>,
}

impl Checker<'_> {
    fn assignable(&mut self, target: &Type, source: &Type, pos: Position) -> bool {
        if target == source {
            return true;
        }

        match (target, source) {
            (Type::Wildcard(_), _) | (_, Type::Wildcard(_)) => false,
            (Type::Primitive(_), _) | (_, Type::Primitive(_)) => false,
            (Type::Class(_), _) if target == self.root => source.is_reference(),
            (_, Type::TypeVar(var)) => self.assignable_from_type_var(target, *var, pos),
            (Type::Array(target_elem), Type::Array(source_elem)) => {
                self.assignable(target_elem, source_elem, pos)
            }
            (Type::Array(_), _) | (_, Type::Array(_)) => false,
            // Opaque: only reachable through a source variable's bounds.
            (Type::TypeVar(_), _) => false,
            (Type::Class(target_class), Type::Class(source_class)) => {
                is_subclass(self.env, *source_class, *target_class)
            }
            (Type::Class(target_class), Type::Parameterized(source)) => {
                is_subclass(self.env, source.erasure(), *target_class)
            }
            (Type::Parameterized(target), Type::Class(source_class)) => {
                pos == Position::TopLevel
                    && self.env.unchecked_raw_conversion()
                    && target.erasure() == *source_class
            }
            (Type::Parameterized(target), Type::Parameterized(source)) => {
                target.erasure() == source.erasure()
                    && target.args().len() == source.args().len()
                    && target
                        .args()
                        .iter()
                        .zip(source.args())
                        .all(|(t, s)| self.argument_accepts(t, s))
            }
        }
    }

    fn assignable_from_type_var(&mut self, target: &Type, var: TypeVarId, pos: Position) -> bool {
        if self.source_vars.contains(&var) {
            return false;
        }
        let bound = self
            .env
            .type_param(var)
            .and_then(|def| def.upper_bound.clone())
            .unwrap_or_else(|| self.root.clone());

        self.source_vars.push(var);
        let result = self.assignable(target, &bound, pos);
        self.source_vars.pop();
        result
    }

    /// Type argument containment for one position of two same-erasure types.
    fn argument_accepts(&mut self, target: &Type, source: &Type) -> bool {
        let root = self.root;
        match (Arg::of(target, root), Arg::of(source, root)) {
            (Arg::Exact(t), Arg::Exact(s)) => t == s,
            (Arg::Exact(_), _) => false,
            (Arg::Extends(upper), Arg::Exact(s)) => self.assignable(upper, s, Position::Nested),
            (Arg::Extends(upper), Arg::Extends(source_upper)) => {
                self.assignable(upper, source_upper, Position::Nested)
            }
            (Arg::Super(lower), Arg::Exact(s)) => self.assignable(s, lower, Position::Nested),
            (Arg::Super(lower), Arg::Super(source_lower)) => {
                self.assignable(source_lower, lower, Position::Nested)
            }
            // Opposite variances only meet when both bounds are the root.
            (Arg::Extends(upper), Arg::Super(lower)) | (Arg::Super(lower), Arg::Extends(upper)) => {
                upper == root && lower == root
            }
        }
    }
}
