use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{Bootstrap, ModelConfig};
use crate::narrow::NarrowingCache;
use crate::{ClassId, ParameterizedType, Result, Type, TypeError, TypeVarId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Fully-qualified name, e.g. `java.util.List`.
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Vec<TypeVarId>,
    /// `None` for interfaces and for the root class.
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// The generic declaration a type variable belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeVarOwner {
    Class(ClassId),
    Method { class: ClassId, name: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVarDef {
    pub name: String,
    pub owner: TypeVarOwner,
    /// Declared upper bound; `None` means the root class.
    pub upper_bound: Option<Type>,
}

/// Read access to class and type-variable metadata.
///
/// The assignability checker and the formatter only need this view, which keeps
/// them independent of how the metadata is stored.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn type_param(&self, id: TypeVarId) -> Option<&TypeVarDef>;
    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    /// The universal supertype of every reference type.
    fn root(&self) -> ClassId;

    /// Whether a parameterized type accepts its own raw type at the top level of an
    /// assignment.
    fn unchecked_raw_conversion(&self) -> bool {
        true
    }
}

/// Owns every class and type variable of one model, plus the narrowing cache.
///
/// Registration needs `&mut self`; narrowing and assignability queries work through
/// a shared reference and may run on several threads.
#[derive(Clone, Debug)]
pub struct TypeModel {
    config: ModelConfig,
    classes: Vec<ClassDef>,
    class_by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeVarDef>,
    root: ClassId,
    pub(crate) cache: NarrowingCache,
}

impl Default for TypeModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl TypeModel {
    pub fn new(config: ModelConfig) -> Self {
        let root_def = ClassDef::new(config.root_class.clone(), ClassKind::Class);
        let root = ClassId::from_raw(0);
        let mut class_by_name = HashMap::new();
        class_by_name.insert(root_def.name.clone(), root);

        let bootstrap = config.bootstrap;
        let mut model = Self {
            config,
            classes: vec![root_def],
            class_by_name,
            type_params: Vec::new(),
            root,
            cache: NarrowingCache::default(),
        };
        if bootstrap == Bootstrap::JavaLang {
            model.bootstrap_java_lang();
        }
        model
    }

    /// A model preloaded with a small `java.lang` / `java.util` skeleton.
    pub fn with_java_lang() -> Self {
        Self::new(ModelConfig::default().with_bootstrap(Bootstrap::JavaLang))
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn root_type(&self) -> Type {
        Type::Class(self.root)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_by_name.get(name).copied()
    }

    pub fn class_name(&self, id: ClassId) -> Option<&str> {
        self.classes.get(id.idx()).map(|def| def.name.as_str())
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> + '_ {
        self.classes
            .iter()
            .enumerate()
            .map(|(idx, def)| (ClassId::from_raw(idx as u32), def))
    }

    /// Reserve an id for `name` without defining the class yet.
    ///
    /// Idempotent. Needed for self-referential declarations such as
    /// `class Node<T extends Node<T>>`.
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.class_by_name.get(name) {
            return *id;
        }
        let id = ClassId::from_raw(self.classes.len() as u32);
        self.classes.push(ClassDef::new(name, ClassKind::Class));
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    /// Replace the definition behind `id`.
    ///
    /// Fails if `def.name` already belongs to another class, or if `id` has been
    /// narrowed and `def` declares a different number of type parameters.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) -> Result<()> {
        if self.classes.get(id.idx()).is_none() {
            return Err(TypeError::UnknownClass(id));
        }
        self.check_supertypes(&def)?;
        if let Some(&existing) = self.class_by_name.get(&def.name) {
            if existing != id {
                return Err(TypeError::DuplicateClass {
                    name: def.name,
                    existing,
                });
            }
        }
        self.install_class(id, def)
    }

    /// Define or redefine a class by name. Redefinition keeps the existing id.
    pub fn add_class(&mut self, def: ClassDef) -> Result<ClassId> {
        self.check_supertypes(&def)?;
        let id = self.intern_class_id(&def.name);
        self.install_class(id, def)?;
        Ok(id)
    }

    /// `def.name` must be free or already owned by `id`, and supertypes checked.
    fn install_class(&mut self, id: ClassId, def: ClassDef) -> Result<()> {
        let declared = def.type_params.len();
        if let Some(narrowed) = self.cache.narrowed_arity(id) {
            if narrowed != declared {
                return Err(TypeError::ArityChange {
                    class: def.name,
                    narrowed,
                    declared,
                });
            }
        }

        let old_name = self.classes[id.idx()].name.clone();
        if old_name != def.name {
            if self.class_by_name.get(&old_name) == Some(&id) {
                self.class_by_name.remove(&old_name);
            }
            self.class_by_name.insert(def.name.clone(), id);
        }

        tracing::debug!(
            target: "jmodel.types",
            class = %def.name,
            type_params = declared,
            "defined class"
        );
        self.classes[id.idx()] = def;
        Ok(())
    }

    fn check_supertypes(&self, def: &ClassDef) -> Result<()> {
        for sup in def.super_class.iter().chain(def.interfaces.iter()) {
            if !matches!(sup, Type::Class(_) | Type::Parameterized(_)) {
                return Err(TypeError::InvalidSupertype {
                    class: def.name.clone(),
                    ty: self.render(sup, crate::NameStyle::Qualified),
                });
            }
        }
        Ok(())
    }

    pub fn add_type_param(
        &mut self,
        name: impl Into<String>,
        owner: TypeVarOwner,
        upper_bound: Option<Type>,
    ) -> TypeVarId {
        let id = TypeVarId::from_raw(self.type_params.len() as u32);
        let def = TypeVarDef {
            name: name.into(),
            owner,
            upper_bound,
        };
        tracing::debug!(target: "jmodel.types", name = %def.name, ?id, "allocated type parameter");
        self.type_params.push(def);
        id
    }

    /// Overwrite a type parameter, e.g. to install a bound that mentions the parameter
    /// itself.
    pub fn define_type_param(&mut self, id: TypeVarId, def: TypeVarDef) -> Result<()> {
        let slot = self
            .type_params
            .get_mut(id.idx())
            .ok_or(TypeError::UnknownTypeVar(id))?;
        *slot = def;
        Ok(())
    }

    /// Convenience for declaring a generic class in one step: allocates one unbounded
    /// type parameter per entry of `params`.
    pub fn add_generic_class(
        &mut self,
        name: &str,
        kind: ClassKind,
        params: &[&str],
        super_class: Option<Type>,
        interfaces: Vec<Type>,
    ) -> Result<ClassId> {
        let id = self.intern_class_id(name);
        let type_params = params
            .iter()
            .map(|param| self.add_type_param(*param, TypeVarOwner::Class(id), None))
            .collect();
        self.define_class(
            id,
            ClassDef {
                name: name.to_string(),
                kind,
                type_params,
                super_class,
                interfaces,
            },
        )?;
        Ok(id)
    }

    /// Erasure as the language defines it: arguments are dropped and type variables
    /// are replaced by the erasure of their bound.
    pub fn erasure(&self, ty: &Type) -> Type {
        let mut seen = Vec::new();
        self.erasure_inner(ty, &mut seen)
    }

    fn erasure_inner(&self, ty: &Type, seen: &mut Vec<TypeVarId>) -> Type {
        match ty {
            Type::TypeVar(id) => {
                if seen.contains(id) {
                    return self.root_type();
                }
                seen.push(*id);
                let erased = match self.type_param(*id).and_then(|d| d.upper_bound.as_ref()) {
                    Some(bound) => self.erasure_inner(bound, seen),
                    None => self.root_type(),
                };
                seen.pop();
                erased
            }
            Type::Array(elem) => Type::Array(Box::new(self.erasure_inner(elem, seen))),
            Type::Wildcard(crate::WildcardBound::Extends(bound)) => self.erasure_inner(bound, seen),
            Type::Wildcard(_) => self.root_type(),
            other => other.erasure(),
        }
    }

    /// Build a parameterized node without checking arity. Only for declarations this
    /// module controls.
    fn parameterized_unchecked(&self, erasure: ClassId, args: Vec<Type>) -> Type {
        Type::Parameterized(self.cache.intern(ParameterizedType::new(erasure, args)))
    }

    fn set_shape(
        &mut self,
        id: ClassId,
        kind: ClassKind,
        params: &[&str],
        super_class: Option<Type>,
        interfaces: Vec<Type>,
    ) {
        let type_params = params
            .iter()
            .map(|param| self.add_type_param(*param, TypeVarOwner::Class(id), None))
            .collect();
        let def = &mut self.classes[id.idx()];
        def.kind = kind;
        def.type_params = type_params;
        def.super_class = super_class;
        def.interfaces = interfaces;
    }

    /// `Owner<T1..Tn>` applied to its own type parameters, for `extends List<E>` clauses.
    fn self_applied(&self, owner: ClassId, target: ClassId) -> Type {
        let args = self.classes[owner.idx()]
            .type_params
            .iter()
            .copied()
            .map(Type::TypeVar)
            .collect();
        self.parameterized_unchecked(target, args)
    }

    fn bootstrap_java_lang(&mut self) {
        use ClassKind::{Class, Interface};

        let root = self.root_type();

        // Reserve ids first so supertypes can reference classes declared later.
        let serializable = self.intern_class_id("java.io.Serializable");
        let cloneable = self.intern_class_id("java.lang.Cloneable");
        let char_sequence = self.intern_class_id("java.lang.CharSequence");
        let comparable = self.intern_class_id("java.lang.Comparable");
        let iterable = self.intern_class_id("java.lang.Iterable");
        let string = self.intern_class_id("java.lang.String");
        let number = self.intern_class_id("java.lang.Number");
        let integer = self.intern_class_id("java.lang.Integer");
        let long = self.intern_class_id("java.lang.Long");
        let boolean = self.intern_class_id("java.lang.Boolean");
        let collection = self.intern_class_id("java.util.Collection");
        let list = self.intern_class_id("java.util.List");
        let array_list = self.intern_class_id("java.util.ArrayList");
        let map = self.intern_class_id("java.util.Map");

        self.set_shape(serializable, Interface, &[], None, vec![]);
        self.set_shape(cloneable, Interface, &[], None, vec![]);
        self.set_shape(char_sequence, Interface, &[], None, vec![]);
        self.set_shape(comparable, Interface, &["T"], None, vec![]);
        self.set_shape(iterable, Interface, &["T"], None, vec![]);
        self.set_shape(map, Interface, &["K", "V"], None, vec![]);

        let comparable_of = |model: &TypeModel, id: ClassId| {
            model.parameterized_unchecked(comparable, vec![Type::Class(id)])
        };

        let supers = vec![
            Type::Class(serializable),
            comparable_of(self, string),
            Type::Class(char_sequence),
        ];
        self.set_shape(string, Class, &[], Some(root.clone()), supers);
        self.set_shape(
            number,
            Class,
            &[],
            Some(root.clone()),
            vec![Type::Class(serializable)],
        );
        let supers = vec![comparable_of(self, integer)];
        self.set_shape(integer, Class, &[], Some(Type::Class(number)), supers);
        let supers = vec![comparable_of(self, long)];
        self.set_shape(long, Class, &[], Some(Type::Class(number)), supers);
        let supers = vec![Type::Class(serializable), comparable_of(self, boolean)];
        self.set_shape(boolean, Class, &[], Some(root.clone()), supers);

        self.set_shape(collection, Interface, &["E"], None, vec![]);
        let supers = vec![self.self_applied(collection, iterable)];
        self.classes[collection.idx()].interfaces = supers;

        self.set_shape(list, Interface, &["E"], None, vec![]);
        let supers = vec![self.self_applied(list, collection)];
        self.classes[list.idx()].interfaces = supers;

        self.set_shape(array_list, Class, &["E"], Some(root), vec![]);
        let supers = vec![
            self.self_applied(array_list, list),
            Type::Class(cloneable),
            Type::Class(serializable),
        ];
        self.classes[array_list.idx()].interfaces = supers;

        tracing::debug!(
            target: "jmodel.types",
            root = %self.config.root_class,
            classes = self.classes.len(),
            "bootstrapped java.lang skeleton"
        );
    }
}

impl TypeEnv for TypeModel {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.idx())
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeVarDef> {
        self.type_params.get(id.idx())
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
    }

    fn root(&self) -> ClassId {
        self.root
    }

    fn unchecked_raw_conversion(&self) -> bool {
        self.config.unchecked_raw_conversion
    }
}
