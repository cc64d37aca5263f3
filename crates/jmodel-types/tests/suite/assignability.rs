use jmodel_types::{
    is_assignable, is_subclass, Bootstrap, ClassDef, ClassKind, ModelConfig, PrimitiveType, Type,
    TypeModel, TypeVarDef, TypeVarOwner,
};

use super::{extends, sup, Fixture};

fn array(ty: &Type) -> Type {
    ty.array().unwrap()
}

#[test]
fn primitives_only_accept_themselves() {
    let fx = Fixture::new();
    let int = Type::int();
    let long = Type::Primitive(PrimitiveType::Long);

    assert!(fx.assignable(&int, &int));
    assert!(!fx.assignable(&long, &int));
    assert!(!fx.assignable(&int, &long));
    assert!(!fx.assignable(&fx.root, &int));
    assert!(!fx.assignable(&int, &fx.root));
}

#[test]
fn no_boxing_is_modeled() {
    let model = TypeModel::with_java_lang();
    let integer = Type::Class(model.class_id("java.lang.Integer").unwrap());

    assert!(!model.is_assignable(&integer, &Type::int()));
    assert!(!model.is_assignable(&Type::int(), &integer));
}

#[test]
fn arrays_are_covariant() {
    let fx = Fixture::new();

    assert!(fx.assignable(&array(&fx.root), &array(&fx.whole)));
    assert!(fx.assignable(&array(&fx.whole), &array(&fx.part)));
    assert!(!fx.assignable(&array(&fx.whole), &array(&fx.root)));
    assert!(fx.assignable(&array(&array(&fx.whole)), &array(&array(&fx.part))));
    assert!(fx.assignable(&array(&fx.root), &array(&array(&fx.whole))));

    let covariant_bag = fx.bag_of(extends(&fx.root));
    let bag_whole = fx.bag_of(fx.whole.clone());
    assert!(fx.assignable(&array(&covariant_bag), &array(&bag_whole)));
    assert!(!fx.assignable(&array(&bag_whole), &array(&covariant_bag)));

    assert!(!fx.assignable(&fx.whole, &array(&fx.whole)));
    assert!(!fx.assignable(&array(&fx.whole), &fx.whole));
}

#[test]
fn primitive_arrays_need_identical_elements() {
    let fx = Fixture::new();
    let ints = array(&Type::int());
    let longs = array(&Type::Primitive(PrimitiveType::Long));

    assert!(fx.assignable(&ints, &ints.clone()));
    assert!(!fx.assignable(&longs, &ints));
    assert!(!fx.assignable(&array(&fx.root), &ints));
    assert!(fx.assignable(&fx.root, &ints));
}

#[test]
fn root_is_only_assignable_to_itself() {
    let fx = Fixture::new();
    for ty in [
        fx.whole.clone(),
        fx.bag.clone(),
        fx.bag_of(fx.root.clone()),
        array(&fx.root),
    ] {
        assert!(fx.assignable(&fx.root, &ty));
        assert!(!fx.assignable(&ty, &fx.root));
    }
    assert!(fx.assignable(&fx.root, &fx.root));
}

#[test]
fn class_hierarchy_is_followed() {
    let model = TypeModel::with_java_lang();
    let class = |name: &str| Type::Class(model.class_id(name).unwrap());

    assert!(model.is_assignable(&class("java.lang.Number"), &class("java.lang.Integer")));
    assert!(model.is_assignable(&class("java.io.Serializable"), &class("java.lang.Integer")));
    assert!(model.is_assignable(&class("java.lang.Comparable"), &class("java.lang.String")));
    assert!(!model.is_assignable(&class("java.lang.Integer"), &class("java.lang.Number")));
    assert!(!model.is_assignable(&class("java.lang.Long"), &class("java.lang.Integer")));

    let array_list = model.class_id("java.util.ArrayList").unwrap();
    let iterable = model.class_id("java.lang.Iterable").unwrap();
    assert!(is_subclass(&model, array_list, iterable));
    assert!(!is_subclass(&model, iterable, array_list));
    assert!(model.is_assignable(&class("java.util.Collection"), &class("java.util.ArrayList")));
}

#[test]
fn raw_supertype_accepts_parameterized_subtype() {
    let model = TypeModel::with_java_lang();
    let list = Type::Class(model.class_id("java.util.List").unwrap());
    let array_list = Type::Class(model.class_id("java.util.ArrayList").unwrap());
    let integer = Type::Class(model.class_id("java.lang.Integer").unwrap());

    let array_list_integer = model.narrow(&array_list, vec![integer.clone()]).unwrap();
    assert!(model.is_assignable(&list, &array_list_integer));
}

#[test]
fn inherited_parameterization_is_not_modeled() {
    let model = TypeModel::with_java_lang();
    let list = Type::Class(model.class_id("java.util.List").unwrap());
    let array_list = Type::Class(model.class_id("java.util.ArrayList").unwrap());
    let integer = Type::Class(model.class_id("java.lang.Integer").unwrap());

    let list_integer = model.narrow(&list, vec![integer.clone()]).unwrap();
    let array_list_integer = model.narrow(&array_list, vec![integer]).unwrap();

    assert!(!model.is_assignable(&list_integer, &array_list_integer));
    assert!(!model.is_assignable(&list_integer, &array_list));
}

#[test]
fn every_argument_position_is_checked() {
    let model = TypeModel::with_java_lang();
    let map = Type::Class(model.class_id("java.util.Map").unwrap());
    let string = Type::Class(model.class_id("java.lang.String").unwrap());
    let number = Type::Class(model.class_id("java.lang.Number").unwrap());
    let integer = Type::Class(model.class_id("java.lang.Integer").unwrap());
    let root = model.root_type();

    let target = model
        .narrow(&map, vec![string.clone(), extends(&number)])
        .unwrap();
    let source = model
        .narrow(&map, vec![string.clone(), integer.clone()])
        .unwrap();
    assert!(model.is_assignable(&target, &source));

    let target = model
        .narrow(&map, vec![extends(&root), string.clone()])
        .unwrap();
    let source = model.narrow(&map, vec![integer.clone(), integer]).unwrap();
    assert!(!model.is_assignable(&target, &source));
}

#[test]
fn unbounded_wildcard_behaves_like_extends_root() {
    let fx = Fixture::new();
    let any_bag = fx.bag_of(Type::wildcard());

    assert!(fx.assignable(&any_bag, &fx.bag_of(fx.whole.clone())));
    assert!(fx.assignable(&any_bag, &fx.bag_of(extends(&fx.part))));
    assert!(fx.assignable(&any_bag, &fx.bag_of(extends(&fx.root))));
    assert!(fx.assignable(&fx.bag_of(extends(&fx.root)), &any_bag));
    assert!(!fx.assignable(&fx.bag_of(extends(&fx.whole)), &any_bag));
    assert!(!fx.assignable(&fx.bag_of(fx.root.clone()), &any_bag));
    assert!(!fx.assignable(&any_bag, &fx.bag_of(sup(&fx.whole))));
}

#[test]
fn opposite_variance_meets_only_at_root() {
    let fx = Fixture::new();

    let covariant_root = fx.bag_of(extends(&fx.root));
    let contravariant_root = fx.bag_of(sup(&fx.root));
    assert!(fx.assignable(&covariant_root, &contravariant_root));
    assert!(fx.assignable(&contravariant_root, &covariant_root));
    assert!(fx.assignable(&fx.bag_of(Type::wildcard()), &contravariant_root));

    let covariant_whole = fx.bag_of(extends(&fx.whole));
    let contravariant_whole = fx.bag_of(sup(&fx.whole));
    assert!(!fx.assignable(&covariant_whole, &contravariant_whole));
    assert!(!fx.assignable(&contravariant_whole, &covariant_whole));
}

#[test]
fn wildcard_bounds_follow_variance() {
    let fx = Fixture::new();

    assert!(fx.assignable(&fx.bag_of(extends(&fx.whole)), &fx.bag_of(fx.part.clone())));
    assert!(!fx.assignable(&fx.bag_of(extends(&fx.part)), &fx.bag_of(fx.whole.clone())));
    assert!(fx.assignable(
        &fx.bag_of(extends(&fx.whole)),
        &fx.bag_of(extends(&fx.part))
    ));

    assert!(fx.assignable(&fx.bag_of(sup(&fx.part)), &fx.bag_of(fx.whole.clone())));
    assert!(!fx.assignable(&fx.bag_of(sup(&fx.whole)), &fx.bag_of(fx.part.clone())));
    assert!(fx.assignable(&fx.bag_of(sup(&fx.part)), &fx.bag_of(sup(&fx.whole))));
    assert!(!fx.assignable(&fx.bag_of(sup(&fx.whole)), &fx.bag_of(sup(&fx.part))));

    // A concrete argument never accepts a wildcard.
    assert!(!fx.assignable(&fx.bag_of(fx.whole.clone()), &fx.bag_of(extends(&fx.whole))));
}

#[test]
fn standalone_wildcards_are_rejected_quietly() {
    let fx = Fixture::new();
    let wildcard = extends(&fx.whole);

    assert!(!fx.assignable(&fx.root, &wildcard));
    assert!(!fx.assignable(&wildcard, &fx.part));
    assert!(fx.assignable(&wildcard, &wildcard.clone()));
}

#[test]
fn unchecked_raw_conversion_can_be_disabled() {
    let mut model = TypeModel::new(ModelConfig {
        unchecked_raw_conversion: false,
        ..ModelConfig::default()
    });
    let bag = model
        .add_generic_class("com.example.Bag", ClassKind::Class, &["T"], None, vec![])
        .unwrap();
    let bag_root = model.narrow_class(bag, vec![model.root_type()]).unwrap();

    assert!(!model.is_assignable(&bag_root, &Type::Class(bag)));
    assert!(model.is_assignable(&Type::Class(bag), &bag_root));
}

#[test]
fn type_variables_are_opaque_apart_from_their_bound() {
    let mut fx = Fixture::new();
    let bag = fx.bag.class_id().unwrap();
    let t = Type::TypeVar(
        fx.model
            .add_type_param("T", TypeVarOwner::Class(bag), None),
    );
    let u = Type::TypeVar(fx.model.add_type_param(
        "U",
        TypeVarOwner::Method {
            class: bag,
            name: "copy".to_string(),
        },
        Some(fx.whole.clone()),
    ));

    assert!(fx.assignable(&t, &t.clone()));
    assert!(fx.assignable(&fx.root, &t));
    assert!(!fx.assignable(&fx.whole, &t));
    assert!(!fx.assignable(&t, &fx.whole));
    assert!(!fx.assignable(&t, &fx.root));

    assert!(fx.assignable(&fx.whole, &u));
    assert!(!fx.assignable(&fx.part, &u));
    assert!(!fx.assignable(&u, &fx.whole));
    assert!(fx.assignable(&fx.bag_of(extends(&fx.whole)), &fx.bag_of(u.clone())));
    assert!(!fx.assignable(&fx.bag_of(fx.whole.clone()), &fx.bag_of(u)));
}

#[test]
fn cyclic_type_variable_bounds_terminate() {
    let mut fx = Fixture::new();
    let bag = fx.bag.class_id().unwrap();
    let a = fx.model.add_type_param("A", TypeVarOwner::Class(bag), None);
    let b = fx
        .model
        .add_type_param("B", TypeVarOwner::Class(bag), Some(Type::TypeVar(a)));
    fx.model.define_type_param(
        a,
        TypeVarDef {
            name: "A".to_string(),
            owner: TypeVarOwner::Class(bag),
            upper_bound: Some(Type::TypeVar(b)),
        },
    )
    .unwrap();

    assert!(!fx.assignable(&fx.whole, &Type::TypeVar(a)));
    assert!(fx.assignable(&Type::TypeVar(b), &Type::TypeVar(a)));
    assert!(fx.assignable(&fx.root, &Type::TypeVar(a)));
}

#[test]
fn self_referential_bounds_resolve_through_erasure() {
    let mut model = TypeModel::default();
    let node = model.intern_class_id("com.example.Node");
    let n = model.add_type_param("N", TypeVarOwner::Class(node), None);
    model
        .define_class(
            node,
            ClassDef {
                type_params: vec![n],
                ..ClassDef::new("com.example.Node", ClassKind::Class)
            },
        )
        .unwrap();
    let bound = model.narrow_class(node, vec![Type::TypeVar(n)]).unwrap();
    model.define_type_param(
        n,
        TypeVarDef {
            name: "N".to_string(),
            owner: TypeVarOwner::Class(node),
            upper_bound: Some(bound.clone()),
        },
    )
    .unwrap();

    assert!(model.is_assignable(&Type::Class(node), &Type::TypeVar(n)));
    assert!(model.is_assignable(&bound, &Type::TypeVar(n)));
    assert_eq!(model.erasure(&Type::TypeVar(n)), Type::Class(node));
}

#[test]
fn cyclic_class_declarations_terminate() {
    let mut model = TypeModel::new(ModelConfig::default().with_bootstrap(Bootstrap::None));
    let a = model.intern_class_id("com.example.A");
    let b = model
        .add_class(ClassDef {
            super_class: Some(Type::Class(a)),
            ..ClassDef::new("com.example.B", ClassKind::Class)
        })
        .unwrap();
    model
        .define_class(
            a,
            ClassDef {
                super_class: Some(Type::Class(b)),
                ..ClassDef::new("com.example.A", ClassKind::Class)
            },
        )
        .unwrap();
    let c = model
        .add_class(ClassDef::new("com.example.C", ClassKind::Class))
        .unwrap();

    assert!(is_assignable(&model, &Type::Class(a), &Type::Class(b)));
    assert!(!is_assignable(&model, &Type::Class(c), &Type::Class(a)));
}

#[test]
fn predicate_is_usable_across_threads() {
    let fx = Fixture::new();
    let target = fx.bag_of(extends(&fx.whole));
    let source = fx.bag_of(fx.part.clone());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert!(fx.assignable(&target, &source)));
        }
    });
}
