use crate::dep_sort::sort_classes;
use crate::dep_sort::ClassGraphError;
use crate::*;

fn root(metadata: &mut Metadata) -> ClassID {
    let to_string = metadata.insert_func(Some(NamePath::parse("system.Any.toString")));
    let hash_code = metadata.insert_func(Some(NamePath::parse("system.Any.hashCode")));

    metadata.define_class(
        ClassDef::new(ANY_NAME)
            .with_modality(Modality::Open)
            .with_method(MethodDef::concrete("toString()", to_string).open())
            .with_method(MethodDef::concrete("hashCode()", hash_code).open()),
    )
}

#[test]
fn root_has_fixed_id() {
    let mut metadata = Metadata::new();
    let foo = metadata.declare_class(&NamePath::parse("a.Foo"));
    let any = root(&mut metadata);

    assert_eq!(ANY_ID, any);
    assert_ne!(ANY_ID, foo);
    assert_eq!(foo, metadata.declare_class(&NamePath::parse("a.Foo")));
}

#[test]
#[should_panic]
fn redefining_class_panics() {
    let mut metadata = Metadata::new();
    metadata.define_class(ClassDef::new("a.Foo"));
    metadata.define_class(ClassDef::new("a.Foo"));
}

#[test]
fn vtable_overrides_replace_in_place() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let base_run = metadata.insert_func(None);
    let base_stop = metadata.insert_func(None);
    let base = metadata.define_class(
        ClassDef::new("a.Base")
            .with_modality(Modality::Open)
            .with_method(MethodDef::concrete("run()", base_run).open())
            .with_method(MethodDef::concrete("stop()", base_stop).open())
            .with_method(MethodDef::concrete("helper()", base_stop)),
    );

    let derived_stop = metadata.insert_func(None);
    let derived_extra = metadata.insert_func(None);
    let derived = metadata.define_class(
        ClassDef::new("a.Derived")
            .with_super(base)
            .with_method(MethodDef::concrete("extra()", derived_extra).open())
            .with_method(MethodDef::concrete("stop()", derived_stop)),
    );

    let names: Vec<_> = metadata
        .vtable_entries(derived)
        .into_iter()
        .map(|entry| entry.overridden_name)
        .collect();
    assert_eq!(vec!["toString()", "hashCode()", "run()", "stop()", "extra()"], names);

    let entries = metadata.vtable_entries(derived);
    assert_eq!(MethodRef::new(base, 0), entries[2].implementation);
    assert_eq!(MethodRef::new(derived, 1), entries[3].implementation);
    assert_eq!(MethodRef::new(ANY_ID, 0), entries[0].implementation);
}

#[test]
fn interface_members_resolve_through_class_chain() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let describe_default = metadata.insert_func(None);
    let named = metadata.define_class(
        ClassDef::interface("a.Named")
            .with_method(MethodDef::abstract_method("name()"))
            .with_method(MethodDef::concrete("describe()", describe_default).open()),
    );

    let base_name = metadata.insert_func(None);
    let base = metadata.define_class(
        ClassDef::new("a.Base")
            .with_modality(Modality::Open)
            .with_method(MethodDef::concrete("name()", base_name)),
    );

    let derived = metadata.define_class(ClassDef::new("a.Derived").with_super(base).with_interface(named));

    let entries = metadata.method_table_entries(derived);
    let find = |name: &str| {
        entries
            .iter()
            .find(|entry| entry.overridden_name == name)
            .map(|entry| entry.implementation)
    };

    assert_eq!(Some(MethodRef::new(base, 0)), find("name()"));
    assert_eq!(Some(MethodRef::new(named, 1)), find("describe()"));
    assert_eq!(Some(MethodRef::new(ANY_ID, 1)), find("hashCode()"));
    assert_eq!(4, entries.len());
}

#[test]
fn implemented_interfaces_are_transitive_and_distinct() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let closeable = metadata.define_class(ClassDef::interface("a.Closeable"));
    let stream = metadata.define_class(ClassDef::interface("a.Stream").with_interface(closeable));
    let sized = metadata.define_class(ClassDef::interface("a.Sized"));

    let base = metadata.define_class(
        ClassDef::new("a.Base")
            .with_modality(Modality::Open)
            .with_interface(closeable)
            .with_interface(sized),
    );
    let file = metadata.define_class(ClassDef::new("a.File").with_super(base).with_interface(stream));

    assert_eq!(vec![stream, closeable, sized], metadata.implemented_interfaces(file));
    assert_eq!(vec![closeable], metadata.implemented_interfaces(stream));
    assert_eq!(vec![ANY_ID, base, file], metadata.class_hierarchy(file));
}

#[test]
fn sort_puts_supertypes_first() {
    let mut metadata = Metadata::new();

    // declared before their supertypes
    let leaf_name = NamePath::parse("a.Leaf");
    let mid_name = NamePath::parse("a.Mid");
    let leaf = metadata.declare_class(&leaf_name);
    let mid = metadata.declare_class(&mid_name);

    metadata.define_class(ClassDef::new(leaf_name).with_super(mid));
    metadata.define_class(ClassDef::new(mid_name).with_modality(Modality::Open));
    root(&mut metadata);

    let sorted = sort_classes(&metadata).unwrap();
    let pos = |id| sorted.iter().position(|c| *c == id).unwrap();

    assert_eq!(3, sorted.len());
    assert!(pos(ANY_ID) < pos(mid));
    assert!(pos(mid) < pos(leaf));
}

#[test]
fn sort_rejects_broken_graphs() {
    let mut metadata = Metadata::new();
    assert_eq!(Err(ClassGraphError::MissingRoot), sort_classes(&metadata));

    root(&mut metadata);
    let missing = metadata.declare_class(&NamePath::parse("a.Missing"));
    metadata.define_class(ClassDef::new("a.Foo").with_super(missing));

    match sort_classes(&metadata) {
        Err(ClassGraphError::Unresolved { class, reference }) => {
            assert_eq!("a.Foo", class.to_string());
            assert_eq!("a.Missing", reference);
        },
        other => panic!("expected unresolved class, got {:?}", other),
    }
}

#[test]
fn sort_rejects_cycles() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let a_name = NamePath::parse("a.A");
    let b_name = NamePath::parse("a.B");
    let a = metadata.declare_class(&a_name);
    let b = metadata.declare_class(&b_name);
    metadata.define_class(ClassDef::interface(a_name).with_interface(b));
    metadata.define_class(ClassDef::interface(b_name).with_interface(a));

    match sort_classes(&metadata) {
        Err(ClassGraphError::Circular { .. }) => {},
        other => panic!("expected circular inheritance, got {:?}", other),
    }
}

#[test]
fn sort_rejects_class_as_interface() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let base = metadata.define_class(ClassDef::new("a.Base"));
    metadata.define_class(ClassDef::new("a.Foo").with_interface(base));

    match sort_classes(&metadata) {
        Err(ClassGraphError::NotAnInterface { iface, .. }) => assert_eq!("a.Base", iface.to_string()),
        other => panic!("expected not an interface, got {:?}", other),
    }
}

#[test]
fn sort_rejects_circular_nesting() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let a_name = NamePath::parse("a.A");
    let b_name = NamePath::parse("a.B");
    let a = metadata.declare_class(&a_name);
    let b = metadata.declare_class(&b_name);
    metadata.define_class(ClassDef::new(a_name).with_scope(ClassScope::Nested(b)));
    metadata.define_class(ClassDef::new(b_name).with_scope(ClassScope::Nested(a)));

    match sort_classes(&metadata) {
        Err(ClassGraphError::Circular { class }) => assert_eq!("a.A", class.to_string()),
        other => panic!("expected circular nesting, got {:?}", other),
    }

    let mut metadata = Metadata::new();
    root(&mut metadata);

    let self_name = NamePath::parse("a.Self");
    let own = metadata.declare_class(&self_name);
    metadata.define_class(ClassDef::new(self_name).with_scope(ClassScope::Nested(own)));

    assert!(matches!(sort_classes(&metadata), Err(ClassGraphError::Circular { .. })));
}

#[test]
fn sort_accepts_nested_chains() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let outer = metadata.define_class(ClassDef::new("p.Outer"));
    let middle = metadata.define_class(ClassDef::new("p.Outer.Middle").with_scope(ClassScope::Nested(outer)));
    metadata.define_class(ClassDef::new("p.Outer.Middle.Inner").with_scope(ClassScope::Nested(middle)));

    assert_eq!(4, sort_classes(&metadata).unwrap().len());
}

#[test]
fn sort_rejects_dangling_value_boxes() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let int_box = metadata.define_class(ClassDef::new("a.IntBox"));
    metadata.register_value_box(int_box, ClassID(999));

    match sort_classes(&metadata) {
        Err(ClassGraphError::Unresolved { class, reference }) => {
            assert_eq!("a.IntBox", class.to_string());
            assert_eq!("#999", reference);
        },
        other => panic!("expected unresolved value class, got {:?}", other),
    }

    let mut metadata = Metadata::new();
    root(&mut metadata);

    let int = metadata.define_class(ClassDef::new("a.Int"));
    metadata.register_value_box(ClassID(999), int);

    match sort_classes(&metadata) {
        Err(ClassGraphError::Unresolved { class, reference }) => {
            assert_eq!("a.Int", class.to_string());
            assert_eq!("#999", reference);
        },
        other => panic!("expected unresolved box class, got {:?}", other),
    }
}

#[test]
fn sort_rejects_duplicate_class_names() {
    let mut metadata = Metadata::new();
    root(&mut metadata);
    let first = metadata.define_class(ClassDef::new("a.Dup"));

    // the placeholder takes the same ID as the first definition, so the second definition
    // gets a fresh one when the two are merged
    let mut other = Metadata::new();
    other.declare_class(&NamePath::parse("a.Placeholder"));
    let second = other.define_class(ClassDef::new("a.Dup"));
    assert_ne!(first, second);

    metadata.extend(&other);

    match sort_classes(&metadata) {
        Err(ClassGraphError::DuplicateClassName { name, first: a, second: b }) => {
            assert_eq!("a.Dup", name.to_string());
            assert_eq!((first, second), (a, b));
        },
        other => panic!("expected duplicate class name, got {:?}", other),
    }
}

#[test]
fn sort_rejects_interface_supertypes() {
    let mut metadata = Metadata::new();
    root(&mut metadata);

    let base = metadata.define_class(ClassDef::new("a.Base").with_field("x", Type::I32));
    metadata.define_class(ClassDef::interface("a.Shape").with_super(base));

    match sort_classes(&metadata) {
        Err(ClassGraphError::InterfaceHasSupertype { iface, super_class }) => {
            assert_eq!("a.Shape", iface.to_string());
            assert_eq!("a.Base", super_class.to_string());
        },
        other => panic!("expected interface supertype error, got {:?}", other),
    }
}

#[test]
fn strings_are_interned() {
    let mut segment = DataSegment::new();

    let a = segment.intern_string("hello");
    let b = segment.intern_string("hello");
    let c = segment.intern_string("world");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(2, segment.len());
    assert_eq!(DataType::array(DataType::U16, 5), segment.get(a).unwrap().ty);
}

#[test]
fn forward_declared_globals_take_initializer_type() {
    let mut segment = DataSegment::new();

    let decl = segment.declare("ktype:a.Foo", DataType::Ptr, true, Linkage::Internal);
    assert_eq!(vec![decl], segment.undefined());

    segment.define(decl, Const::Struct(vec![Const::I64(1), Const::Null]));
    assert!(segment.undefined().is_empty());
    assert_eq!(DataType::Struct(vec![DataType::I64, DataType::Ptr]), segment.get(decl).unwrap().ty);
    assert_eq!(Some(decl), segment.find_by_name("ktype:a.Foo"));
}

#[test]
fn segment_text_names_globals_and_functions() {
    let mut metadata = Metadata::new();
    let func = metadata.insert_func(Some(NamePath::parse("a.Foo.run")));

    let mut segment = DataSegment::new();
    let methods = segment.place(
        "kmethods:a.Foo",
        Const::Array(DataType::Ptr, vec![Const::FunctionAddr(func), Const::Null]),
    );
    let export = segment.declare("Foo_type", DataType::Ptr, true, Linkage::Exported);
    segment.define(export, Const::GlobalAddr(methods));
    segment.add_used(export);

    let mut text = String::new();
    SegmentFormatter::new(&segment)
        .with_metadata(&metadata)
        .format_segment(&mut text)
        .unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!("   const @0 kmethods:a.Foo: [ptr; 2] = [&a.Foo.run, null]", lines[0]);
    assert_eq!("  export @1 Foo_type: ptr = &kmethods:a.Foo", lines[1]);
    assert_eq!("    used Foo_type", lines[2]);
}

#[test]
fn metadata_loads_from_json() {
    let mut metadata = Metadata::new();
    root(&mut metadata);
    let foo = metadata.define_class(ClassDef::new("a.Foo").with_field("x", Type::I32));
    metadata.register_value_box(foo, ANY_ID);

    let json = serde_json::to_string(&metadata).unwrap();
    let loaded: Metadata = serde_json::from_str(&json).unwrap();

    assert_eq!(metadata.class_def(foo), loaded.class_def(foo));
    assert_eq!(Some(ANY_ID), loaded.find_boxed_value_class(foo));
}
