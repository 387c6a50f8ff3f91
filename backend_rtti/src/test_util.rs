use crate::generate_module;
use crate::Options;
use crate::RttiModule;
use crate::TypeInfo;
use ir_lang::ClassID;
use ir_lang::ClassDef;
use ir_lang::Const;
use ir_lang::GlobalID;
use ir_lang::Metadata;
use ir_lang::MethodDef;
use ir_lang::Modality;
use ir_lang::NamePath;
use ir_lang::ANY_NAME;
use target_desc::TargetFacts;

pub const TO_STRING: &str = "toString()";
pub const HASH_CODE: &str = "hashCode()";
pub const EQUALS: &str = "equals(system.Any)";

/// Metadata containing just the root class, with three overridable members
pub fn metadata_with_root() -> Metadata {
    let mut metadata = Metadata::new();

    let mut root = ClassDef::new(ANY_NAME).with_modality(Modality::Open);
    for name in [TO_STRING, HASH_CODE, EQUALS] {
        let func = metadata.insert_func(Some(NamePath::parse(ANY_NAME).child(name)));
        root = root.with_method(MethodDef::concrete(name, func).open());
    }

    metadata.define_class(root);
    metadata
}

pub fn func(metadata: &mut Metadata, name: &str) -> ir_lang::FunctionID {
    metadata.insert_func(Some(NamePath::parse(name)))
}

pub fn generate(metadata: &Metadata, target: &(impl TargetFacts + Sync)) -> RttiModule {
    generate_module(metadata, target, &Options::default())
        .unwrap_or_else(|err| panic!("type info generation failed: {}", err))
}

pub fn type_info(module: &RttiModule, class: ClassID) -> TypeInfo {
    module
        .type_infos
        .get(class)
        .and_then(|entry| entry.info)
        .unwrap_or_else(|| panic!("no type info generated for class {}", class))
}

/// Initializer of the record global of a class
pub fn record_const(module: &RttiModule, class: ClassID) -> &Const {
    let global = module.type_infos.global_of(class).unwrap();
    global_init(module, global)
}

pub fn global_init(module: &RttiModule, global: GlobalID) -> &Const {
    module
        .segment
        .get(global)
        .and_then(|g| g.init.as_ref())
        .unwrap_or_else(|| panic!("global {} is not defined", global))
}

/// Items of a placed array, or nothing for a null table
pub fn array_items(module: &RttiModule, global: Option<GlobalID>) -> Vec<Const> {
    match global.map(|global| global_init(module, global)) {
        Some(Const::Array(_, items)) => items.clone(),
        Some(other) => panic!("expected an array, found {:?}", other),
        None => Vec::new(),
    }
}

/// Name hashes stored in a placed method or field table
pub fn table_hashes(module: &RttiModule, global: Option<GlobalID>) -> Vec<u64> {
    array_items(module, global)
        .into_iter()
        .map(|record| match record {
            Const::Struct(members) => match members[0] {
                Const::I64(hash) => hash as u64,
                ref other => panic!("expected a hash, found {:?}", other),
            },
            other => panic!("expected a table record, found {:?}", other),
        })
        .collect()
}

/// Contents of an interned string global
pub fn string_of(module: &RttiModule, global: Option<GlobalID>) -> Option<String> {
    match global_init(module, global?) {
        Const::Utf16(s) => Some(s.clone()),
        other => panic!("expected a string, found {:?}", other),
    }
}
