use crate::ClassLayout;
use crate::NameHash;
use crate::RttiError;
use crate::RttiResult;
use common::TracedError;
use ir_lang::ClassDef;
use ir_lang::ClassID;
use ir_lang::Const;
use ir_lang::DataType;
use ir_lang::DispatchEntry;
use ir_lang::FunctionID;
use ir_lang::ImplKind;
use ir_lang::Metadata;
use ir_lang::MethodRef;
use ir_lang::NamePath;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldRecord {
    pub name_hash: NameHash,
    pub offset: i32,
}

impl FieldRecord {
    pub fn data_type() -> DataType {
        DataType::Struct(vec![DataType::I64, DataType::I32])
    }

    pub fn to_const(&self) -> Const {
        Const::Struct(vec![Const::I64(self.name_hash.as_i64()), Const::I32(self.offset)])
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodRecord {
    pub name_hash: NameHash,
    pub name: String,
    pub implementation: MethodRef,

    /// `None` for abstract members
    pub entry_point: Option<FunctionID>,
}

impl MethodRecord {
    pub fn data_type() -> DataType {
        DataType::Struct(vec![DataType::I64, DataType::Ptr])
    }

    pub fn to_const(&self) -> Const {
        Const::Struct(vec![
            Const::I64(self.name_hash.as_i64()),
            Const::function_addr_or_null(self.entry_point),
        ])
    }
}

/// Field table of a class: its own fields paired with their offsets, sorted by the hash of
/// the qualified field name
pub fn field_table(def: &ClassDef, layout: &ClassLayout) -> Vec<FieldRecord> {
    let mut records: Vec<_> = layout
        .field_offsets
        .iter()
        .enumerate()
        .filter_map(|(index, offset)| {
            // qualified, since an overriding property can declare a field with the same name
            let qualified_name = def.field_qualified_name(index)?;

            Some(FieldRecord {
                name_hash: NameHash::of(&qualified_name.to_string()),
                offset: *offset,
            })
        })
        .collect();

    records.sort_by_key(|record| record.name_hash);
    records
}

pub fn find_field(table: &[FieldRecord], name_hash: NameHash) -> Option<i32> {
    let index = table
        .binary_search_by_key(&name_hash, |record| record.name_hash)
        .ok()?;

    Some(table[index].offset)
}

pub fn find_method(table: &[MethodRecord], name_hash: NameHash) -> Option<&MethodRecord> {
    let index = table
        .binary_search_by_key(&name_hash, |record| record.name_hash)
        .ok()?;

    Some(&table[index])
}

/// Entry point to store for an implementing member: null for abstract members, otherwise
/// its code address
pub fn method_entry_point(metadata: &Metadata, implementation: MethodRef) -> RttiResult<Option<FunctionID>> {
    let method = metadata.get_method(implementation).ok_or_else(|| {
        TracedError::trace(RttiError::UnknownMethod {
            method: metadata.method_desc(implementation),
        })
    })?;

    match method.impl_kind {
        ImplKind::Abstract => Ok(None),

        ImplKind::Concrete | ImplKind::External => match method.func {
            Some(func) => Ok(Some(func)),
            None => Err(TracedError::trace(RttiError::MissingEntryPoint {
                method: metadata.method_desc(implementation),
            })),
        },
    }
}

pub fn method_record(metadata: &Metadata, entry: &DispatchEntry) -> RttiResult<MethodRecord> {
    Ok(MethodRecord {
        name_hash: NameHash::of(&entry.overridden_name),
        name: entry.overridden_name.clone(),
        implementation: entry.implementation,
        entry_point: method_entry_point(metadata, entry.implementation)?,
    })
}

/// Method table of a class, sorted by name hash. Abstract classes have an empty table
pub fn method_table(metadata: &Metadata, class: ClassID) -> RttiResult<Vec<MethodRecord>> {
    let def = metadata.class_def(class);
    if def.is_abstract() {
        return Ok(Vec::new());
    }

    let records = metadata
        .method_table_entries(class)
        .iter()
        .map(|entry| method_record(metadata, entry))
        .collect::<RttiResult<Vec<_>>>()?;

    sort_distinct(metadata, &def.name, records)
}

/// Sort method records by hash, failing if two of them share a hash
pub fn sort_distinct(
    metadata: &Metadata,
    class_name: &NamePath,
    mut records: Vec<MethodRecord>,
) -> RttiResult<Vec<MethodRecord>> {
    records.sort_by_key(|record| record.name_hash);

    for pair in records.windows(2) {
        if pair[0].name_hash == pair[1].name_hash {
            return Err(TracedError::trace(RttiError::DuplicateMethodHash {
                class: class_name.clone(),
                name: pair[1].name.clone(),
                hash: pair[1].name_hash,
                first: format!("{} (implemented by {})", pair[0].name, metadata.method_desc(pair[0].implementation)),
                second: format!("{} (implemented by {})", pair[1].name, metadata.method_desc(pair[1].implementation)),
            }));
        }
    }

    Ok(records)
}
