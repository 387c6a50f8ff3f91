use crate::NameHash;
use ir_lang::Const;
use ir_lang::DataType;
use ir_lang::GlobalID;

/// Pointer to a placed array and the element count stored next to it
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TableRef {
    pub global: Option<GlobalID>,
    pub count: i32,
}

impl TableRef {
    pub fn placed(global: GlobalID, len: usize) -> Self {
        Self {
            global: Some(global),
            count: len as i32,
        }
    }

    /// Null pointer, zero count
    pub fn null() -> Self {
        Self {
            global: None,
            count: 0,
        }
    }

    /// A placed empty array whose count is -1, marking a table that doesn't apply to the
    /// type at all
    pub fn not_applicable(global: GlobalID) -> Self {
        Self {
            global: Some(global),
            count: -1,
        }
    }

    fn to_consts(self) -> [Const; 2] {
        [Const::global_addr_or_null(self.global), Const::I32(self.count)]
    }
}

/// The runtime's per-type record. Field order here is the binary layout the runtime reads
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeInfo {
    pub name_hash: NameHash,
    pub instance_size: i32,
    pub super_type: Option<GlobalID>,
    pub obj_offsets: TableRef,
    pub interfaces: TableRef,
    pub methods: TableRef,
    pub fields: TableRef,
    pub package_name: Option<GlobalID>,
    pub relative_name: Option<GlobalID>,

    /// only present on targets that have a writable extension record
    pub writable_type_info: Option<GlobalID>,
}

impl TypeInfo {
    pub fn tables(&self) -> [(&'static str, &TableRef); 4] {
        [
            ("object offsets", &self.obj_offsets),
            ("interfaces", &self.interfaces),
            ("methods", &self.methods),
            ("fields", &self.fields),
        ]
    }

    pub fn to_const(&self) -> Const {
        let mut members = vec![
            Const::I64(self.name_hash.as_i64()),
            Const::I32(self.instance_size),
            Const::global_addr_or_null(self.super_type),
        ];

        members.extend(self.obj_offsets.to_consts());
        members.extend(self.interfaces.to_consts());
        members.extend(self.methods.to_consts());
        members.extend(self.fields.to_consts());

        members.push(Const::global_addr_or_null(self.package_name));
        members.push(Const::global_addr_or_null(self.relative_name));

        if let Some(writable) = self.writable_type_info {
            members.push(Const::GlobalAddr(writable));
        }

        Const::Struct(members)
    }
}

/// Storage type of a type info record without a vtable
pub fn type_info_type(has_writable_type_info: bool) -> DataType {
    let mut members = vec![DataType::I64, DataType::I32, DataType::Ptr];
    for _ in 0..4 {
        members.push(DataType::Ptr);
        members.push(DataType::I32);
    }
    members.push(DataType::Ptr);
    members.push(DataType::Ptr);

    if has_writable_type_info {
        members.push(DataType::Ptr);
    }

    DataType::Struct(members)
}

/// Storage type of the mutable per-type extension: the native class object bound to the
/// type and its type adapter, both filled in at runtime
pub fn writable_type_info_type() -> DataType {
    DataType::Struct(vec![DataType::Ptr, DataType::Ptr])
}
