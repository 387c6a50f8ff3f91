use crate::type_info::TableRef;
use crate::type_info::TypeInfo;
use ir_lang::Const;
use ir_lang::DataSegment;
use ir_lang::DataType;
use ir_lang::FunctionID;
use ir_lang::GlobalID;
use ir_lang::Linkage;
use parking_lot::Mutex;

/// Thread-safe sink for the read-only data of a module. Every call appends or updates one
/// whole item under the lock
#[derive(Debug, Default)]
pub struct StaticData {
    segment: Mutex<DataSegment>,
}

impl StaticData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward-declare an internal global, to be initialized later with `set_initializer`
    pub fn create_global(&self, name: &str, ty: DataType) -> GlobalID {
        self.segment.lock().declare(name, ty, false, Linkage::Internal)
    }

    /// Like `create_global`, adding a suffix to the name if it's already taken
    pub fn create_unique_global(&self, name: &str, ty: DataType) -> GlobalID {
        let mut segment = self.segment.lock();

        let name = segment.unused_name(name);
        segment.declare(name, ty, false, Linkage::Internal)
    }

    /// Declare an exported global, or return the existing global if the symbol is taken
    pub fn create_exported_global(&self, name: &str, ty: DataType) -> Result<GlobalID, GlobalID> {
        let mut segment = self.segment.lock();

        match segment.find_by_name(name) {
            Some(existing) => Err(existing),
            None => Ok(segment.declare(name, ty, false, Linkage::Exported)),
        }
    }

    pub fn set_initializer(&self, global: GlobalID, init: Const) {
        self.segment.lock().define(global, init);
    }

    pub fn set_constant(&self, global: GlobalID) {
        self.segment.lock().set_constant(global, true);
    }

    /// Place an internal constant. Names only have to be unique within the segment, so a
    /// suffix is added if one is already in use
    pub fn place_global(&self, name: &str, init: Const) -> GlobalID {
        let mut segment = self.segment.lock();

        let name = segment.unused_name(name);
        segment.place(name, init)
    }

    /// Place a constant array. An empty array still gets a global of its own
    pub fn place_global_const_array(&self, name: &str, element_ty: DataType, items: Vec<Const>) -> GlobalID {
        self.place_global(name, Const::Array(element_ty, items))
    }

    /// Place a zero-initialized mutable global
    pub fn place_writable(&self, name: &str, ty: DataType) -> GlobalID {
        let mut segment = self.segment.lock();

        let name = segment.unused_name(name);
        let global = segment.declare(name, ty.clone(), false, Linkage::Internal);
        segment.define(global, Const::Zero(ty));
        global
    }

    pub fn string_literal(&self, s: &str) -> GlobalID {
        self.segment.lock().intern_string(s)
    }

    pub fn function_address(&self, func: FunctionID) -> Const {
        Const::FunctionAddr(func)
    }

    pub fn add_used(&self, global: GlobalID) {
        self.segment.lock().add_used(global);
    }

    /// Initialize a forward-declared type info global with a record, optionally followed by
    /// a vtable, and make it constant
    pub fn place_type_info(&self, global: GlobalID, info: &TypeInfo, vtable: Option<Const>) {
        let mut segment = self.segment.lock();

        for (table_name, table) in info.tables() {
            check_table(&segment, table_name, table);
        }

        let init = match vtable {
            Some(vtable) => Const::Struct(vec![info.to_const(), vtable]),
            None => info.to_const(),
        };

        segment.define(global, init);
        segment.set_constant(global, true);
    }

    pub fn into_segment(self) -> DataSegment {
        self.segment.into_inner()
    }
}

// counts must agree with the arrays they describe. -1 marks a table that doesn't apply
fn check_table(segment: &DataSegment, table_name: &str, table: &TableRef) {
    match table.global {
        Some(global) => {
            let len = match segment.get(global).map(|g| &g.ty) {
                Some(DataType::Array(_, len)) => *len as i32,
                Some(other) => panic!("{} table {} is not an array (found {})", table_name, global, other),
                None => panic!("{} table {} does not exist", table_name, global),
            };

            assert!(
                table.count == len || (table.count == -1 && len == 0),
                "{} table {} has {} elements but a count of {}",
                table_name,
                global,
                len,
                table.count
            );
        },

        None => assert_eq!(0, table.count, "{} table is null but has a count", table_name),
    }
}
