use crate::FunctionID;
use linked_hash_map::LinkedHashMap;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GlobalID(pub usize);

impl fmt::Display for GlobalID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Storage type of a static data item
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DataType {
    I32,
    I64,
    U16,
    Ptr,
    Array(Box<DataType>, usize),
    Struct(Vec<DataType>),
}

impl DataType {
    pub fn array(element: DataType, len: usize) -> Self {
        DataType::Array(Box::new(element), len)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U16 => write!(f, "u16"),
            DataType::Ptr => write!(f, "ptr"),
            DataType::Array(element, len) => write!(f, "[{}; {}]", element, len),
            DataType::Struct(members) => {
                write!(f, "{{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, "}}")
            },
        }
    }
}

/// Constant initializer of a static data item
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Const {
    I32(i32),
    I64(i64),
    Null,
    GlobalAddr(GlobalID),
    FunctionAddr(FunctionID),

    /// UTF-16 code units of a string, without a terminator
    Utf16(String),
    Array(DataType, Vec<Const>),
    Struct(Vec<Const>),

    /// all-zero value of any type
    Zero(DataType),
}

impl Const {
    pub fn ty(&self) -> DataType {
        match self {
            Const::I32(..) => DataType::I32,
            Const::I64(..) => DataType::I64,
            Const::Null | Const::GlobalAddr(..) | Const::FunctionAddr(..) => DataType::Ptr,
            Const::Utf16(s) => DataType::array(DataType::U16, s.encode_utf16().count()),
            Const::Array(element, items) => DataType::array(element.clone(), items.len()),
            Const::Struct(members) => DataType::Struct(members.iter().map(Const::ty).collect()),
            Const::Zero(ty) => ty.clone(),
        }
    }

    pub fn global_addr_or_null(global: Option<GlobalID>) -> Self {
        match global {
            Some(id) => Const::GlobalAddr(id),
            None => Const::Null,
        }
    }

    pub fn function_addr_or_null(func: Option<FunctionID>) -> Self {
        match func {
            Some(id) => Const::FunctionAddr(id),
            None => Const::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Const::Null)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Linkage {
    Internal,
    Exported,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Global {
    pub name: String,

    /// declared type until the global is defined, then the type of its initializer
    pub ty: DataType,
    pub init: Option<Const>,
    pub constant: bool,
    pub linkage: Linkage,
}

impl Global {
    pub fn is_defined(&self) -> bool {
        self.init.is_some()
    }
}

/// Append-only static data of a module
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DataSegment {
    globals: Vec<Global>,
    names: LinkedHashMap<String, GlobalID>,

    // globals that must be kept even if nothing refers to them
    used: Vec<GlobalID>,

    // string literal payload -> its global
    strings: LinkedHashMap<String, GlobalID>,
}

impl DataSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward-declare a global. Its initializer can be supplied later with `define`
    pub fn declare(&mut self, name: impl Into<String>, ty: DataType, constant: bool, linkage: Linkage) -> GlobalID {
        let name = name.into();

        if let Some(existing) = self.names.get(&name) {
            panic!("duplicate global {} (existing: {})", name, existing);
        }

        let id = GlobalID(self.globals.len());
        self.names.insert(name.clone(), id);
        self.globals.push(Global {
            name,
            ty,
            init: None,
            constant,
            linkage,
        });

        id
    }

    pub fn define(&mut self, id: GlobalID, init: Const) {
        let global = self
            .globals
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("global {} does not exist", id));

        assert!(global.init.is_none(), "global {} ({}) is already defined", id, global.name);

        global.ty = init.ty();
        global.init = Some(init);
    }

    pub fn set_constant(&mut self, id: GlobalID, constant: bool) {
        let global = self
            .globals
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("global {} does not exist", id));

        global.constant = constant;
    }

    /// `name` if no global uses it yet, otherwise `name` with the first free numeric suffix
    pub fn unused_name(&self, name: &str) -> String {
        if !self.names.contains_key(name) {
            return name.to_string();
        }

        (1..)
            .map(|n| format!("{}.{}", name, n))
            .find(|candidate| !self.names.contains_key(candidate))
            .unwrap()
    }

    /// Declare and define an internal constant global in one step
    pub fn place(&mut self, name: impl Into<String>, init: Const) -> GlobalID {
        let id = self.declare(name, init.ty(), true, Linkage::Internal);
        self.define(id, init);
        id
    }

    /// The constant UTF-16 payload of a string, shared by every reference to the same string
    pub fn intern_string(&mut self, s: &str) -> GlobalID {
        if let Some(existing) = self.strings.get(s) {
            return *existing;
        }

        let name = format!("kstr:{}", self.strings.len());
        let id = self.place(name, Const::Utf16(s.to_string()));
        self.strings.insert(s.to_string(), id);
        id
    }

    pub fn add_used(&mut self, id: GlobalID) {
        assert!(id.0 < self.globals.len(), "global {} does not exist", id);

        if !self.used.contains(&id) {
            self.used.push(id);
        }
    }

    pub fn is_used(&self, id: GlobalID) -> bool {
        self.used.contains(&id)
    }

    pub fn used(&self) -> &[GlobalID] {
        &self.used
    }

    pub fn get(&self, id: GlobalID) -> Option<&Global> {
        self.globals.get(id.0)
    }

    pub fn find_by_name(&self, name: &str) -> Option<GlobalID> {
        self.names.get(name).cloned()
    }

    pub fn globals(&self) -> impl Iterator<Item = (GlobalID, &Global)> {
        self.globals.iter().enumerate().map(|(i, global)| (GlobalID(i), global))
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }

    /// Globals that were declared but never given an initializer
    pub fn undefined(&self) -> Vec<GlobalID> {
        self.globals()
            .filter(|(_, global)| !global.is_defined())
            .map(|(id, _)| id)
            .collect()
    }
}
