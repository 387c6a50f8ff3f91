use crate::class::ClassID;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Semantic type of a field, as far as object layout and GC tracing are concerned
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    U8,
    I8,
    I16,
    U16,
    Char,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    USize,
    ISize,

    /// unmanaged native pointer, never followed by the collector
    Pointer(Box<Type>),

    /// reference to a heap object of a known class
    Object(ClassID),

    /// reference to a heap object of any class
    Any,
}

impl Type {
    pub fn ptr(self) -> Self {
        Type::Pointer(Box::new(self))
    }

    pub fn object(class: ClassID) -> Self {
        Type::Object(class)
    }

    /// whether a field of this type holds a reference the garbage collector must follow
    pub fn is_managed_ref(&self) -> bool {
        matches!(self, Type::Object(..) | Type::Any)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::U8 => write!(f, "u8"),
            Type::I8 => write!(f, "i8"),
            Type::I16 => write!(f, "i16"),
            Type::U16 => write!(f, "u16"),
            Type::Char => write!(f, "char"),
            Type::I32 => write!(f, "i32"),
            Type::U32 => write!(f, "u32"),
            Type::I64 => write!(f, "i64"),
            Type::U64 => write!(f, "u64"),
            Type::F32 => write!(f, "f32"),
            Type::F64 => write!(f, "f64"),
            Type::USize => write!(f, "usize"),
            Type::ISize => write!(f, "isize"),
            Type::Pointer(target) => write!(f, "^{}", target),
            Type::Object(class) => write!(f, "object {}", class),
            Type::Any => write!(f, "any"),
        }
    }
}
