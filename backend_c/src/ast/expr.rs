use crate::ast::Type;
use crate::ir;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum GlobalName {
    ID(ir::GlobalID),

    // exported globals keep the symbol they were exported as
    Symbol(String),
}

impl GlobalName {
    pub fn of(segment: &ir::DataSegment, id: ir::GlobalID) -> Self {
        match segment.get(id) {
            Some(global) if global.linkage == ir::Linkage::Exported => GlobalName::Symbol(global.name.clone()),
            _ => GlobalName::ID(id),
        }
    }
}

impl fmt::Display for GlobalName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GlobalName::ID(id) => write!(f, "Global_{}", id.0),
            GlobalName::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum FunctionName {
    ID(ir::FunctionID),
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionName::ID(id) => write!(f, "Function_{}", id.0),
        }
    }
}

/// Constant expression usable in a static initializer
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Expr {
    LitInt(i128),
    Null,
    Global(GlobalName),
    Function(FunctionName),
    AddrOf(Box<Expr>),
    Cast(Box<Expr>, Type),

    // brace-enclosed initializer of an array or struct
    InitList(Vec<Expr>),
}

impl Expr {
    pub fn addr_of(self) -> Self {
        Expr::AddrOf(Box::new(self))
    }

    pub fn cast(self, ty: Type) -> Self {
        Expr::Cast(Box::new(self), ty)
    }

    /// All-zero value of a data type
    pub fn zero(ty: &ir::DataType) -> Self {
        match ty {
            ir::DataType::Ptr => Expr::Null,
            ir::DataType::I32 | ir::DataType::I64 | ir::DataType::U16 => Expr::LitInt(0),
            ir::DataType::Array(..) | ir::DataType::Struct(..) => Expr::InitList(vec![Expr::LitInt(0)]),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::LitInt(i) => {
                if *i == i64::MIN as i128 {
                    write!(f, "INT64_MIN")
                } else if *i < i32::MIN as i128 || *i > i32::MAX as i128 {
                    write!(f, "INT64_C({})", i)
                } else {
                    write!(f, "{}", i)
                }
            },

            Expr::Null => write!(f, "NULL"),
            Expr::Global(name) => write!(f, "{}", name),
            Expr::Function(name) => write!(f, "{}", name),
            Expr::AddrOf(expr) => write!(f, "&{}", expr),
            Expr::Cast(expr, ty) => write!(f, "(({}) {})", ty.typename(), expr),

            Expr::InitList(items) if items.is_empty() => write!(f, "{{}}"),
            Expr::InitList(items) => {
                write!(f, "{{ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, " }}")
            },
        }
    }
}
