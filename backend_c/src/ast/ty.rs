use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Type {
    Void,
    UInt16,
    Int32,
    Int64,
    Pointer(Box<Type>),

    // const-qualified
    Const(Box<Type>),

    // struct generated for a data type
    DefinedType(TypeDefName),

    // fixed-size array type
    SizedArray(Box<Type>, usize),
}

impl Type {
    pub fn ptr(self) -> Self {
        Type::Pointer(Box::new(self))
    }

    pub fn sized_array(self, size: usize) -> Self {
        Type::SizedArray(Box::new(self), size)
    }

    /// Const-qualified version of this type. For arrays the qualifier applies to the elements
    pub fn constant(self) -> Self {
        match self {
            Type::SizedArray(element, size) => element.constant().sized_array(size),
            Type::Const(..) => self,
            other => Type::Const(Box::new(other)),
        }
    }

    fn build_decl_string(&self, left: &mut String, right: &mut String) {
        match self {
            Type::Void => {
                left.push_str("void");
            },
            Type::UInt16 => {
                left.push_str("uint16_t");
            },
            Type::Int32 => {
                left.push_str("int32_t");
            },
            Type::Int64 => {
                left.push_str("int64_t");
            },

            Type::Pointer(ty) => {
                ty.build_decl_string(left, right);
                left.push('*');
            },

            // a const pointer takes the qualifier after the star
            Type::Const(ty) => match ty.as_ref() {
                Type::Pointer(..) => {
                    ty.build_decl_string(left, right);
                    left.push_str(" const");
                },
                _ => {
                    left.push_str("const ");
                    ty.build_decl_string(left, right);
                },
            },

            Type::DefinedType(name) => {
                left.push_str("struct ");
                left.push_str(&name.to_string());
            },

            Type::SizedArray(el, size) => {
                el.build_decl_string(left, right);
                right.push('[');
                right.push_str(&size.to_string());
                right.push(']');
            },
        }
    }

    pub fn collect_type_def_deps(&self, deps: &mut Vec<TypeDefName>) {
        match self {
            Type::DefinedType(name) => deps.push(name.clone()),
            Type::SizedArray(element, ..) | Type::Const(element) => element.collect_type_def_deps(deps),

            // referenced by pointer or no custom types
            _ => {},
        }
    }

    pub fn type_def_deps(&self) -> Vec<TypeDefName> {
        let mut deps = Vec::new();
        self.collect_type_def_deps(&mut deps);
        deps
    }

    pub fn to_decl_string<Name>(&self, name: &Name) -> String
    where
        Name: ?Sized + fmt::Display,
    {
        let mut left = String::new();
        let mut right = String::new();

        self.build_decl_string(&mut left, &mut right);

        format!("{} {}{}", left, name, right).trim().to_string()
    }

    pub fn typename(&self) -> String {
        self.to_decl_string("")
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum TypeDefName {
    Struct(usize),
}

impl fmt::Display for TypeDefName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeDefName::Struct(id) => write!(f, "Struct_{}", id),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeDecl {
    pub name: TypeDefName,
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "struct {}", self.name)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FieldName {
    ID(usize),
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldName::ID(id) => write!(f, "field_{}", id),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructMember {
    pub name: FieldName,
    pub ty: Type,
}

/// Plain C struct with the natural layout of its members
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructDef {
    pub decl: TypeDecl,
    pub members: Vec<StructMember>,

    pub comment: Option<String>,
}

impl fmt::Display for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "/** {} */", comment)?;
        }

        writeln!(f, "{} {{", self.decl)?;
        for member in &self.members {
            writeln!(f, "    {};", member.ty.to_decl_string(&member.name))?;
        }
        write!(f, "}}")
    }
}
