use crate::FunctionID;
use crate::NamePath;
use crate::Type;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ClassID(pub usize);

impl fmt::Display for ClassID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// the root of the class hierarchy has a fixed ID so every other class can refer to it
// before the system package is loaded
pub const ANY_ID: ClassID = ClassID(0);
pub const ANY_NAME: &str = "system.Any";

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Modality {
    Final,
    Open,
    Abstract,
}

/// Where a class is declared, which decides how its name is reported at runtime
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum ClassScope {
    Package,
    Nested(ClassID),
    Local,
    Anonymous,
}

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum ImplKind {
    Concrete,
    Abstract,

    /// implemented outside the compiled program (interop), callable but never dispatched
    /// through the vtable
    External,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    /// logical name, including anything needed to tell overloads apart
    pub name: String,
    pub impl_kind: ImplKind,
    pub func: Option<FunctionID>,

    /// whether subclasses may override this method. members that override a superclass
    /// method take over its vtable slot regardless of this flag
    pub overridable: bool,
}

impl MethodDef {
    pub fn concrete(name: impl Into<String>, func: FunctionID) -> Self {
        Self {
            name: name.into(),
            impl_kind: ImplKind::Concrete,
            func: Some(func),
            overridable: false,
        }
    }

    pub fn abstract_method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impl_kind: ImplKind::Abstract,
            func: None,
            overridable: true,
        }
    }

    pub fn external(name: impl Into<String>, func: FunctionID) -> Self {
        Self {
            name: name.into(),
            impl_kind: ImplKind::External,
            func: Some(func),
            overridable: false,
        }
    }

    pub fn open(mut self) -> Self {
        self.overridable = true;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.impl_kind == ImplKind::Abstract
    }
}

/// Reference to a method declared on a specific class
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: ClassID,
    pub index: usize,
}

impl MethodRef {
    pub fn new(class: ClassID, index: usize) -> Self {
        Self { class, index }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "method {} of class {}", self.index, self.class)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: NamePath,
    pub kind: ClassKind,
    pub modality: Modality,
    pub scope: ClassScope,

    /// `None` means the root class, unless this is the root itself
    pub super_class: Option<ClassID>,
    pub interfaces: Vec<ClassID>,

    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,

    /// symbol under which the address of this class's type info is exported
    pub export_as: Option<String>,
}

impl ClassDef {
    pub fn new(name: impl Into<NamePath>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            modality: Modality::Final,
            scope: ClassScope::Package,
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            export_as: None,
        }
    }

    pub fn interface(name: impl Into<NamePath>) -> Self {
        Self {
            kind: ClassKind::Interface,
            modality: Modality::Abstract,
            ..Self::new(name)
        }
    }

    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn with_scope(mut self, scope: ClassScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_super(mut self, super_class: ClassID) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn with_interface(mut self, iface: ClassID) -> Self {
        self.interfaces.push(iface);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_export(mut self, symbol: impl Into<String>) -> Self {
        self.export_as = Some(symbol.into());
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.modality == Modality::Abstract
    }

    pub fn method_index(&self, name: &str) -> Option<usize> {
        self.methods.iter().position(|m| m.name == name)
    }

    /// Fully-qualified name of a field declared on this class
    pub fn field_qualified_name(&self, index: usize) -> Option<NamePath> {
        let field = self.fields.get(index)?;
        Some(self.name.child(field.name.clone()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ClassDecl {
    Forward(NamePath),
    Def(ClassDef),
}

impl ClassDecl {
    pub fn name(&self) -> &NamePath {
        match self {
            ClassDecl::Forward(name) => name,
            ClassDecl::Def(def) => &def.name,
        }
    }
}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassDecl::Forward(name) => write!(f, "{} (forward)", name),
            ClassDecl::Def(def) => match def.kind {
                ClassKind::Class => write!(f, "class {}", def.name),
                ClassKind::Interface => write!(f, "interface {}", def.name),
            },
        }
    }
}
