use crate::ast::Expr;
use crate::ast::FunctionName;
use crate::ast::GlobalName;
use crate::ast::Type;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlobalVar {
    pub name: GlobalName,
    pub ty: Type,

    // none for globals that are only declared
    pub init: Option<Expr>,

    pub constant: bool,
    pub exported: bool,

    // keep the definition even if the linker sees no reference to it
    pub used: bool,

    pub comment: Option<String>,
}

impl GlobalVar {
    fn qualified_ty(&self) -> Type {
        if self.constant {
            self.ty.clone().constant()
        } else {
            self.ty.clone()
        }
    }

    /// Forward declaration, so initializers can refer to globals defined after them
    pub fn decl_string(&self) -> String {
        let storage = if self.exported { "extern" } else { "static" };

        format!("{} {}", storage, self.qualified_ty().to_decl_string(&self.name))
    }

    pub fn def_string(&self) -> Option<String> {
        let init = self.init.as_ref()?;

        let mut def = String::new();
        if self.used {
            def.push_str("__attribute__((used)) ");
        }
        if !self.exported {
            def.push_str("static ");
        }

        def.push_str(&self.qualified_ty().to_decl_string(&self.name));
        def.push_str(" = ");
        def.push_str(&init.to_string());

        Some(def)
    }
}

/// Declaration of a function whose address is stored in the data. Only its address is
/// taken, so the signature is a placeholder
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FunctionDecl {
    pub name: FunctionName,
    pub comment: Option<String>,
}

impl fmt::Display for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "/** {} */", comment)?;
        }

        write!(f, "extern void {}(void)", self.name)
    }
}
