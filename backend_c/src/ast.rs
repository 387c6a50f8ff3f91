mod expr;
mod global;
mod ty;

pub use self::expr::*;
pub use self::global::*;
pub use self::ty::*;
use crate::ir;
use crate::Options;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use topological_sort::TopologicalSort;

/// C translation unit defining the globals of a data segment
pub struct Unit {
    functions: Vec<FunctionDecl>,
    function_ids: HashSet<ir::FunctionID>,

    global_vars: Vec<GlobalVar>,

    struct_types: HashMap<Vec<Type>, Type>,

    type_defs: HashMap<TypeDefName, StructDef>,
    type_defs_order: TopologicalSort<TypeDefName>,

    opts: Options,
}

impl Unit {
    pub fn new(opts: Options) -> Self {
        Unit {
            functions: Vec::new(),
            function_ids: HashSet::new(),
            global_vars: Vec::new(),
            struct_types: HashMap::new(),
            type_defs: HashMap::new(),
            type_defs_order: TopologicalSort::new(),
            opts,
        }
    }

    pub fn global_vars(&self) -> &[GlobalVar] {
        &self.global_vars
    }

    pub fn type_defs(&self) -> impl Iterator<Item = &StructDef> {
        self.type_defs.values()
    }

    pub fn add_segment(&mut self, segment: &ir::DataSegment, metadata: &ir::Metadata) {
        for (id, global) in segment.globals() {
            let ty = self.translate_type(&global.ty);
            let init = global
                .init
                .as_ref()
                .map(|init| self.translate_const(init, segment, metadata));

            let comment = if self.opts.comments {
                Some(comment_text(&global.name))
            } else {
                None
            };

            self.global_vars.push(GlobalVar {
                name: GlobalName::of(segment, id),
                ty,
                init,
                constant: global.constant,
                exported: global.linkage == ir::Linkage::Exported,
                used: self.opts.retain_used && segment.is_used(id),
                comment,
            });
        }
    }

    fn translate_type(&mut self, ty: &ir::DataType) -> Type {
        match ty {
            ir::DataType::I32 => Type::Int32,
            ir::DataType::I64 => Type::Int64,
            ir::DataType::U16 => Type::UInt16,
            ir::DataType::Ptr => Type::Void.constant().ptr(),
            ir::DataType::Array(element, len) => self.translate_type(element).sized_array(*len),
            ir::DataType::Struct(members) => {
                let members = members
                    .iter()
                    .map(|member| self.translate_type(member))
                    .collect();

                self.make_struct_type(members)
            },
        }
    }

    // one struct definition per distinct member list
    fn make_struct_type(&mut self, members: Vec<Type>) -> Type {
        let next_id = self.struct_types.len();

        match self.struct_types.entry(members) {
            Entry::Occupied(entry) => entry.get().clone(),

            Entry::Vacant(entry) => {
                let name = TypeDefName::Struct(next_id);

                let struct_def = StructDef {
                    decl: TypeDecl { name: name.clone() },
                    members: entry
                        .key()
                        .iter()
                        .enumerate()
                        .map(|(i, ty)| StructMember {
                            name: FieldName::ID(i),
                            ty: ty.clone(),
                        })
                        .collect(),
                    comment: None,
                };

                self.type_defs_order.insert(name.clone());
                for member in entry.key() {
                    for member_dep in member.type_def_deps() {
                        self.type_defs_order.add_dependency(member_dep, name.clone());
                    }
                }
                self.type_defs.insert(name.clone(), struct_def);

                let struct_ty = Type::DefinedType(name);
                entry.insert(struct_ty.clone());

                struct_ty
            },
        }
    }

    fn translate_const(&mut self, val: &ir::Const, segment: &ir::DataSegment, metadata: &ir::Metadata) -> Expr {
        match val {
            ir::Const::I32(i) => Expr::LitInt(*i as i128),
            ir::Const::I64(i) => Expr::LitInt(*i as i128),
            ir::Const::Null => Expr::Null,

            ir::Const::GlobalAddr(id) => Expr::Global(GlobalName::of(segment, *id)).addr_of(),

            ir::Const::FunctionAddr(id) => {
                self.declare_function(*id, metadata);

                Expr::Function(FunctionName::ID(*id)).cast(Type::Void.constant().ptr())
            },

            ir::Const::Utf16(s) => Expr::InitList(
                s.encode_utf16()
                    .map(|unit| Expr::LitInt(unit as i128))
                    .collect(),
            ),

            ir::Const::Array(_, items) | ir::Const::Struct(items) => Expr::InitList(
                items
                    .iter()
                    .map(|item| self.translate_const(item, segment, metadata))
                    .collect(),
            ),

            ir::Const::Zero(ty) => Expr::zero(ty),
        }
    }

    fn declare_function(&mut self, id: ir::FunctionID, metadata: &ir::Metadata) {
        if !self.function_ids.insert(id) {
            return;
        }

        let comment = if self.opts.comments {
            Some(comment_text(&metadata.func_desc(id)))
        } else {
            None
        };

        self.functions.push(FunctionDecl {
            name: FunctionName::ID(id),
            comment,
        });
    }

    fn ordered_type_defs(&self) -> Vec<TypeDefName> {
        let mut order = self.type_defs_order.clone();
        let mut sorted = Vec::new();

        loop {
            let mut batch = order.pop_all();
            if batch.is_empty() {
                break;
            }

            batch.sort();
            sorted.extend(batch);
        }

        if !order.is_empty() {
            panic!("generated struct types contained illegal circular references");
        }

        sorted
    }
}

fn comment_text(text: &str) -> String {
    text.escape_default().to_string().replace("*/", "* /")
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "#include <stddef.h>")?;
        writeln!(f, "#include <stdint.h>")?;
        writeln!(f)?;

        let ordered_type_defs = self.ordered_type_defs();

        for def_name in &ordered_type_defs {
            writeln!(f, "{};", self.type_defs[def_name].decl)?;
        }
        if !ordered_type_defs.is_empty() {
            writeln!(f)?;
        }

        for def_name in &ordered_type_defs {
            writeln!(f, "{};", self.type_defs[def_name])?;
            writeln!(f)?;
        }

        for func in &self.functions {
            writeln!(f, "{};", func)?;
        }
        if !self.functions.is_empty() {
            writeln!(f)?;
        }

        for global_var in &self.global_vars {
            if let Some(comment) = &global_var.comment {
                writeln!(f, "/** {} */", comment)?;
            }
            writeln!(f, "{};", global_var.decl_string())?;
        }
        writeln!(f)?;

        for global_var in &self.global_vars {
            if let Some(def) = global_var.def_string() {
                writeln!(f, "{};", def)?;
            }
        }

        Ok(())
    }
}
