use crate::ClassDecl;
use crate::ClassDef;
use crate::ClassID;
use crate::FunctionDecl;
use crate::FunctionID;
use crate::MethodDef;
use crate::MethodRef;
use crate::NamePath;
use crate::ANY_ID;
use crate::ANY_NAME;
use linked_hash_map::LinkedHashMap;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    classes: LinkedHashMap<ClassID, ClassDecl>,
    functions: LinkedHashMap<FunctionID, FunctionDecl>,

    // box class -> boxed value class
    value_boxes: LinkedHashMap<ClassID, ClassID>,
}

impl Metadata {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn extend(&mut self, other: &Metadata) {
        for (id, decl) in &other.classes {
            match (self.classes.get(id), decl) {
                (Some(ClassDecl::Def(existing)), ClassDecl::Def(_)) => {
                    panic!(
                        "duplicate class ID {} in metadata (new: {}, existing: {})",
                        id, decl, existing.name,
                    );
                },

                // a forward decl never replaces what we already know
                (Some(_), ClassDecl::Forward(..)) => {},

                _ => {
                    self.classes.insert(*id, decl.clone());
                },
            }
        }

        for (id, func_decl) in &other.functions {
            if let Some(existing) = self.functions.get(id) {
                let name = func_decl
                    .global_name
                    .as_ref()
                    .map(NamePath::to_string)
                    .unwrap_or_else(|| "<unnamed>".to_string());
                let existing_name = existing
                    .global_name
                    .as_ref()
                    .map(NamePath::to_string)
                    .unwrap_or_else(|| "<unnamed>".to_string());

                panic!(
                    "duplicate function ID {} in metadata (new: {}, existing: {})",
                    id, name, existing_name
                );
            }
            self.functions.insert(*id, func_decl.clone());
        }

        for (box_class, value_class) in &other.value_boxes {
            if !self.value_boxes.contains_key(box_class) {
                self.value_boxes.insert(*box_class, *value_class);
            }
        }
    }

    fn next_class_id(&self) -> ClassID {
        (0..)
            .map(ClassID)
            .find(|id| !self.classes.contains_key(id) && *id != ANY_ID)
            .unwrap()
    }

    pub fn declare_class(&mut self, name: &NamePath) -> ClassID {
        // the root is referenced by every class without an explicit supertype, so it gets
        // the same ID no matter when it's declared
        if *name == NamePath::parse(ANY_NAME) {
            if !self.classes.contains_key(&ANY_ID) {
                self.classes.insert(ANY_ID, ClassDecl::Forward(name.clone()));
            }
            return ANY_ID;
        }

        if let Some(existing) = self.find_class(name) {
            return existing;
        }

        let id = self.next_class_id();
        self.classes.insert(id, ClassDecl::Forward(name.clone()));
        id
    }

    pub fn define_class(&mut self, class_def: ClassDef) -> ClassID {
        let id = self.declare_class(&class_def.name);

        if let Some(ClassDecl::Def(existing)) = self.classes.get(&id) {
            panic!("duplicate definition of class {} ({})", existing.name, id);
        }

        self.classes.insert(id, ClassDecl::Def(class_def));
        id
    }

    pub fn find_class(&self, name: &NamePath) -> Option<ClassID> {
        self.classes
            .iter()
            .find_map(|(id, decl)| if decl.name() == name { Some(*id) } else { None })
    }

    pub fn get_class_decl(&self, id: ClassID) -> Option<&ClassDecl> {
        self.classes.get(&id)
    }

    pub fn get_class_def(&self, id: ClassID) -> Option<&ClassDef> {
        match self.classes.get(&id)? {
            ClassDecl::Def(def) => Some(def),
            ClassDecl::Forward(..) => None,
        }
    }

    /// Like `get_class_def`, for callers working on an already validated class graph
    pub fn class_def(&self, id: ClassID) -> &ClassDef {
        match self.classes.get(&id) {
            Some(ClassDecl::Def(def)) => def,
            Some(ClassDecl::Forward(name)) => panic!("class {} ({}) is not defined", name, id),
            None => panic!("class {} does not exist", id),
        }
    }

    pub fn class_name(&self, id: ClassID) -> Option<&NamePath> {
        self.classes.get(&id).map(ClassDecl::name)
    }

    pub fn class_defs(&self) -> impl Iterator<Item = (ClassID, &ClassDef)> {
        self.classes.iter().filter_map(|(id, decl)| match decl {
            ClassDecl::Def(def) => Some((*id, def)),
            ClassDecl::Forward(..) => None,
        })
    }

    pub fn get_method(&self, method: MethodRef) -> Option<&MethodDef> {
        self.get_class_def(method.class)?.methods.get(method.index)
    }

    /// Qualified name of a method, for diagnostics
    pub fn method_desc(&self, method: MethodRef) -> String {
        match (self.class_name(method.class), self.get_method(method)) {
            (Some(class_name), Some(method_def)) => format!("{}.{}", class_name, method_def.name),
            (Some(class_name), None) => format!("{}.<method {}>", class_name, method.index),
            _ => method.to_string(),
        }
    }

    pub fn insert_func(&mut self, global_name: Option<NamePath>) -> FunctionID {
        let id = (0..)
            .map(FunctionID)
            .find(|id| !self.functions.contains_key(id))
            .unwrap();

        self.functions.insert(id, FunctionDecl { global_name });
        id
    }

    pub fn get_function(&self, id: FunctionID) -> Option<&FunctionDecl> {
        self.functions.get(&id)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionID, &FunctionDecl)> {
        self.functions.iter().map(|(id, decl)| (*id, decl))
    }

    pub fn func_desc(&self, id: FunctionID) -> String {
        match self.functions.get(&id).and_then(|decl| decl.global_name.as_ref()) {
            Some(name) => name.to_string(),
            None => id.to_string(),
        }
    }

    pub fn register_value_box(&mut self, box_class: ClassID, value_class: ClassID) {
        if let Some(existing) = self.value_boxes.get(&box_class) {
            assert_eq!(
                *existing, value_class,
                "box class {} is already registered for value class {}",
                box_class, existing
            );
        }

        self.value_boxes.insert(box_class, value_class);
    }

    /// Registered (box class, value class) pairs
    pub fn value_boxes(&self) -> impl Iterator<Item = (ClassID, ClassID)> + '_ {
        self.value_boxes.iter().map(|(box_class, value_class)| (*box_class, *value_class))
    }

    /// The value class boxed by `box_class`, if it's a registered box
    pub fn find_boxed_value_class(&self, box_class: ClassID) -> Option<ClassID> {
        self.value_boxes.get(&box_class).cloned()
    }
}
