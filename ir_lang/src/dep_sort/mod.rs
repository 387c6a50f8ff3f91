use crate::ClassDecl;
use crate::ClassID;
use crate::ClassScope;
use crate::Metadata;
use crate::NamePath;
use crate::ANY_ID;
use common::DiagnosticOutput;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use topological_sort::TopologicalSort;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClassGraphError {
    /// `class` refers to `reference`, which is missing or only forward-declared
    Unresolved {
        class: NamePath,
        reference: String,
    },
    Circular {
        class: NamePath,
    },
    MissingRoot,
    RootHasSupertype {
        root: NamePath,
    },
    NotAnInterface {
        class: NamePath,
        iface: NamePath,
    },
    SupertypeIsInterface {
        class: NamePath,
        super_class: NamePath,
    },
    InterfaceHasSupertype {
        iface: NamePath,
        super_class: NamePath,
    },
    DuplicateClassName {
        name: NamePath,
        first: ClassID,
        second: ClassID,
    },
}

impl fmt::Display for ClassGraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassGraphError::Unresolved { class, reference } => {
                write!(f, "class {} refers to undefined class {}", class, reference)
            },
            ClassGraphError::Circular { class } => {
                write!(f, "circular class reference involving class {}", class)
            },
            ClassGraphError::MissingRoot => write!(f, "root class is not defined"),
            ClassGraphError::RootHasSupertype { root } => {
                write!(f, "root class {} must not have a supertype", root)
            },
            ClassGraphError::NotAnInterface { class, iface } => {
                write!(f, "class {} implements {}, which is not an interface", class, iface)
            },
            ClassGraphError::SupertypeIsInterface { class, super_class } => {
                write!(f, "class {} extends interface {}", class, super_class)
            },
            ClassGraphError::InterfaceHasSupertype { iface, super_class } => {
                write!(f, "interface {} declares supertype {}", iface, super_class)
            },
            ClassGraphError::DuplicateClassName { name, first, second } => {
                write!(f, "class {} is defined twice (as {} and {})", name, first, second)
            },
        }
    }
}

impl DiagnosticOutput for ClassGraphError {
    fn title(&self) -> String {
        match self {
            ClassGraphError::Unresolved { .. } => "Unresolved class reference".to_string(),
            ClassGraphError::Circular { .. } => "Circular class reference".to_string(),
            ClassGraphError::MissingRoot => "Missing root class".to_string(),
            ClassGraphError::RootHasSupertype { .. } => "Invalid root class".to_string(),
            ClassGraphError::NotAnInterface { .. } => "Not an interface".to_string(),
            ClassGraphError::SupertypeIsInterface { .. } => "Invalid supertype".to_string(),
            ClassGraphError::InterfaceHasSupertype { .. } => "Invalid supertype".to_string(),
            ClassGraphError::DuplicateClassName { .. } => "Duplicate class".to_string(),
        }
    }

    fn notes(&self) -> Vec<String> {
        match self {
            ClassGraphError::MissingRoot => {
                vec![format!("class descriptors must include {}", crate::ANY_NAME)]
            },
            ClassGraphError::Circular { .. } => {
                vec![
                    "a class may not be its own supertype, super-interface or enclosing class, directly or indirectly"
                        .to_string(),
                ]
            },
            ClassGraphError::InterfaceHasSupertype { .. } => {
                vec!["interfaces extend other interfaces through their interface list".to_string()]
            },
            _ => Vec::new(),
        }
    }
}

/// Check the class graph is complete and acyclic, and sort the defined classes so every
/// class comes after its supertype and all its interfaces
pub fn sort_classes(metadata: &Metadata) -> Result<Vec<ClassID>, ClassGraphError> {
    let root = match metadata.get_class_decl(ANY_ID) {
        Some(ClassDecl::Def(root)) => root,
        _ => return Err(ClassGraphError::MissingRoot),
    };

    if root.super_class.is_some() || root.is_interface() {
        return Err(ClassGraphError::RootHasSupertype {
            root: root.name.clone(),
        });
    }

    let mut sort = TopologicalSort::<ClassID>::new();
    let mut names = HashMap::new();

    for (id, def) in metadata.class_defs() {
        sort.insert(id);

        if let Some(first) = names.insert(&def.name, id) {
            return Err(ClassGraphError::DuplicateClassName {
                name: def.name.clone(),
                first,
                second: id,
            });
        }

        if let Some(super_class) = def.super_class {
            let super_def = resolve(metadata, &def.name, super_class)?;
            if def.is_interface() {
                return Err(ClassGraphError::InterfaceHasSupertype {
                    iface: def.name.clone(),
                    super_class: super_def.name.clone(),
                });
            }
        }

        if let Some(super_class) = metadata.super_class_of(id) {
            let super_def = resolve(metadata, &def.name, super_class)?;
            if super_def.is_interface() {
                return Err(ClassGraphError::SupertypeIsInterface {
                    class: def.name.clone(),
                    super_class: super_def.name.clone(),
                });
            }

            sort.add_dependency(super_class, id);
        }

        for iface in &def.interfaces {
            let iface_def = resolve(metadata, &def.name, *iface)?;
            if !iface_def.is_interface() {
                return Err(ClassGraphError::NotAnInterface {
                    class: def.name.clone(),
                    iface: iface_def.name.clone(),
                });
            }

            sort.add_dependency(*iface, id);
        }

        check_enclosing_classes(metadata, id, &def.name, def.scope)?;
    }

    for (box_class, value_class) in metadata.value_boxes() {
        let box_name = match metadata.get_class_def(box_class) {
            Some(box_def) => box_def.name.clone(),
            None => {
                let value_name = class_desc(metadata, value_class);
                return Err(ClassGraphError::Unresolved {
                    class: NamePath::parse(&value_name),
                    reference: class_desc(metadata, box_class),
                });
            },
        };

        resolve(metadata, &box_name, value_class)?;
    }

    // ready classes come out of the sort in no particular order, so order each batch by ID
    // to keep the result stable between runs
    let mut sorted = Vec::with_capacity(sort.len());
    loop {
        let mut batch = sort.pop_all();
        if batch.is_empty() {
            break;
        }

        batch.sort();
        sorted.extend(batch);
    }

    if !sort.is_empty() {
        // anything left over is on or behind a cycle
        let sorted_set: HashSet<_> = sorted.iter().cloned().collect();
        let stuck = metadata
            .class_defs()
            .find(|(id, _)| !sorted_set.contains(id))
            .map(|(_, def)| def.name.clone());

        if let Some(class) = stuck {
            return Err(ClassGraphError::Circular { class });
        }
    }

    Ok(sorted)
}

// the enclosing class chain must end at a top-level class
fn check_enclosing_classes(
    metadata: &Metadata,
    class: ClassID,
    name: &NamePath,
    scope: ClassScope,
) -> Result<(), ClassGraphError> {
    let mut visited = HashSet::new();
    visited.insert(class);

    let mut scope = scope;
    while let ClassScope::Nested(outer) = scope {
        if !visited.insert(outer) {
            return Err(ClassGraphError::Circular { class: name.clone() });
        }

        scope = resolve(metadata, name, outer)?.scope;
    }

    Ok(())
}

fn class_desc(metadata: &Metadata, id: ClassID) -> String {
    match metadata.class_name(id) {
        Some(name) => name.to_string(),
        None => format!("#{}", id),
    }
}

fn resolve<'a>(
    metadata: &'a Metadata,
    from: &NamePath,
    id: ClassID,
) -> Result<&'a crate::ClassDef, ClassGraphError> {
    metadata.get_class_def(id).ok_or_else(|| ClassGraphError::Unresolved {
        class: from.clone(),
        reference: class_desc(metadata, id),
    })
}
