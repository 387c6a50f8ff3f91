use crate::ClassID;
use crate::Metadata;
use crate::MethodRef;
use crate::ANY_ID;
use std::collections::HashSet;

/// A virtual or interface member visible on a class, and the member that implements it
/// for that class
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DispatchEntry {
    pub overridden_name: String,
    pub implementation: MethodRef,
}

// all of these walk the supertype and interface graph, so they expect it to have been
// validated (see `dep_sort::sort_classes`) and will panic on dangling IDs
impl Metadata {
    /// Explicit supertype of a class, or the root. Only the root itself has none
    pub fn super_class_of(&self, class: ClassID) -> Option<ClassID> {
        if class == ANY_ID {
            return None;
        }

        Some(self.class_def(class).super_class.unwrap_or(ANY_ID))
    }

    /// The supertype chain of a class, starting at the root and ending with the class itself
    pub fn class_hierarchy(&self, class: ClassID) -> Vec<ClassID> {
        let mut chain = vec![class];
        let mut current = class;

        while let Some(super_class) = self.super_class_of(current) {
            chain.push(super_class);
            current = super_class;
        }

        chain.reverse();
        chain
    }

    /// Direct and transitive interfaces of a class, de-duplicated in first occurrence order:
    /// each directly implemented interface followed by its super-interfaces, then the
    /// interfaces of the superclass
    pub fn implemented_interfaces(&self, class: ClassID) -> Vec<ClassID> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();

        let mut current = Some(class);
        while let Some(class_id) = current {
            let def = self.class_def(class_id);
            for iface in &def.interfaces {
                self.add_interface(*iface, &mut result, &mut seen);
            }

            current = match def.is_interface() {
                true => None,
                false => self.super_class_of(class_id),
            };
        }

        result
    }

    fn add_interface(&self, iface: ClassID, result: &mut Vec<ClassID>, seen: &mut HashSet<ClassID>) {
        if !seen.insert(iface) {
            return;
        }

        result.push(iface);

        for super_iface in &self.class_def(iface).interfaces {
            self.add_interface(*super_iface, result, seen);
        }
    }

    /// Find the most-derived method with this name on a class or its superclasses
    pub fn find_method(&self, class: ClassID, name: &str) -> Option<MethodRef> {
        let mut current = Some(class);

        while let Some(class_id) = current {
            let def = self.class_def(class_id);
            if let Some(index) = def.method_index(name) {
                return Some(MethodRef::new(class_id, index));
            }

            current = self.super_class_of(class_id);
        }

        None
    }

    /// Vtable slots of a class in ABI order: the superclass's slots in the superclass's
    /// order, with overrides replacing the implementation in place, followed by the new
    /// overridable members of this class in declaration order. Interfaces have no vtable
    pub fn vtable_entries(&self, class: ClassID) -> Vec<DispatchEntry> {
        let def = self.class_def(class);
        if def.is_interface() {
            return Vec::new();
        }

        let mut entries = match self.super_class_of(class) {
            Some(super_class) => self.vtable_entries(super_class),
            None => Vec::new(),
        };

        for (index, method) in def.methods.iter().enumerate() {
            let implementation = MethodRef::new(class, index);

            let existing_slot = entries
                .iter_mut()
                .find(|entry| entry.overridden_name == method.name);

            match existing_slot {
                Some(slot) => {
                    slot.implementation = implementation;
                },

                None if method.overridable => {
                    entries.push(DispatchEntry {
                        overridden_name: method.name.clone(),
                        implementation,
                    });
                },

                None => {},
            }
        }

        entries
    }

    /// Members of an interface including the ones inherited from its super-interfaces, each
    /// paired with the interface's own implementation (a default body, or the abstract
    /// declaration)
    pub fn interface_members(&self, iface: ClassID) -> Vec<DispatchEntry> {
        let mut entries: Vec<DispatchEntry> = Vec::new();

        let ifaces = std::iter::once(iface).chain(self.implemented_interfaces(iface));
        for iface_id in ifaces {
            let def = self.class_def(iface_id);

            for (index, method) in def.methods.iter().enumerate() {
                if entries.iter().any(|entry| entry.overridden_name == method.name) {
                    continue;
                }

                entries.push(DispatchEntry {
                    overridden_name: method.name.clone(),
                    implementation: MethodRef::new(iface_id, index),
                });
            }
        }

        entries
    }

    /// Every distinctly named virtual or interface member visible on a class, with the
    /// member implementing it. Vtable members come first in slot order, then interface
    /// members that aren't also vtable members. Interface members are implemented by the
    /// most-derived class method with that name, falling back to the interface's own
    /// declaration
    pub fn method_table_entries(&self, class: ClassID) -> Vec<DispatchEntry> {
        let mut entries = self.vtable_entries(class);
        let is_interface = self.class_def(class).is_interface();

        let ifaces = self.implemented_interfaces(class);
        for iface_member in ifaces.into_iter().flat_map(|iface| self.interface_members(iface)) {
            let name = iface_member.overridden_name;

            if entries.iter().any(|entry| entry.overridden_name == name) {
                continue;
            }

            let class_impl = match is_interface {
                true => None,
                false => self.find_method(class, &name),
            };

            entries.push(DispatchEntry {
                implementation: class_impl.unwrap_or(iface_member.implementation),
                overridden_name: name,
            });
        }

        entries
    }
}
