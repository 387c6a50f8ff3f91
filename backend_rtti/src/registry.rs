use crate::TypeInfo;
use dashmap::DashMap;
use ir_lang::ClassID;
use ir_lang::GlobalID;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeInfoEntry {
    pub global: GlobalID,
    pub writable: Option<GlobalID>,

    /// filled in once the record has been generated
    pub info: Option<TypeInfo>,
    pub export: Option<GlobalID>,
}

/// Class to type info record, shared between generator threads
#[derive(Debug, Default)]
pub struct TypeInfoMap {
    entries: DashMap<ClassID, TypeInfoEntry>,
}

impl TypeInfoMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&self, class: ClassID, global: GlobalID, writable: Option<GlobalID>) {
        let existing = self.entries.insert(
            class,
            TypeInfoEntry {
                global,
                writable,
                info: None,
                export: None,
            },
        );

        assert!(existing.is_none(), "type info for class {} declared twice", class);
    }

    pub fn complete(&self, class: ClassID, info: TypeInfo, export: Option<GlobalID>) {
        let mut entry = self
            .entries
            .get_mut(&class)
            .unwrap_or_else(|| panic!("type info for class {} was never declared", class));

        assert!(entry.info.is_none(), "type info for class {} generated twice", class);

        entry.info = Some(info);
        entry.export = export;
    }

    pub fn global_of(&self, class: ClassID) -> Option<GlobalID> {
        self.entries.get(&class).map(|entry| entry.global)
    }

    pub fn writable_of(&self, class: ClassID) -> Option<GlobalID> {
        self.entries.get(&class).and_then(|entry| entry.writable)
    }

    pub fn get(&self, class: ClassID) -> Option<TypeInfoEntry> {
        self.entries.get(&class).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by class ID
    pub fn to_sorted_vec(&self) -> Vec<(ClassID, TypeInfoEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        entries.sort_by_key(|(class, _)| *class);
        entries
    }
}
