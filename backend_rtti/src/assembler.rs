use crate::build_vtable;
use crate::class_layout;
use crate::field_table;
use crate::method_table;
use crate::reflection_info;
use crate::type_info_type;
use crate::vtable_const;
use crate::writable_type_info_type;
use crate::FieldRecord;
use crate::MethodRecord;
use crate::NameHash;
use crate::RttiError;
use crate::RttiResult;
use crate::StaticData;
use crate::TableRef;
use crate::TypeInfo;
use crate::TypeInfoMap;
use common::TracedError;
use ir_lang::ClassDef;
use ir_lang::ClassID;
use ir_lang::Const;
use ir_lang::DataType;
use ir_lang::GlobalID;
use ir_lang::Metadata;
use target_desc::TargetFacts;
use tracing::debug;
use tracing::trace;

/// Builds type info records for the classes of one module
pub struct RttiBuilder<'a> {
    pub(crate) metadata: &'a Metadata,
    pub(crate) target: &'a (dyn TargetFacts + Sync),
    pub(crate) data: &'a StaticData,
    pub(crate) type_infos: &'a TypeInfoMap,
}

impl<'a> RttiBuilder<'a> {
    pub fn new(
        metadata: &'a Metadata,
        target: &'a (dyn TargetFacts + Sync),
        data: &'a StaticData,
        type_infos: &'a TypeInfoMap,
    ) -> Self {
        Self {
            metadata,
            target,
            data,
            type_infos,
        }
    }

    /// Declare the type info global of a class, and its writable extension if the target has
    /// one, so other records can point at it before it's generated
    pub fn declare_class(&self, class: ClassID) -> GlobalID {
        let def = self.metadata.class_def(class);
        let has_writable = self.target.has_writable_type_info();

        let global = self
            .data
            .create_global(&format!("ktype:{}", def.name), type_info_type(has_writable));

        let writable = if has_writable {
            Some(
                self.data
                    .place_writable(&format!("kwti:{}", def.name), writable_type_info_type()),
            )
        } else {
            None
        };

        self.type_infos.declare(class, global, writable);
        global
    }

    /// Record global of a class declared with `declare_class`
    pub(crate) fn type_info_ptr(&self, class: ClassID) -> GlobalID {
        self.type_infos
            .global_of(class)
            .unwrap_or_else(|| panic!("type info for class {} was not declared", class))
    }

    pub fn generate_class(&self, class: ClassID) -> RttiResult<GlobalID> {
        let def = self.metadata.class_def(class);
        let class_name = def.name.to_string();

        debug!("generating type info for {}", class_name);

        let layout = class_layout(self.metadata, class, self.target)?;

        let super_type = self
            .metadata
            .super_class_of(class)
            .map(|super_class| self.type_info_ptr(super_class));

        let interfaces: Vec<_> = self
            .metadata
            .implemented_interfaces(class)
            .into_iter()
            .map(|iface| Const::GlobalAddr(self.type_info_ptr(iface)))
            .collect();
        let interfaces_len = interfaces.len();
        let interfaces_ptr =
            self.data
                .place_global_const_array(&format!("kintf:{}", class_name), DataType::Ptr, interfaces);

        let obj_offsets = layout.traced_offsets.iter().map(|offset| Const::I32(*offset)).collect();
        let obj_offsets_ptr =
            self.data
                .place_global_const_array(&format!("krefs:{}", class_name), DataType::I32, obj_offsets);

        let fields = match def.is_interface() {
            true => Vec::new(),
            false => field_table(def, &layout),
        };
        trace!("{}: {} fields, traced offsets {:?}", class_name, fields.len(), layout.traced_offsets);

        let fields_len = fields.len();
        let fields_ptr = self.data.place_global_const_array(
            &format!("kfields:{}", class_name),
            FieldRecord::data_type(),
            fields.iter().map(FieldRecord::to_const).collect(),
        );

        let methods = method_table(self.metadata, class)?;
        trace!("{}: {} method table entries", class_name, methods.len());

        let methods_len = methods.len();
        let methods_ptr = self.data.place_global_const_array(
            &format!("kmethods:{}", class_name),
            MethodRecord::data_type(),
            methods.iter().map(MethodRecord::to_const).collect(),
        );

        let reflection = reflection_info(self.metadata, class);

        let info = TypeInfo {
            name_hash: NameHash::of(&class_name),
            instance_size: layout.instance_size,
            super_type,
            obj_offsets: TableRef::placed(obj_offsets_ptr, layout.traced_offsets.len()),
            interfaces: TableRef::placed(interfaces_ptr, interfaces_len),
            methods: TableRef::placed(methods_ptr, methods_len),
            fields: match def.is_interface() {
                true => TableRef::not_applicable(fields_ptr),
                false => TableRef::placed(fields_ptr, fields_len),
            },
            package_name: reflection.package_name.as_deref().map(|s| self.data.string_literal(s)),
            relative_name: reflection.relative_name.as_deref().map(|s| self.data.string_literal(s)),
            writable_type_info: self.type_infos.writable_of(class),
        };

        // abstract classes and interfaces are never instantiated
        let vtable = match def.is_abstract() {
            true => None,
            false => {
                let slots = build_vtable(self.metadata, class)?;
                trace!("{}: {} vtable slots", class_name, slots.len());

                if slots.is_empty() {
                    None
                } else {
                    Some(vtable_const(&slots))
                }
            },
        };

        let global = self.type_info_ptr(class);
        self.data.place_type_info(global, &info, vtable);

        let export = self.export_type_info(def, global)?;

        self.type_infos.complete(class, info, export);

        Ok(global)
    }

    /// Bind the record's address to the class's export symbol, if it has one
    fn export_type_info(&self, def: &ClassDef, type_info: GlobalID) -> RttiResult<Option<GlobalID>> {
        let symbol = match &def.export_as {
            Some(symbol) => symbol,
            None => return Ok(None),
        };

        let global = self
            .data
            .create_exported_global(symbol, DataType::Ptr)
            .map_err(|_| {
                TracedError::trace(RttiError::DuplicateExport {
                    class: def.name.clone(),
                    symbol: symbol.clone(),
                })
            })?;

        self.data.set_initializer(global, Const::GlobalAddr(type_info));
        self.data.set_constant(global);

        // the only reference to an exported record may come from outside the image
        if self.target.strips_unreferenced_symbols() {
            self.data.add_used(global);
        }

        debug!("exported type info of {} as {}", def.name, symbol);

        Ok(Some(global))
    }
}
