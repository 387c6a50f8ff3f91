use crate::build_vtable;
use crate::method_record;
use crate::method_table;
use crate::sort_distinct;
use crate::type_info_type;
use crate::TableRef;
use crate::vtable_const;
use crate::writable_type_info_type;
use crate::MethodRecord;
use crate::NameHash;
use crate::RttiBuilder;
use crate::RttiError;
use crate::RttiResult;
use crate::TypeInfo;
use common::TracedError;
use ir_lang::ClassID;
use ir_lang::Const;
use ir_lang::DataType;
use ir_lang::FunctionID;
use ir_lang::GlobalID;
use ir_lang::MethodRef;
use ir_lang::ANY_ID;
use tracing::debug;

impl<'a> RttiBuilder<'a> {
    /// Standalone type info for an anonymous implementation of an interface, used to adapt
    /// foreign callables to it. `overrides` supplies entry points for members of the
    /// interface itself, everything else keeps the interface's default or stays abstract
    pub fn generate_synthetic_interface_impl(
        &self,
        iface: ClassID,
        overrides: &[(MethodRef, FunctionID)],
    ) -> RttiResult<GlobalID> {
        let iface_def = self.metadata.class_def(iface);
        if !iface_def.is_interface() {
            return Err(TracedError::trace(RttiError::NotAnInterface {
                class: iface_def.name.clone(),
            }));
        }

        let mut records = method_table(self.metadata, ANY_ID)?;

        for member in self.metadata.interface_members(iface) {
            if !records.iter().any(|record| record.name == member.overridden_name) {
                records.push(method_record(self.metadata, &member)?);
            }
        }

        for (method, func) in overrides {
            if method.class != iface {
                return Err(TracedError::trace(RttiError::OverrideNotOnInterface {
                    iface: iface_def.name.clone(),
                    method: self.metadata.method_desc(*method),
                }));
            }

            let name = match self.metadata.get_method(*method) {
                Some(method_def) => method_def.name.clone(),
                None => {
                    return Err(TracedError::trace(RttiError::UnknownMethod {
                        method: self.metadata.method_desc(*method),
                    }));
                },
            };

            let record = MethodRecord {
                name_hash: NameHash::of(&name),
                name,
                implementation: *method,
                entry_point: Some(*func),
            };

            match records.iter_mut().find(|existing| existing.name == record.name) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }

        let records = sort_distinct(self.metadata, &iface_def.name, records)?;

        let base_name = format!("{}$impl", iface_def.name);

        let interfaces_ptr = self.data.place_global_const_array(
            &format!("kintf:{}", base_name),
            DataType::Ptr,
            vec![Const::GlobalAddr(self.type_info_ptr(iface))],
        );

        let methods_len = records.len();
        let methods_ptr = self.data.place_global_const_array(
            &format!("kmethods:{}", base_name),
            MethodRecord::data_type(),
            records.iter().map(MethodRecord::to_const).collect(),
        );

        let writable_type_info = if self.target.has_writable_type_info() {
            Some(
                self.data
                    .place_writable(&format!("kwti:{}", base_name), writable_type_info_type()),
            )
        } else {
            None
        };

        let info = TypeInfo {
            name_hash: NameHash::of(""),
            instance_size: 0,
            super_type: Some(self.type_info_ptr(ANY_ID)),
            obj_offsets: TableRef::null(),
            interfaces: TableRef::placed(interfaces_ptr, 1),
            methods: TableRef::placed(methods_ptr, methods_len),
            fields: TableRef::null(),
            package_name: None,
            relative_name: None,
            writable_type_info,
        };

        let vtable = build_vtable(self.metadata, ANY_ID)?;

        let global = self.data.create_unique_global(
            &format!("ktype:{}", base_name),
            type_info_type(writable_type_info.is_some()),
        );
        self.data.place_type_info(global, &info, Some(vtable_const(&vtable)));

        debug!("generated synthetic implementation of {} with {} overrides", iface_def.name, overrides.len());

        Ok(global)
    }
}
