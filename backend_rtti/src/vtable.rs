use crate::RttiError;
use crate::RttiResult;
use common::TracedError;
use ir_lang::ClassID;
use ir_lang::Const;
use ir_lang::DataType;
use ir_lang::FunctionID;
use ir_lang::ImplKind;
use ir_lang::Metadata;
use ir_lang::MethodRef;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VtableSlot {
    pub name: String,
    pub implementation: MethodRef,

    /// `None` if the slot can't be called through the vtable
    pub entry_point: Option<FunctionID>,
}

/// Vtable of a class in ABI slot order. Slot positions are what compiled code indexes by,
/// so this is never sorted
pub fn build_vtable(metadata: &Metadata, class: ClassID) -> RttiResult<Vec<VtableSlot>> {
    metadata
        .vtable_entries(class)
        .into_iter()
        .map(|entry| {
            let method = metadata.get_method(entry.implementation).ok_or_else(|| {
                TracedError::trace(RttiError::UnknownMethod {
                    method: metadata.method_desc(entry.implementation),
                })
            })?;

            let entry_point = match method.impl_kind {
                // interop members are only reachable through their own calling convention
                ImplKind::Abstract | ImplKind::External => None,

                ImplKind::Concrete => match method.func {
                    Some(func) => Some(func),
                    None => {
                        return Err(TracedError::trace(RttiError::MissingEntryPoint {
                            method: metadata.method_desc(entry.implementation),
                        }));
                    },
                },
            };

            Ok(VtableSlot {
                name: entry.overridden_name,
                implementation: entry.implementation,
                entry_point,
            })
        })
        .collect()
}

pub fn vtable_const(slots: &[VtableSlot]) -> Const {
    let entries = slots
        .iter()
        .map(|slot| Const::function_addr_or_null(slot.entry_point))
        .collect();

    Const::Array(DataType::Ptr, entries)
}
