use crate::RttiError;
use crate::RttiResult;
use common::TracedError;
use ir_lang::ClassID;
use ir_lang::Metadata;
use ir_lang::NamePath;
use ir_lang::Type;
use target_desc::Scalar;
use target_desc::StructLayout;
use target_desc::TargetFacts;

/// Builtin types with a variable-length body, and the size of one element. A size of
/// `None` means one object reference
const VARIABLE_LENGTH_TYPES: [(&str, Option<i32>); 11] = [
    ("system.Array", None),
    ("system.ByteArray", Some(1)),
    ("system.CharArray", Some(2)),
    ("system.ShortArray", Some(2)),
    ("system.IntArray", Some(4)),
    ("system.LongArray", Some(8)),
    ("system.FloatArray", Some(4)),
    ("system.DoubleArray", Some(8)),
    ("system.BooleanArray", Some(1)),
    ("system.String", Some(2)),
    ("system.ImmutableBlob", Some(1)),
];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassLayout {
    /// negative for variable-length builtins, where it's the element size
    pub instance_size: i32,

    /// offsets of the fields declared on the class itself, in declaration order
    pub field_offsets: Vec<i32>,

    /// offsets of every body element the collector must follow, in layout order
    pub traced_offsets: Vec<i32>,
}

pub fn scalar_of(ty: &Type) -> Scalar {
    match ty {
        Type::Bool => Scalar::Bool,
        Type::I8 | Type::U8 => Scalar::I8,
        Type::I16 | Type::U16 | Type::Char => Scalar::I16,
        Type::I32 | Type::U32 => Scalar::I32,
        Type::I64 | Type::U64 => Scalar::I64,
        Type::F32 => Scalar::F32,
        Type::F64 => Scalar::F64,
        Type::USize | Type::ISize | Type::Pointer(..) | Type::Object(..) | Type::Any => Scalar::Ptr,
    }
}

/// Element size of a builtin variable-length type, encoded as a negative instance size
pub fn variable_length_size(name: &NamePath, target: &dyn TargetFacts) -> Option<i32> {
    let name = name.to_string();

    VARIABLE_LENGTH_TYPES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, element_size)| {
            let size = element_size.unwrap_or(target.pointer_size() as i32);
            -size
        })
}

pub fn class_layout(metadata: &Metadata, class: ClassID, target: &dyn TargetFacts) -> RttiResult<ClassLayout> {
    let def = metadata.class_def(class);

    if def.is_interface() {
        if let Some(field) = def.fields.first() {
            return Err(TracedError::trace(RttiError::InterfaceHasFields {
                iface: def.name.clone(),
                field: field.name.clone(),
            }));
        }
    }

    // object header, then fields of each class from the root down
    let ptr_size = target.pointer_size();
    let mut elements = vec![(target.object_header_size(), ptr_size)];
    let mut traced = vec![false];

    let hierarchy = metadata.class_hierarchy(class);
    for class_id in &hierarchy {
        for field in &metadata.class_def(*class_id).fields {
            let scalar = scalar_of(&field.ty);
            elements.push((target.size_of(scalar), target.align_of(scalar)));
            traced.push(field.ty.is_managed_ref());
        }
    }

    let body = StructLayout::build(elements);

    let own_start = body.offsets.len() - def.fields.len();
    let field_offsets = body.offsets[own_start..]
        .iter()
        .map(|offset| *offset as i32)
        .collect();

    let traced_offsets = body
        .offsets
        .iter()
        .zip(traced)
        .filter_map(|(offset, is_traced)| if is_traced { Some(*offset as i32) } else { None })
        .collect();

    let instance_size = variable_length_size(&def.name, target).unwrap_or(body.size as i32);

    Ok(ClassLayout {
        instance_size,
        field_offsets,
        traced_offsets,
    })
}
