use crate::Family;
use crate::Target;

/// Storage classes the layout of an object body is built from
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Scalar {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Ptr,
}

/// Target facts consumed by type info generation
pub trait TargetFacts {
    fn pointer_size(&self) -> usize;

    /// Size of the header preceding the fields of every heap object
    fn object_header_size(&self) -> usize {
        self.pointer_size()
    }

    fn size_of(&self, scalar: Scalar) -> usize {
        match scalar {
            Scalar::Bool | Scalar::I8 => 1,
            Scalar::I16 => 2,
            Scalar::I32 | Scalar::F32 => 4,
            Scalar::I64 | Scalar::F64 => 8,
            Scalar::Ptr => self.pointer_size(),
        }
    }

    fn align_of(&self, scalar: Scalar) -> usize {
        self.size_of(scalar)
    }

    /// Whether type info records carry a pointer to a mutable per-type extension record
    fn has_writable_type_info(&self) -> bool;

    /// Whether the toolchain for this target drops symbols nothing in the image refers to
    fn strips_unreferenced_symbols(&self) -> bool;

    fn struct_layout(&self, elements: &[Scalar]) -> StructLayout {
        StructLayout::build(
            elements
                .iter()
                .map(|scalar| (self.size_of(*scalar), self.align_of(*scalar))),
        )
    }
}

impl TargetFacts for Target {
    fn pointer_size(&self) -> usize {
        self.architecture().bitness() / 8
    }

    fn has_writable_type_info(&self) -> bool {
        matches!(self.family(), Family::Osx | Family::Ios)
    }

    fn strips_unreferenced_symbols(&self) -> bool {
        self.family() == Family::Wasm
    }
}

/// Naturally aligned, non-packed struct layout
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StructLayout {
    pub offsets: Vec<usize>,

    /// store size, including tail padding up to the struct's alignment
    pub size: usize,
    pub align: usize,
}

impl StructLayout {
    /// Lay out elements given as `(size, align)` pairs in order
    pub fn build(elements: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut offsets = Vec::new();
        let mut end = 0;
        let mut struct_align = 1;

        for (size, align) in elements {
            assert!(align.is_power_of_two(), "element alignment must be a power of two");

            let offset = align_to(end, align);
            offsets.push(offset);

            end = offset + size;
            struct_align = struct_align.max(align);
        }

        Self {
            offsets,
            size: align_to(end, struct_align),
            align: struct_align,
        }
    }
}

pub fn align_to(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}
