use crate::Const;
use crate::DataSegment;
use crate::FunctionID;
use crate::Global;
use crate::GlobalID;
use crate::Linkage;
use crate::Metadata;
use std::fmt;

pub trait DataFormatter {
    fn format_global_ref(&self, id: GlobalID, f: &mut dyn fmt::Write) -> fmt::Result;
    fn format_function(&self, id: FunctionID, f: &mut dyn fmt::Write) -> fmt::Result;

    fn format_const(&self, val: &Const, f: &mut dyn fmt::Write) -> fmt::Result {
        match val {
            Const::I32(i) => write!(f, "{}", i),
            Const::I64(i) => write!(f, "{}", i),
            Const::Null => write!(f, "null"),
            Const::GlobalAddr(id) => {
                write!(f, "&")?;
                self.format_global_ref(*id, f)
            },
            Const::FunctionAddr(id) => {
                write!(f, "&")?;
                self.format_function(*id, f)
            },
            Const::Utf16(s) => write!(f, "u{:?}", s),
            Const::Array(_, items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.format_const(item, f)?;
                }
                write!(f, "]")
            },
            Const::Struct(members) => {
                write!(f, "{{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.format_const(member, f)?;
                }
                write!(f, "}}")
            },
            Const::Zero(ty) => write!(f, "zeroinit {}", ty),
        }
    }

    fn format_global<W: fmt::Write>(&self, id: GlobalID, global: &Global, f: &mut W) -> fmt::Result {
        const KW_WIDTH: usize = 8;

        let keyword = match (global.linkage, global.constant) {
            (Linkage::Exported, _) => "export",
            (Linkage::Internal, true) => "const",
            (Linkage::Internal, false) => "var",
        };

        write!(f, "{:>width$} {} {}: {}", keyword, id, global.name, global.ty, width = KW_WIDTH)?;

        match &global.init {
            Some(init) => {
                write!(f, " = ")?;
                self.format_const(init, f)
            },
            None => write!(f, " (extern)"),
        }
    }
}

pub struct RawDataFormatter;

impl DataFormatter for RawDataFormatter {
    fn format_global_ref(&self, id: GlobalID, f: &mut dyn fmt::Write) -> fmt::Result {
        write!(f, "{}", id)
    }

    fn format_function(&self, id: FunctionID, f: &mut dyn fmt::Write) -> fmt::Result {
        write!(f, "<{}>", id)
    }
}

/// Formats references by symbol name, using class metadata to name functions
pub struct SegmentFormatter<'a> {
    pub segment: &'a DataSegment,
    pub metadata: Option<&'a Metadata>,
}

impl<'a> SegmentFormatter<'a> {
    pub fn new(segment: &'a DataSegment) -> Self {
        Self {
            segment,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: &'a Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn format_segment<W: fmt::Write>(&self, f: &mut W) -> fmt::Result {
        for (id, global) in self.segment.globals() {
            self.format_global(id, global, f)?;
            writeln!(f)?;
        }

        if !self.segment.used().is_empty() {
            write!(f, "{:>width$} ", "used", width = 8)?;
            for (i, id) in self.segment.used().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                self.format_global_ref(*id, f)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl<'a> DataFormatter for SegmentFormatter<'a> {
    fn format_global_ref(&self, id: GlobalID, f: &mut dyn fmt::Write) -> fmt::Result {
        match self.segment.get(id) {
            Some(global) => write!(f, "{}", global.name),
            None => RawDataFormatter.format_global_ref(id, f),
        }
    }

    fn format_function(&self, id: FunctionID, f: &mut dyn fmt::Write) -> fmt::Result {
        let name = self
            .metadata
            .and_then(|metadata| metadata.get_function(id))
            .and_then(|decl| decl.global_name.as_ref());

        match name {
            Some(name) => write!(f, "{}", name),
            None => RawDataFormatter.format_function(id, f),
        }
    }
}

impl fmt::Display for DataSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        SegmentFormatter::new(self).format_segment(f)
    }
}
