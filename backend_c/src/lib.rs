pub mod ast;
pub use ir_lang as ir;

pub use ast as c;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Options {
    /// mark globals the segment lists as used so the linker keeps them
    pub retain_used: bool,

    /// annotate declarations with the names they have in the data segment
    pub comments: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            retain_used: false,
            comments: true,
        }
    }
}

pub fn translate(segment: &ir::DataSegment, metadata: &ir::Metadata, opts: Options) -> c::Unit {
    let mut unit = c::Unit::new(opts);
    unit.add_segment(segment, metadata);

    unit
}
