use crate::Target;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CompilerOutputKind {
    Program,
    Dynamic,
    Framework,
    Library,
    Bitcode,
}

impl CompilerOutputKind {
    pub fn suffix(self, target: &Target) -> String {
        match self {
            CompilerOutputKind::Program => format!(".{}", target.family().exe_suffix()),
            CompilerOutputKind::Dynamic => format!(".{}", target.family().dynamic_suffix()),
            CompilerOutputKind::Framework => ".framework".to_string(),
            CompilerOutputKind::Library => ".lib".to_string(),
            CompilerOutputKind::Bitcode => ".bc".to_string(),
        }
    }

    pub fn prefix(self, target: &Target) -> &'static str {
        match self {
            CompilerOutputKind::Dynamic => target.family().dynamic_prefix(),
            _ => "",
        }
    }

    pub fn file_name(self, base_name: &str, target: &Target) -> String {
        format!("{}{}{}", self.prefix(target), base_name, self.suffix(target))
    }
}
