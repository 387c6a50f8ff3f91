use crate::NameHash;
use common::DiagnosticMessage;
use common::DiagnosticOutput;
use common::TracedError;
use ir_lang::dep_sort::ClassGraphError;
use ir_lang::NamePath;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RttiError {
    InvalidClassGraph(ClassGraphError),

    /// two distinct members of one class hash to the same value
    DuplicateMethodHash {
        class: NamePath,
        name: String,
        hash: NameHash,
        first: String,
        second: String,
    },

    OverrideNotOnInterface {
        iface: NamePath,
        method: String,
    },
    NotAnInterface {
        class: NamePath,
    },
    MissingEntryPoint {
        method: String,
    },
    InterfaceHasFields {
        iface: NamePath,
        field: String,
    },
    UnknownMethod {
        method: String,
    },
    DuplicateExport {
        class: NamePath,
        symbol: String,
    },
}

pub type RttiResult<T> = Result<T, TracedError<RttiError>>;

impl fmt::Display for RttiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RttiError::InvalidClassGraph(err) => write!(f, "{}", err),

            RttiError::DuplicateMethodHash { class, name, hash, first, second } => write!(
                f,
                "duplicate method table entry in {}: name = '{}', hash = {}, entry1 = {}, entry2 = {}",
                class, name, hash, first, second
            ),

            RttiError::OverrideNotOnInterface { iface, method } => {
                write!(f, "{} is not declared on interface {}", method, iface)
            },

            RttiError::NotAnInterface { class } => write!(f, "{} is not an interface", class),

            RttiError::MissingEntryPoint { method } => {
                write!(f, "non-abstract method {} has no entry point", method)
            },

            RttiError::InterfaceHasFields { iface, field } => {
                write!(f, "interface {} declares field {}", iface, field)
            },

            RttiError::UnknownMethod { method } => write!(f, "{} does not exist", method),

            RttiError::DuplicateExport { class, symbol } => {
                write!(f, "type info of {} exported as {}, which is already defined", class, symbol)
            },
        }
    }
}

impl DiagnosticOutput for RttiError {
    fn title(&self) -> String {
        match self {
            RttiError::InvalidClassGraph(err) => err.title(),
            RttiError::DuplicateMethodHash { .. } => "Method name hash collision".to_string(),
            RttiError::OverrideNotOnInterface { .. } => "Invalid interface override".to_string(),
            RttiError::NotAnInterface { .. } => "Not an interface".to_string(),
            RttiError::MissingEntryPoint { .. } => "Missing entry point".to_string(),
            RttiError::InterfaceHasFields { .. } => "Interface with fields".to_string(),
            RttiError::UnknownMethod { .. } => "Unknown method".to_string(),
            RttiError::DuplicateExport { .. } => "Duplicate exported symbol".to_string(),
        }
    }

    fn notes(&self) -> Vec<String> {
        match self {
            RttiError::InvalidClassGraph(err) => err.notes(),
            _ => vec![self.to_string()],
        }
    }

    fn see_also(&self) -> Vec<DiagnosticMessage> {
        match self {
            RttiError::DuplicateMethodHash { first, second, .. } => vec![
                DiagnosticMessage::new(format!("first entry: {}", first)),
                DiagnosticMessage::new(format!("second entry: {}", second)),
            ],
            _ => Vec::new(),
        }
    }
}

impl From<ClassGraphError> for RttiError {
    fn from(err: ClassGraphError) -> Self {
        RttiError::InvalidClassGraph(err)
    }
}
