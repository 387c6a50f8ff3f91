use backend_rtti::RttiError;
use common::Backtrace;
use common::DiagnosticMessage;
use common::DiagnosticOutput;
use common::TracedError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use target_desc::TargetSupportError;

#[derive(Debug)]
pub enum CompileError {
    RttiError(TracedError<RttiError>),
    TargetSupportError(TargetSupportError),

    InvalidArguments(String),
    ReadInputFailed {
        path: PathBuf,
        msg: String,
    },
    UnknownInputFormat(PathBuf),
    SerializeFailed(String),
    OutputFailed(String, io::Error),
}

impl From<TracedError<RttiError>> for CompileError {
    fn from(err: TracedError<RttiError>) -> Self {
        CompileError::RttiError(err)
    }
}

impl From<TargetSupportError> for CompileError {
    fn from(err: TargetSupportError) -> Self {
        CompileError::TargetSupportError(err)
    }
}

impl From<bincode::Error> for CompileError {
    fn from(err: bincode::Error) -> Self {
        CompileError::SerializeFailed(err.to_string())
    }
}

impl DiagnosticOutput for CompileError {
    fn main(&self) -> DiagnosticMessage {
        match self {
            CompileError::RttiError(err) => err.main(),
            CompileError::TargetSupportError(err) => err.main(),

            CompileError::UnknownInputFormat(..) => DiagnosticMessage::new(self.to_string())
                .with_note("class descriptors are read from .json or .lib files"),

            _ => DiagnosticMessage::new(self.to_string()),
        }
    }

    fn see_also(&self) -> Vec<DiagnosticMessage> {
        match self {
            CompileError::RttiError(err) => err.see_also(),
            _ => Vec::new(),
        }
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        match self {
            CompileError::RttiError(err) => Some(&err.bt),
            _ => None,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompileError::RttiError(err) => write!(f, "{}", err),
            CompileError::TargetSupportError(err) => write!(f, "{}", err),
            CompileError::InvalidArguments(msg) => write!(f, "{}", msg),
            CompileError::ReadInputFailed { path, msg } => {
                write!(f, "failed to read class descriptors from {}: {}", path.display(), msg)
            },
            CompileError::UnknownInputFormat(path) => {
                write!(f, "unrecognized input file format: {}", path.display())
            },
            CompileError::SerializeFailed(msg) => write!(f, "failed to serialize output: {}", msg),
            CompileError::OutputFailed(dest, err) => write!(f, "writing output to `{}` failed: {}", dest, err),
        }
    }
}
