use std::{
    cmp::Ordering,
    fmt,
    ops::Deref,
};

pub use backtrace::Backtrace;

pub trait DiagnosticOutput: fmt::Display {
    fn title(&self) -> String {
        self.to_string()
    }

    fn notes(&self) -> Vec<String> {
        Vec::new()
    }

    fn main(&self) -> DiagnosticMessage {
        let title = self.title();
        let notes = self.notes().to_vec();

        DiagnosticMessage {
            title,
            notes,
        }
    }

    fn see_also(&self) -> Vec<DiagnosticMessage> {
        Vec::new()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        None
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticMessage {
    pub title: String,
    pub notes: Vec<String>,
}

impl DiagnosticMessage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl Ord for DiagnosticMessage {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.title.cmp(&other.title) {
            Ordering::Equal => self.notes.cmp(&other.notes),
            title_ord => title_ord,
        }
    }
}

impl PartialOrd for DiagnosticMessage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug)]
pub struct TracedError<T> {
    pub err: T,
    pub bt: Backtrace,
}

impl<T> TracedError<T> {
    pub fn trace(err: T) -> Self {
        Self {
            err,
            bt: Backtrace::new(),
        }
    }
}

impl<T> Deref for TracedError<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.err
    }
}

impl<T: fmt::Display> fmt::Display for TracedError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.err.fmt(f)
    }
}

impl<T: DiagnosticOutput> DiagnosticOutput for TracedError<T> {
    fn main(&self) -> DiagnosticMessage {
        self.err.main()
    }

    fn see_also(&self) -> Vec<DiagnosticMessage> {
        self.err.see_also()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        Some(&self.bt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub verbose: bool,

    // number of worker threads used to generate type info. 0 or 1 means generate on the
    // calling thread
    pub jobs: usize,

    // target name as requested by the user. None or "host" selects the host target
    pub target: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            verbose: false,
            jobs: 1,
            target: None,
        }
    }
}

impl BuildOptions {
    pub fn target_request(&self) -> Option<&str> {
        match self.target.as_deref() {
            None | Some("host") => None,
            Some(name) => Some(name),
        }
    }
}

#[cfg(test)]
mod test;
