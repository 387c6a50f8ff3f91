mod class;
mod data;
mod dispatch;
mod formatter;
mod function;
mod metadata;
mod ty;
pub mod dep_sort;

pub use class::*;
pub use data::*;
pub use dispatch::*;
pub use formatter::*;
pub use function::*;
pub use metadata::*;
pub use ty::*;

use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Dot-separated qualified name of a class, function or field
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NamePath {
    pub path: Vec<String>,
}

impl NamePath {
    pub fn new(ns: impl IntoIterator<Item = String>, name: impl Into<String>) -> Self {
        let mut path: Vec<_> = ns.into_iter().collect();
        path.push(name.into());

        NamePath { path }
    }

    /// Split a dotted name like `com.example.Foo` into its parts
    pub fn parse(dotted: &str) -> Self {
        let path = dotted
            .split('.')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        NamePath { path }
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(name.into());

        NamePath { path }
    }

    pub fn simple_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    /// Everything but the last part of the path
    pub fn parent_parts(&self) -> &[String] {
        match self.path.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    pub fn join(&self, sep: &str) -> String {
        self.path.join(sep)
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.join("."))
    }
}

impl From<&str> for NamePath {
    fn from(dotted: &str) -> Self {
        NamePath::parse(dotted)
    }
}

#[cfg(test)]
mod test;
