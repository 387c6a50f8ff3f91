use crate::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
struct TestError(&'static str);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "test error: {}", self.0)
    }
}

impl DiagnosticOutput for TestError {
    fn notes(&self) -> Vec<String> {
        vec!["first note".to_string()]
    }
}

#[test]
fn traced_error_forwards_diagnostic() {
    let err = TracedError::trace(TestError("boom"));

    let main = err.main();
    assert_eq!("test error: boom", main.title);
    assert_eq!(vec!["first note".to_string()], main.notes);
    assert!(err.backtrace().is_some());
    assert_eq!(TestError("boom"), *err);
}

#[test]
fn host_target_request_is_none() {
    let mut opts = BuildOptions::default();
    assert_eq!(None, opts.target_request());

    opts.target = Some("host".to_string());
    assert_eq!(None, opts.target_request());

    opts.target = Some("wasm32".to_string());
    assert_eq!(Some("wasm32"), opts.target_request());
}

