use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::Error as FileError;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor;
use common::DiagnosticMessage;
use common::DiagnosticOutput;

// diagnostics here never point into a source file
type CodeMap = SimpleFiles<String, String>;

fn output_to_report_diag(diag: DiagnosticMessage, severity: Severity) -> Diagnostic<usize> {
    Diagnostic::new(severity)
        .with_message(diag.title)
        .with_notes(diag.notes)
}

pub fn report_err(err: &impl DiagnosticOutput, severity: Severity) -> Result<(), FileError> {
    let out = termcolor::StandardStream::stderr(termcolor::ColorChoice::Auto);
    let config = term::Config::default();
    let code_map = CodeMap::new();

    let main_diag = output_to_report_diag(err.main(), severity);
    term::emit(&mut out.lock(), &config, &code_map, &main_diag)?;

    for see_also in err.see_also() {
        let diag = output_to_report_diag(see_also, Severity::Note);
        term::emit(&mut out.lock(), &config, &code_map, &diag)?;
    }

    Ok(())
}
