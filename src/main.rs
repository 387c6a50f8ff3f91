mod args;
mod compile_error;
mod reporting;

use crate::args::Args;
use crate::compile_error::CompileError;
use crate::reporting::report_err;
use backend_rtti::RttiModule;
use codespan_reporting::diagnostic::Severity;
use common::BuildOptions;
use common::DiagnosticOutput;
use ir_lang as ir;
use std::fmt;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use target_desc::Target;
use target_desc::TargetFacts;
use target_desc::TargetManager;
use target_desc::TargetTable;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

const IR_LIB_EXT: &str = "lib";
const JSON_EXT: &str = "json";
const C_EXT: &str = "c";

const LOG_ENV_VAR: &str = "RTTIGEN_LOG";

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_metadata(path: &Path) -> Result<ir::Metadata, CompileError> {
    let ext = get_extension(path);
    let is_json = ext.eq_ignore_ascii_case(JSON_EXT);
    if !is_json && !ext.eq_ignore_ascii_case(IR_LIB_EXT) {
        return Err(CompileError::UnknownInputFormat(path.to_path_buf()));
    }

    let read_failed = |msg: String| CompileError::ReadInputFailed {
        path: path.to_path_buf(),
        msg,
    };

    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|err| read_failed(err.to_string()))?;

    if is_json {
        serde_json::from_slice(&bytes).map_err(|err| read_failed(err.to_string()))
    } else {
        bincode::deserialize(&bytes).map_err(|err| read_failed(err.to_string()))
    }
}

fn compile(args: &Args) -> Result<(), CompileError> {
    let opts = BuildOptions {
        verbose: args.verbose,
        jobs: args.jobs,
        target: args.target.clone(),
    };

    let table = TargetTable::new();
    let targets = TargetManager::new(&table, opts.target_request())?;

    if args.list_targets {
        let lines = targets.list()?;

        return print_output(None, |dst| {
            for line in &lines {
                writeln!(dst, "{}", line)?;
            }
            Ok(())
        });
    }

    let file = args
        .file
        .as_ref()
        .ok_or_else(|| CompileError::InvalidArguments("no input file".to_string()))?;

    let metadata = load_metadata(file)?;

    let target = targets.target();
    info!("generating type info for target {}", target.detailed_name());

    let module = backend_rtti::generate_module(&metadata, target, &backend_rtti::Options::from(&opts))?;

    for (class, entry) in module.type_infos.to_sorted_vec() {
        if let Some(class_name) = metadata.class_name(class) {
            debug!("{} -> {}", class_name, entry.global);
        }
    }

    write_module(&module, &metadata, target, args.output.as_ref())
}

fn write_module(
    module: &RttiModule,
    metadata: &ir::Metadata,
    target: &Target,
    output: Option<&PathBuf>,
) -> Result<(), CompileError> {
    let output_ext = output.map(|path| get_extension(path)).unwrap_or_default();

    if output_ext.eq_ignore_ascii_case(C_EXT) {
        let c_opts = backend_c::Options {
            retain_used: target.strips_unreferenced_symbols(),
            comments: true,
        };
        let c_unit = backend_c::translate(&module.segment, metadata, c_opts);

        print_output(output, |dst| write!(dst, "{}", c_unit))
    } else if output_ext.eq_ignore_ascii_case(IR_LIB_EXT) {
        let segment_bytes = bincode::serialize(&module.segment)?;

        print_output(output, |dst| dst.write_all(&segment_bytes))
    } else {
        let listing = Listing {
            segment: &module.segment,
            metadata,
        };

        print_output(output, |dst| write!(dst, "{}", listing))
    }
}

// text listing naming functions by their metadata names
struct Listing<'a> {
    segment: &'a ir::DataSegment,
    metadata: &'a ir::Metadata,
}

impl<'a> fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ir::SegmentFormatter::new(self.segment)
            .with_metadata(self.metadata)
            .format_segment(f)
    }
}

fn print_output<F>(out_path: Option<&PathBuf>, f: F) -> Result<(), CompileError>
where
    F: FnOnce(&mut dyn io::Write) -> io::Result<()>,
{
    let dest;

    let io_result = match out_path {
        Some(out_path) => {
            let create_dirs = match out_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
                _ => Ok(()),
            };

            dest = out_path.display().to_string();

            create_dirs
                .and_then(|_| File::create(out_path))
                .and_then(|mut file| f(&mut file))
        },

        None => {
            let stdout = io::stdout();
            let mut stdout_lock = stdout.lock();

            dest = "stdout".to_string();

            f(&mut stdout_lock)
        },
    };

    io_result.map_err(|io_err| CompileError::OutputFailed(dest, io_err))
}

fn get_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn main() {
    let args: Args = Args::from_args();

    init_logging(args.verbose);

    if let Err(err) = compile(&args) {
        if let Err(output_err) = report_err(&err, Severity::Error) {
            eprintln!("error: {}", err);
            eprintln!("error reporting output: {}", output_err);
        }

        if args.backtrace {
            if let Some(bt) = err.backtrace() {
                eprintln!("{:?}", bt);
            }
        }

        process::exit(1)
    }
}
