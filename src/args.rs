use std::path::PathBuf;
use structopt::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "rttigen")]
pub struct Args {
    /// class descriptors of the module, as JSON (.json) or binary metadata (.lib)
    #[structopt(name = "FILE", parse(from_os_str))]
    pub file: Option<PathBuf>,

    /// output file
    /// A .c file receives C source defining the generated data, a .lib file receives the binary
    /// data segment. Any other path, or no path, receives a text listing of the data.
    #[structopt(name = "OUTPUT", short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// name of the target to generate type info for, or "host"
    #[structopt(long = "target", short = "t")]
    pub target: Option<String>,

    /// print the targets this host can build for and exit
    #[structopt(long = "list-targets")]
    pub list_targets: bool,

    /// worker threads generating type info records
    #[structopt(long = "jobs", short = "j", default_value = "1")]
    pub jobs: usize,

    /// print the backtrace of the failure site on error
    #[structopt(long = "backtrace")]
    pub backtrace: bool,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}
