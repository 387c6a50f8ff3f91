mod assembler;
mod error;
mod layout;
mod member_table;
mod name_hash;
mod reflection;
mod registry;
mod static_data;
mod synthetic;
mod type_info;
mod vtable;

pub use assembler::*;
pub use error::*;
pub use layout::*;
pub use member_table::*;
pub use name_hash::*;
pub use reflection::*;
pub use registry::*;
pub use static_data::*;
pub use type_info::*;
pub use vtable::*;

use common::TracedError;
use crossbeam_channel::unbounded;
use ir_lang::dep_sort::sort_classes;
use ir_lang::ClassID;
use ir_lang::DataSegment;
use ir_lang::Metadata;
use parking_lot::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use target_desc::TargetFacts;
use tracing::debug;
use tracing::info;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// worker threads generating records. 0 or 1 generates on the calling thread
    pub jobs: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

impl From<&common::BuildOptions> for Options {
    fn from(opts: &common::BuildOptions) -> Self {
        Self { jobs: opts.jobs }
    }
}

/// Type info records of every class of a module
#[derive(Debug)]
pub struct RttiModule {
    pub segment: DataSegment,
    pub type_infos: TypeInfoMap,
}

pub fn generate_module<T>(metadata: &Metadata, target: &T, opts: &Options) -> RttiResult<RttiModule>
where
    T: TargetFacts + Sync,
{
    let classes = sort_classes(metadata).map_err(|err| TracedError::trace(RttiError::from(err)))?;

    info!("generating type info for {} classes", classes.len());

    let data = StaticData::new();
    let type_infos = TypeInfoMap::new();
    let builder = RttiBuilder::new(metadata, target, &data, &type_infos);

    for class in &classes {
        builder.declare_class(*class);
    }

    if opts.jobs > 1 && classes.len() > 1 {
        generate_parallel(&builder, &classes, opts.jobs)?;
    } else {
        for class in &classes {
            builder.generate_class(*class)?;
        }
    }

    let segment = data.into_segment();
    debug!("placed {} globals", segment.len());

    Ok(RttiModule { segment, type_infos })
}

fn generate_parallel(builder: &RttiBuilder, classes: &[ClassID], jobs: usize) -> RttiResult<()> {
    let (work_tx, work_rx) = unbounded();
    for class in classes {
        // the receiver is alive until the end of this function
        let _ = work_tx.send(*class);
    }
    drop(work_tx);

    let failed = AtomicBool::new(false);
    let first_err = Mutex::new(None);

    let workers = jobs.min(classes.len());
    debug!("generating on {} worker threads", workers);

    thread::scope(|scope| {
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let failed = &failed;
            let first_err = &first_err;

            scope.spawn(move || {
                for class in work_rx.iter() {
                    if failed.load(Ordering::Acquire) {
                        break;
                    }

                    if let Err(err) = builder.generate_class(class) {
                        failed.store(true, Ordering::Release);

                        let mut first_err = first_err.lock();
                        if first_err.is_none() {
                            *first_err = Some(err);
                        }
                        break;
                    }
                }
            });
        }
    });

    match first_err.into_inner() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test_util;
