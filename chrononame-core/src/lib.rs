#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod executor;
pub mod log;
pub mod namer;
pub mod operations;
pub mod preview;
pub mod report;
pub mod resolver;
pub mod rollback;
pub mod scanner;

pub use config::Config;
pub use executor::{execute_plan, ConflictNote, ExecutionReport, LogWriteError};
pub use log::{LogAction, LogRecord, LogStore, LOG_FILE_NAME};
pub use namer::{format_stamp, synthesize};
pub use operations::{execute_operation, plan_operation, resolve_target, rollback_operation};
pub use preview::render_plan;
pub use report::{ExecuteResult, OutputFormat, OutputFormatter, PlanResult, RollbackResult};
pub use resolver::{choose, resolve, FileEntry, FileTimes};
pub use rollback::{rollback_last_batch, RollbackReport};
pub use scanner::{build_plan, Plan, PlanOptions, RenameOperation};
