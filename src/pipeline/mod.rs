//! The dump/restore pipeline: which commands run, and the process interface
//! that runs them.

pub mod command;
pub mod runner;

pub use command::{Pipeline, StageCommand, dump_switches};
pub use runner::{CommandRunner, PipelineOutput, ProcessRunner, StageOutcome};
