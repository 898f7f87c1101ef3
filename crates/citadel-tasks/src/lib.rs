//! Citadel Tasks - Test selection and dispatch
//!
//! This crate maps selection names (`api`, `frontend`, ...) to the test
//! command of a single workspace package and runs them one at a time.

pub mod dispatcher;
pub mod error;
pub mod launcher;
pub mod reporter;
pub mod selection;

pub use dispatcher::{DispatchSummary, Dispatcher, LaunchRecord};
pub use error::{DispatchError, Result, SelectionError};
pub use launcher::{LaunchOutcome, Launcher, ProcessLauncher, RecordingLauncher};
pub use reporter::{CollectingReporter, DispatchEvent, DispatchReporter, TracingReporter};
pub use selection::{
    Selection, SelectionEntry, SelectionTable, SelectionTableBuilder, TestCommand, ALL_SELECTION,
};
