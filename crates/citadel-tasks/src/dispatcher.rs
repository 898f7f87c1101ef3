//! Command dispatcher — resolves a selection and runs its commands in order

use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::launcher::Launcher;
use crate::reporter::{DispatchEvent, DispatchReporter};
use crate::selection::{Selection, SelectionTable};

/// A command launched during a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    /// Selection key the command belongs to
    pub key: String,
    /// Rendered command line
    pub command: String,
    /// Exit code; `None` if killed by a signal or never started
    pub exit_code: Option<i32>,
    /// Whether the process was started at all
    pub spawned: bool,
}

/// What a dispatch did, in launch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub launched: Vec<LaunchRecord>,
}

/// Runs the commands of a [`SelectionTable`] through a [`Launcher`].
///
/// Commands run strictly one after another. A child's exit status is
/// reported but never stops the remaining commands and never turns into
/// an error.
pub struct Dispatcher<'t, L> {
    table: &'t SelectionTable,
    launcher: L,
    reporter: Arc<dyn DispatchReporter>,
}

impl<'t, L: Launcher> Dispatcher<'t, L> {
    /// Create a new dispatcher over a borrowed table
    pub fn new(table: &'t SelectionTable, launcher: L, reporter: Arc<dyn DispatchReporter>) -> Self {
        Self {
            table,
            launcher,
            reporter,
        }
    }

    /// The table this dispatcher resolves against
    pub fn table(&self) -> &SelectionTable {
        self.table
    }

    /// Run `selection`: one command for a key, every command for `all`.
    ///
    /// Fails with [`SelectionError::UnknownSelection`](crate::SelectionError::UnknownSelection)
    /// before launching anything when the selection is not in the table.
    pub fn run(&self, selection: &str) -> Result<DispatchSummary> {
        let selection = Selection::parse(selection);
        let entries = self.table.resolve(&selection)?;

        tracing::debug!(
            "Dispatching '{}' ({} command{})",
            selection,
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );

        let mut summary = DispatchSummary::default();

        for entry in entries {
            let command = entry.command.to_string();
            self.reporter.report(&DispatchEvent::Started {
                key: entry.key.clone(),
                command: command.clone(),
            });

            let start = Instant::now();
            let record = match self.launcher.launch(&entry.command) {
                Ok(outcome) => {
                    self.reporter.report(&DispatchEvent::Finished {
                        key: entry.key.clone(),
                        exit_code: outcome.exit_code,
                        duration: start.elapsed(),
                    });
                    LaunchRecord {
                        key: entry.key.clone(),
                        command,
                        exit_code: outcome.exit_code,
                        spawned: true,
                    }
                }
                Err(e) => {
                    self.reporter.report(&DispatchEvent::SpawnFailed {
                        key: entry.key.clone(),
                        command: command.clone(),
                        error: e.to_string(),
                    });
                    LaunchRecord {
                        key: entry.key.clone(),
                        command,
                        exit_code: None,
                        spawned: false,
                    }
                }
            };

            summary.launched.push(record);
        }

        Ok(summary)
    }
}
