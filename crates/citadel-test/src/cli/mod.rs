//! CLI definition and command handling

pub mod output;

use std::ffi::OsString;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches, Parser};

use citadel_tasks::{Dispatcher, ProcessLauncher, SelectionTable, TracingReporter};

/// Run the tests of one citadel package, or of all of them
#[derive(Debug, Parser)]
#[command(name = "citadel-test")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package to test, or `all`
    pub selection: String,
}

impl Cli {
    /// Clap command with the selection menu from `table` as trailing help
    pub fn command_for(table: &SelectionTable) -> clap::Command {
        Self::command().after_help(output::selection_menu(table))
    }

    /// Parse arguments against `table`'s help text
    pub fn try_parse_for<I, T>(table: &SelectionTable, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command_for(table);
        let matches = command.try_get_matches_from_mut(args)?;
        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
    }

    /// Execute the CLI command
    pub fn execute(&self, table: &SelectionTable) -> anyhow::Result<()> {
        let dispatcher = Dispatcher::new(table, ProcessLauncher::new(), Arc::new(TracingReporter));
        let summary = dispatcher.run(&self.selection)?;

        tracing::debug!(
            "Dispatched {} command{} for '{}'",
            summary.launched.len(),
            if summary.launched.len() == 1 { "" } else { "s" },
            self.selection
        );

        Ok(())
    }
}
