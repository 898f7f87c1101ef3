//! Child process launching

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::selection::TestCommand;

/// How a launched command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Exit code, `None` if the child was terminated by a signal
    pub exit_code: Option<i32>,
}

impl LaunchOutcome {
    /// Outcome with the given exit code
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    /// Whether the child exited with status 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Starts a test command and blocks until it exits
pub trait Launcher {
    /// Run the command to completion
    fn launch(&self, command: &TestCommand) -> io::Result<LaunchOutcome>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn launch(&self, command: &TestCommand) -> io::Result<LaunchOutcome> {
        (**self).launch(command)
    }
}

/// Launches real child processes with inherited stdio.
///
/// Output is streamed live: the child writes straight to the caller's
/// terminal, stdout and stderr interleaved as produced, nothing appended.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    current_dir: Option<PathBuf>,
}

impl ProcessLauncher {
    /// Create a launcher that runs in the current directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Run children in the given directory
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &TestCommand) -> io::Result<LaunchOutcome> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status()?;
        Ok(LaunchOutcome {
            exit_code: status.code(),
        })
    }
}

/// Launcher that records commands instead of running them (useful for testing)
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launched: Mutex<Vec<TestCommand>>,
    exit_codes: HashMap<String, i32>,
    missing_programs: Vec<String>,
}

impl RecordingLauncher {
    /// Create a launcher where every command exits 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the exit code for any command whose rendered form equals `command`
    pub fn with_exit_code(mut self, command: impl Into<String>, code: i32) -> Self {
        self.exit_codes.insert(command.into(), code);
        self
    }

    /// Fail to spawn any command running `program`
    pub fn with_missing_program(mut self, program: impl Into<String>) -> Self {
        self.missing_programs.push(program.into());
        self
    }

    /// Commands launched so far, in launch order
    pub fn launched(&self) -> Vec<TestCommand> {
        self.launched.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, command: &TestCommand) -> io::Result<LaunchOutcome> {
        self.launched.lock().unwrap().push(command.clone());

        if self.missing_programs.contains(&command.program) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", command.program),
            ));
        }

        let code = self
            .exit_codes
            .get(&command.to_string())
            .copied()
            .unwrap_or(0);
        Ok(LaunchOutcome::exited(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success() {
        assert!(LaunchOutcome::exited(0).success());
        assert!(!LaunchOutcome::exited(101).success());
        assert!(!LaunchOutcome { exit_code: None }.success());
    }

    #[test]
    fn test_recording_launcher_records_in_order() {
        let launcher = RecordingLauncher::new();
        launcher.launch(&TestCommand::new("first")).unwrap();
        launcher.launch(&TestCommand::new("second").arg("x")).unwrap();

        let launched = launcher.launched();
        assert_eq!(launched.len(), 2);
        assert_eq!(launched[0].program, "first");
        assert_eq!(launched[1].to_string(), "second x");
    }

    #[test]
    fn test_recording_launcher_scripted_failures() {
        let launcher = RecordingLauncher::new()
            .with_exit_code("cargo test", 101)
            .with_missing_program("nope");

        let outcome = launcher
            .launch(&TestCommand::new("cargo").arg("test"))
            .unwrap();
        assert_eq!(outcome.exit_code, Some(101));

        let err = launcher.launch(&TestCommand::new("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(launcher.launched().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_process_launcher_reports_exit_code() {
        let launcher = ProcessLauncher::new();
        let outcome = launcher
            .launch(&TestCommand::new("sh").args(["-c", "exit 3"]))
            .unwrap();
        assert_eq!(outcome.exit_code, Some(3));
        assert!(!outcome.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_launcher_does_not_use_a_shell() {
        let temp = tempfile::TempDir::new().unwrap();
        let launcher = ProcessLauncher::new().with_current_dir(temp.path());

        // `;` reaches touch as a literal file name instead of separating commands
        let outcome = launcher
            .launch(&TestCommand::new("touch").args(["a;b"]))
            .unwrap();
        assert!(outcome.success());
        assert!(temp.path().join("a;b").exists());
        assert!(!temp.path().join("b").exists());
    }

    #[test]
    fn test_process_launcher_missing_program() {
        let launcher = ProcessLauncher::new();
        let err = launcher
            .launch(&TestCommand::new("citadel-test-definitely-not-installed"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
