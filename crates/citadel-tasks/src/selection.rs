//! Selection table types and lookup

use std::fmt;

use crate::error::SelectionError;

/// Selection name that expands to every table entry
pub const ALL_SELECTION: &str = "all";

/// A selection as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every entry, in table order
    All,
    /// A single table key (validated at lookup time)
    Entry(String),
}

impl Selection {
    /// Parse a selection. The input is taken verbatim: no trimming and no
    /// case folding, so `" api"` and `"API"` are distinct unknown keys.
    pub fn parse(s: &str) -> Self {
        if s == ALL_SELECTION {
            Self::All
        } else {
            Self::Entry(s.to_string())
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SELECTION),
            Self::Entry(key) => f.write_str(key),
        }
    }
}

/// A program plus its discrete arguments, launched without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    /// Program to execute (looked up on PATH)
    pub program: String,
    /// Arguments passed as-is
    pub args: Vec<String>,
}

impl TestCommand {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `cargo test --package <package> --lib -- tests --nocapture`
    pub fn cargo_lib_tests(package: &str) -> Self {
        Self::new("cargo")
            .args(["test", "--package", package, "--lib"])
            .args(Self::TEST_FILTER)
    }

    /// `cargo test --package <package> --bin <bin> -- tests --nocapture`
    pub fn cargo_bin_tests(package: &str, bin: &str) -> Self {
        Self::new("cargo")
            .args(["test", "--package", package, "--bin", bin])
            .args(Self::TEST_FILTER)
    }

    /// Harness arguments shared by every citadel test command
    const TEST_FILTER: [&'static str; 3] = ["--", "tests", "--nocapture"];
}

impl fmt::Display for TestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One row of the selection table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    /// Selection key (e.g., "frontend")
    pub key: String,
    /// Short description shown in help output
    pub description: String,
    /// Command that runs this package's tests
    pub command: TestCommand,
}

impl SelectionEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, description: impl Into<String>, command: TestCommand) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            command,
        }
    }
}

/// Ordered, key-unique mapping from selection key to test command.
///
/// A table is immutable once built; dispatchers borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTable {
    entries: Vec<SelectionEntry>,
}

impl SelectionTable {
    /// Start building a table
    pub fn builder() -> SelectionTableBuilder {
        SelectionTableBuilder::default()
    }

    /// The citadel workspace table: api, frontend, middleend, backend, test-lang
    pub fn citadel() -> Self {
        Self {
            entries: vec![
                SelectionEntry::new(
                    "api",
                    "citadel api for devs",
                    TestCommand::cargo_lib_tests("api"),
                ),
                SelectionEntry::new(
                    "frontend",
                    "the compiler frontend (IR-gen)",
                    TestCommand::cargo_lib_tests("frontend"),
                ),
                SelectionEntry::new(
                    "middleend",
                    "the compiler middleend (Optimizer)",
                    TestCommand::cargo_lib_tests("middleend"),
                ),
                SelectionEntry::new(
                    "backend",
                    "the compiler backend (Machine code gen)",
                    TestCommand::cargo_lib_tests("backend"),
                ),
                SelectionEntry::new(
                    "test-lang",
                    "language for testing citadel",
                    TestCommand::cargo_bin_tests("test-lang", "test-lang"),
                ),
            ],
        }
    }

    /// Look up a single entry by exact key
    pub fn get(&self, key: &str) -> Option<&SelectionEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Resolve a selection to the entries it runs, in execution order
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<&SelectionEntry>, SelectionError> {
        match selection {
            Selection::All => Ok(self.entries.iter().collect()),
            Selection::Entry(key) => self
                .get(key)
                .map(|entry| vec![entry])
                .ok_or_else(|| SelectionError::UnknownSelection {
                    key: key.clone(),
                    valid: self.valid_selections(),
                }),
        }
    }

    /// Iterate entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Every accepted selection, including `all`
    pub fn valid_selections(&self) -> Vec<String> {
        self.keys()
            .map(str::to_string)
            .chain(std::iter::once(ALL_SELECTION.to_string()))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`SelectionTable`]
#[derive(Debug, Default)]
pub struct SelectionTableBuilder {
    entries: Vec<SelectionEntry>,
}

impl SelectionTableBuilder {
    /// Append an entry; order of calls is execution order under `all`
    pub fn entry(mut self, entry: SelectionEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate keys and build the table
    pub fn build(self) -> Result<SelectionTable, SelectionError> {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.key == ALL_SELECTION {
                return Err(SelectionError::ReservedSelection(entry.key.clone()));
            }
            if self.entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(SelectionError::DuplicateSelection(entry.key.clone()));
            }
        }

        Ok(SelectionTable {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(
            Selection::parse("frontend"),
            Selection::Entry("frontend".to_string())
        );
    }

    #[test]
    fn test_selection_parse_is_verbatim() {
        assert_eq!(Selection::parse("ALL"), Selection::Entry("ALL".to_string()));
        assert_eq!(
            Selection::parse(" api"),
            Selection::Entry(" api".to_string())
        );
    }

    #[test]
    fn test_citadel_table_order() {
        let table = SelectionTable::citadel();
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["api", "frontend", "middleend", "backend", "test-lang"]);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_citadel_commands() {
        let table = SelectionTable::citadel();
        assert_eq!(
            table.get("frontend").unwrap().command.to_string(),
            "cargo test --package frontend --lib -- tests --nocapture"
        );
        assert_eq!(
            table.get("test-lang").unwrap().command.to_string(),
            "cargo test --package test-lang --bin test-lang -- tests --nocapture"
        );
    }

    #[test]
    fn test_command_is_argument_vector() {
        let cmd = TestCommand::cargo_lib_tests("api");
        assert_eq!(cmd.program, "cargo");
        assert_eq!(
            cmd.args,
            vec!["test", "--package", "api", "--lib", "--", "tests", "--nocapture"]
        );
    }

    #[test]
    fn test_every_command_targets_one_package() {
        let table = SelectionTable::citadel();
        for entry in table.iter() {
            let packages = entry
                .command
                .args
                .iter()
                .filter(|a| a.as_str() == "--package")
                .count();
            assert_eq!(packages, 1, "{} should target exactly one package", entry.key);
            assert!(entry.command.args.contains(&entry.key));
        }
    }

    #[test]
    fn test_resolve_all_in_order() {
        let table = SelectionTable::citadel();
        let entries = table.resolve(&Selection::All).unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, table.keys().collect::<Vec<_>>());
    }

    #[test]
    fn test_resolve_single() {
        let table = SelectionTable::citadel();
        let entries = table.resolve(&Selection::parse("backend")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "backend");
    }

    #[test]
    fn test_resolve_unknown() {
        let table = SelectionTable::citadel();
        let err = table.resolve(&Selection::parse("bogus")).unwrap_err();
        match err {
            SelectionError::UnknownSelection { key, valid } => {
                assert_eq!(key, "bogus");
                assert_eq!(valid.last().map(String::as_str), Some("all"));
                assert_eq!(valid.len(), 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let result = SelectionTable::builder()
            .entry(SelectionEntry::new("a", "", TestCommand::new("true")))
            .entry(SelectionEntry::new("a", "", TestCommand::new("false")))
            .build();
        assert_eq!(
            result.unwrap_err(),
            SelectionError::DuplicateSelection("a".to_string())
        );
    }

    #[test]
    fn test_builder_rejects_all_key() {
        let result = SelectionTable::builder()
            .entry(SelectionEntry::new("all", "", TestCommand::new("true")))
            .build();
        assert_eq!(
            result.unwrap_err(),
            SelectionError::ReservedSelection("all".to_string())
        );
    }

    #[test]
    fn test_builder_preserves_order() {
        let table = SelectionTable::builder()
            .entry(SelectionEntry::new("z", "", TestCommand::new("true")))
            .entry(SelectionEntry::new("a", "", TestCommand::new("true")))
            .build()
            .unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert!(!table.is_empty());
    }
}
