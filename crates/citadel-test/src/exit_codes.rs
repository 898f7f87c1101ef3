//! Exit codes for the CLI

/// Success (also used when a dispatched test command fails)
pub const SUCCESS: i32 = 0;

/// General error, including an unknown selection
pub const ERROR: i32 = 1;

/// Missing or malformed command-line arguments
pub const USAGE_ERROR: i32 = 2;
