//! Fatal argument-parsing errors.
//!
//! Every variant aborts the scan immediately; no partially filled
//! [`Options`](crate::cli::options::Options) is ever returned alongside one of
//! these. Non-fatal conditions (duplicate settings, set/clear conflicts) are
//! reported as ordered warning strings instead and never appear here.

use thiserror::Error;

/// A fatal error raised while scanning the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An integer slot received a token that does not parse as an integer.
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    /// An integer slot value violated its named numeric condition.
    #[error("number '{value}' does not match condition '{condition}'")]
    NumberCondition { value: i64, condition: &'static str },

    /// A choice slot received a token outside its candidate set.
    #[error("argument '{value}' does not match one of [{allowed}]")]
    NotACandidate { value: String, allowed: String },

    /// A mandatory slot had no token left to consume, or its token failed
    /// validation with nothing to fall back to.
    #[error("too few arguments in option '{option}', pattern is: {pattern}")]
    TooFewArguments { option: String, pattern: String },

    /// A second filename was supplied after one was already committed.
    #[error(
        "attempting to use file '{attempted}', but file is already set to \
         '{current}' (make sure you didn't misspell an option)"
    )]
    FileAlreadySet { attempted: String, current: String },

    /// The whole command line was consumed without resolving a filename.
    #[error(
        "the tool can't be run without an audio file, specify it in the \
         arguments (file needed)"
    )]
    MissingFile,
}
