//! Command-line interface for the `taggr` binary.
//!
//! This module organises the full parsing pipeline:
//!
//! | Submodule    | Responsibility |
//! |--------------|---------------|
//! | [`registry`] | Immutable tag/flag tables: `TagId`, the static descriptor array, flag spellings, and the closed `FlagAction` dispatch set. |
//! | [`slot`]     | Per-argument-slot validation (free text, bounded integer, enumerated choice). |
//! | [`state`]    | The `Parse`/`Reparse`/`Ignore` tri-state machine enforcing single assignment and set/clear conflict detection. |
//! | [`options`]  | The accumulated parse result: filename, show configuration, staged tag edits. |
//! | [`scan`]     | The left-to-right argument scanner producing a `ParsedArgs` value. |
//! | [`error`]    | Fatal parse error kinds. |
//! | [`console`]  | `WARN`/`ERR` output on stderr with terminal-gated ANSI styling. |
//! | [`help`]     | The three manual pages (options, show, examples). |
//!
//! Typical call sequence: `FlagRegistry::new` → `parse_args` → dispatch on the
//! returned options.

pub mod console;
pub mod error;
pub mod help;
pub mod options;
pub mod registry;
pub mod scan;
pub mod slot;
pub mod state;
