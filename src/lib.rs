//! taggr — read and edit meta data embedded into audio files.
//!
//! The crate is organised in three layers:
//!
//! | Module    | Responsibility |
//! |-----------|---------------|
//! | [`cli`]   | Flag registry, slot validation, the single-assignment parse state machine, and the argument scanner that turns `argv` into an options value. |
//! | [`store`] | The narrow `TagStore` contract (`get` / `set` / `commit`), the lofty-backed file store, and the resolved-value snapshot used for display. |
//! | [`show`]  | Mode-based tag listing and the `%`-escape format renderer. |
//!
//! Typical call sequence: `FlagRegistry::new` → `parse_args` →
//! `AudioFileStore::open` → `apply_edits` → `resolve_values` → `show_tags`.

pub mod cli;
pub mod show;
pub mod store;

/// Program name used in help text and diagnostics.
pub const PROGRAM_NAME: &str = "taggr";

/// Crate version, surfaced in the manual footer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
