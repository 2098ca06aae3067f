// e2e/parse_pipeline.rs — end-to-end pipeline tests.
//
// Drives the full chain (scan → apply edits → resolve values → render)
// against the in-memory store, plus black-box runs of the `taggr` binary via
// std::process::Command for the exit-code contract.

use std::process::Command;

use taggr::cli::options::ShowMode;
use taggr::cli::registry::{FlagRegistry, TagId};
use taggr::cli::scan::parse_args_from;
use taggr::show::format::render;
use taggr::show::mode_lines;
use taggr::store::memory::MemoryStore;
use taggr::store::{apply_edits, resolve_values, TagStore, TagValue};

fn make_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Parse `args`, apply the staged edits to `store`, and return the rendered
/// output of the selected display mode.
fn run_pipeline(store: &mut MemoryStore, args: &[&str]) -> (Vec<String>, String) {
    let registry = FlagRegistry::new();
    let parsed = parse_args_from(&registry, &make_args(args)).expect("parse failed");
    assert!(!parsed.exit_early);
    apply_edits(store, &parsed.options).expect("apply failed");
    let values = resolve_values(store);
    let output = if parsed.options.show.mode == ShowMode::Custom {
        render(&parsed.options.show.format, &values)
    } else {
        mode_lines(&values, parsed.options.show.mode).join("\n")
    };
    (parsed.warnings, output)
}

// ── 1. Edit then render with a custom format ──────────────────────────────────

#[test]
fn set_tags_and_render_custom_format() {
    let mut store = MemoryStore::new();
    let (warnings, output) = run_pipeline(
        &mut store,
        &[
            "song.mp3",
            "-t",
            "Song",
            "-r",
            "Band",
            "--show-format",
            "%t - %r",
        ],
    );
    assert!(warnings.is_empty());
    assert_eq!(output, "Song - Band");
    assert_eq!(store.get(TagId::Title), TagValue::Text("Song".to_owned()));
    assert_eq!(store.commit_count(), 1);
}

// ── 2. Conflict keeps the stored value ────────────────────────────────────────

#[test]
fn set_clear_conflict_leaves_the_store_untouched() {
    let mut store = MemoryStore::new();
    store.set(TagId::Title, TagValue::Text("Old Title".to_owned()));

    let (warnings, output) = run_pipeline(
        &mut store,
        &["song.mp3", "-t", "New", "--clear-title", "--show-format", "%t"],
    );
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("conflicting"));
    assert_eq!(output, "Old Title");
    assert_eq!(store.commit_count(), 0);
}

// ── 3. Aggregate clear spares only the conflicted tag ─────────────────────────

#[test]
fn clear_all_after_set_clears_everything_but_the_conflicted_tag() {
    let mut store = MemoryStore::new();
    store.set(TagId::Title, TagValue::Text("Keep Me".to_owned()));
    store.set(TagId::Album, TagValue::Text("Gone".to_owned()));
    store.set(TagId::Track, TagValue::Number(9));

    let (warnings, output) = run_pipeline(
        &mut store,
        &["song.mp3", "-t", "New", "--clear", "--show-format", "%t|%l|%k"],
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(output, "Keep Me||");
}

// ── 4. First write wins through to the store ──────────────────────────────────

#[test]
fn duplicate_assignments_commit_the_first_value() {
    let mut store = MemoryStore::new();
    let (warnings, output) = run_pipeline(
        &mut store,
        &["song.mp3", "-y", "1999", "-y", "2005", "--show-format", "%y"],
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(output, "1999");
    assert_eq!(store.get(TagId::Year), TagValue::Number(1999));
}

// ── 5. Default mode listing on a bare filename ────────────────────────────────

#[test]
fn bare_filename_lists_default_mode() {
    let mut store = MemoryStore::new();
    store.set(TagId::Artist, TagValue::Text("Band".to_owned()));
    let (warnings, output) = run_pipeline(&mut store, &["song.mp3"]);
    assert!(warnings.is_empty());
    assert!(output.contains(" Artist: Band"));
    // Zero-valued integer tags render blank, never "0".
    assert!(output.contains("  Track: \n"));
    assert!(output.ends_with("Year: "));
    assert_eq!(store.commit_count(), 0);
}

// ── 6. Binary exit codes ──────────────────────────────────────────────────────

fn taggr_bin() -> &'static str {
    env!("CARGO_BIN_EXE_taggr")
}

#[test]
fn bare_invocation_prints_the_manual_and_exits_zero() {
    let output = Command::new(taggr_bin())
        .output()
        .expect("failed to run taggr");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
}

#[test]
fn help_flag_exits_zero() {
    let output = Command::new(taggr_bin())
        .arg("--help")
        .output()
        .expect("failed to run taggr");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Options"));
}

#[test]
fn help_show_page_lists_the_escape_table() {
    let output = Command::new(taggr_bin())
        .args(["--help", "show"])
        .output()
        .expect("failed to run taggr");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("%%"));
    assert!(stdout.contains("Samplerate"));
}

#[test]
fn fatal_parse_error_exits_nonzero_on_stderr() {
    let output = Command::new(taggr_bin())
        .args(["song.mp3", "-k", "abc"])
        .output()
        .expect("failed to run taggr");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not an integer"));
    // The manual pointer goes to stdout.
    assert!(String::from_utf8_lossy(&output.stdout).contains("--help"));
}

#[test]
fn missing_filename_exits_nonzero() {
    let output = Command::new(taggr_bin())
        .args(["-t", "Song"])
        .output()
        .expect("failed to run taggr");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("audio file"));
}

#[test]
fn unreadable_file_exits_nonzero_after_warnings() {
    // A dash-prefixed unknown token is accepted as the filename with one
    // warning; opening it then fails.
    let output = Command::new(taggr_bin())
        .arg("-no-such-file.mp3")
        .output()
        .expect("failed to run taggr");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("begins with a dash"));
    assert!(stderr.contains("unable to"));
}
