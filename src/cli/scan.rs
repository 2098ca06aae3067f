//! The left-to-right argument scanner.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value carrying the resolved
//! [`Options`], the ordered warning list, and an `exit_early` marker set when
//! an informational flag (help, or an empty command line) was handled.
//!
//! For each leading token: a registry hit runs the flag's slots in order —
//! consuming and validating while optional rules allow, failing fatally on
//! the first mandatory miss — then dispatches its completion action; a
//! registry miss consumes exactly one token as the positional filename,
//! dash or no dash. Fatal errors abort immediately: no partial [`Options`]
//! ever escapes.

use crate::cli::error::ParseError;
use crate::cli::help;
use crate::cli::options::{Options, ShowMode};
use crate::cli::registry::{descriptor, FlagAction, FlagRegistry, FlagSpec, TagId, TAGS};
use crate::cli::slot::ArgSlot;
use crate::cli::state::{Attempt, ParseTracker, TagAttempt, Trigger};

/// Result of a successful scan.
#[derive(Debug)]
pub struct ParsedArgs {
    /// The resolved options. Meaningless when `exit_early` is set.
    pub options: Options,
    /// Non-fatal findings, in generation order. The caller prints these only
    /// after the whole token list was consumed successfully.
    pub warnings: Vec<String>,
    /// Set when an informational page was printed; the caller should exit 0
    /// without touching any file.
    pub exit_early: bool,
}

/// Whether scanning continues after a completion action.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    ExitEarly,
}

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args(registry: &FlagRegistry) -> Result<ParsedArgs, ParseError> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(registry, &argv)
}

/// Parse an explicit argument list. Callable from tests without touching
/// `std::env`.
pub fn parse_args_from(
    registry: &FlagRegistry,
    argv: &[String],
) -> Result<ParsedArgs, ParseError> {
    // A bare invocation is a request for the manual.
    if argv.is_empty() {
        help::print_options_manual(registry);
        return Ok(ParsedArgs {
            options: Options::new(),
            warnings: Vec::new(),
            exit_early: true,
        });
    }

    let mut tracker = ParseTracker::new();
    let mut options = Options::new();
    let mut warnings: Vec<String> = Vec::new();

    let mut rest: &[String] = argv;
    while let Some((token, tail)) = rest.split_first() {
        if let Some(spec) = registry.lookup(token) {
            let (values, remaining) = consume_slots(token, &spec.slots, tail)?;
            let flow = complete(
                registry,
                spec,
                token,
                &values,
                &mut tracker,
                &mut options,
                &mut warnings,
            )?;
            if flow == Flow::ExitEarly {
                return Ok(ParsedArgs {
                    options,
                    warnings,
                    exit_early: true,
                });
            }
            rest = remaining;
        } else {
            accept_filename(token, &mut tracker, &mut options, &mut warnings)?;
            rest = tail;
        }
    }

    if !tracker.file_committed() {
        return Err(ParseError::MissingFile);
    }

    // A run that neither edits nor displays anything would be a no-op;
    // default to showing the tags instead.
    if !options.show.enabled && !options.any_tag_edit() {
        options.show.enabled = true;
        options.show.mode = ShowMode::Default;
    }

    Ok(ParsedArgs {
        options,
        warnings,
        exit_early: false,
    })
}

/// Run `slots` against the tokens following a flag. Returns the consumed
/// values and the remaining tokens; consumption is per-slot, not fixed arity.
fn consume_slots<'a>(
    spelling: &str,
    slots: &[ArgSlot],
    mut rest: &'a [String],
) -> Result<(Vec<String>, &'a [String]), ParseError> {
    let mut values = Vec::new();
    for slot in slots {
        match rest.first() {
            None => {
                if !slot.optional {
                    return Err(too_few_arguments(spelling, slots));
                }
            }
            Some(token) => match slot.validate(token) {
                Ok(()) => {
                    values.push(token.clone());
                    rest = &rest[1..];
                }
                // An optional slot that rejects its token leaves the token
                // unconsumed for the next consumer.
                Err(error) => {
                    if !slot.optional {
                        return Err(error);
                    }
                }
            },
        }
    }
    Ok((values, rest))
}

fn too_few_arguments(spelling: &str, slots: &[ArgSlot]) -> ParseError {
    let mut pattern = spelling.to_owned();
    for slot in slots {
        pattern.push(' ');
        pattern.push_str(&slot.pattern);
    }
    ParseError::TooFewArguments {
        option: spelling.to_owned(),
        pattern,
    }
}

/// Dispatch a flag's completion action with its consumed slot values.
fn complete(
    registry: &FlagRegistry,
    spec: &FlagSpec,
    spelling: &str,
    values: &[String],
    tracker: &mut ParseTracker,
    options: &mut Options,
    warnings: &mut Vec<String>,
) -> Result<Flow, ParseError> {
    match spec.action {
        FlagAction::Help => {
            match values.first().map(String::as_str) {
                Some("show") => help::print_show_manual(registry),
                Some("examples") => help::print_examples_manual(),
                _ => help::print_options_manual(registry),
            }
            Ok(Flow::ExitEarly)
        }

        FlagAction::File => {
            if let Some(value) = values.first() {
                commit_file(value, tracker, options)?;
            }
            Ok(Flow::Continue)
        }

        FlagAction::ShowMode => {
            match tracker.attempt_show() {
                Attempt::First => {
                    options.show.enabled = true;
                    options.show.mode = values
                        .first()
                        .and_then(|keyword| ShowMode::from_keyword(keyword))
                        .unwrap_or(ShowMode::Default);
                }
                Attempt::Repeated => {
                    warnings.push("show mode already given (ignoring)".to_owned());
                }
                Attempt::Suppressed => {}
            }
            Ok(Flow::Continue)
        }

        FlagAction::ShowFormat => {
            match tracker.attempt_show() {
                Attempt::First => {
                    if let Some(template) = values.first() {
                        options.show.enabled = true;
                        options.show.mode = ShowMode::Custom;
                        options.show.format = template.clone();
                    }
                }
                Attempt::Repeated => {
                    warnings.push("show mode already given (ignoring)".to_owned());
                }
                Attempt::Suppressed => {}
            }
            Ok(Flow::Continue)
        }

        FlagAction::SetTag(id) => {
            if let Some(value) = values.first() {
                apply_trigger(id, Trigger::Set, value, spelling, tracker, options, warnings);
            }
            Ok(Flow::Continue)
        }

        FlagAction::ClearTag(id) => {
            apply_trigger(
                id,
                Trigger::Clear,
                zero_value(id),
                spelling,
                tracker,
                options,
                warnings,
            );
            Ok(Flow::Continue)
        }

        FlagAction::ClearAll => {
            for tag in TAGS.iter().filter(|d| d.mutable) {
                apply_trigger(
                    tag.id,
                    Trigger::Clear,
                    zero_value(tag.id),
                    spelling,
                    tracker,
                    options,
                    warnings,
                );
            }
            Ok(Flow::Continue)
        }
    }
}

/// The value a clear trigger stages.
fn zero_value(id: TagId) -> &'static str {
    if descriptor(id).integer {
        "0"
    } else {
        ""
    }
}

/// Drive one tag trigger through the state machine and stage, warn, or drop
/// accordingly.
fn apply_trigger(
    id: TagId,
    trigger: Trigger,
    value: &str,
    spelling: &str,
    tracker: &mut ParseTracker,
    options: &mut Options,
    warnings: &mut Vec<String>,
) {
    let tag = descriptor(id);
    match tracker.attempt_tag(id, trigger) {
        TagAttempt::First => {
            let edit = options.edit_mut(id);
            edit.set = true;
            edit.value = value.to_owned();
        }
        TagAttempt::Repeated => {
            let current = options.edit(id);
            warnings.push(format!(
                "tag '{}' already set, value remains '{}' (ignoring)",
                tag.long,
                display_value(tag.integer, &current.value)
            ));
        }
        TagAttempt::Suppressed => {}
        TagAttempt::Conflict => {
            // Neither trigger wins: drop the staged edit so the tag keeps
            // whatever the file already holds.
            *options.edit_mut(id) = Default::default();
            warnings.push(format!(
                "conflicting options for tag '{}' at '{}', old value is kept",
                tag.long, spelling
            ));
        }
    }
}

/// Integer zero is displayed as the empty string, matching the renderer.
fn display_value<'a>(integer: bool, value: &'a str) -> &'a str {
    if integer && value == "0" {
        ""
    } else {
        value
    }
}

/// Commit `value` as the filename via the file flag (no dash warning).
fn commit_file(
    value: &str,
    tracker: &mut ParseTracker,
    options: &mut Options,
) -> Result<(), ParseError> {
    match tracker.attempt_file() {
        Attempt::First => {
            options.filename = Some(value.to_owned());
            Ok(())
        }
        _ => Err(ParseError::FileAlreadySet {
            attempted: value.to_owned(),
            current: options.filename.clone().unwrap_or_default(),
        }),
    }
}

/// Positional fallback: any token that matches no flag spelling is the
/// filename. Dash-prefixed tokens are accepted but flagged once, since a
/// misspelled option would land here too.
fn accept_filename(
    token: &str,
    tracker: &mut ParseTracker,
    options: &mut Options,
    warnings: &mut Vec<String>,
) -> Result<(), ParseError> {
    if token.starts_with('-') {
        warnings.push(format!(
            "option '{token}' begins with a dash but is interpreted as a \
             file; to hide this warning use the --file option"
        ));
    }
    commit_file(token, tracker, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn parse(args: &[&str]) -> ParsedArgs {
        let registry = FlagRegistry::new();
        parse_args_from(&registry, &make_args(args)).expect("parse failed")
    }

    fn parse_err(args: &[&str]) -> ParseError {
        let registry = FlagRegistry::new();
        parse_args_from(&registry, &make_args(args)).expect_err("expected error")
    }

    // ── Filename resolution ──────────────────────────────────────────────────

    #[test]
    fn positional_filename() {
        let p = parse(&["song.mp3"]);
        assert_eq!(p.options.filename.as_deref(), Some("song.mp3"));
        assert!(p.warnings.is_empty());
    }

    #[test]
    fn file_flag() {
        let p = parse(&["--file", "song.mp3"]);
        assert_eq!(p.options.filename.as_deref(), Some("song.mp3"));
    }

    #[test]
    fn dash_token_becomes_filename_with_one_warning() {
        let p = parse(&["-unknownfile"]);
        assert_eq!(p.options.filename.as_deref(), Some("-unknownfile"));
        assert_eq!(p.warnings.len(), 1);
        assert!(p.warnings[0].contains("begins with a dash"));
        assert!(p.warnings[0].contains("--file"));
    }

    #[test]
    fn file_flag_argument_is_taken_verbatim_even_if_it_spells_a_flag() {
        // `-f -t` edits the file literally named "-t"; the file slot consumes
        // its value before the scanner can interpret it.
        let p = parse(&["-f", "-t"]);
        assert_eq!(p.options.filename.as_deref(), Some("-t"));
        assert!(p.warnings.is_empty());
    }

    #[test]
    fn file_flag_with_dash_file_then_more_flags() {
        let p = parse(&["-f", "-dashfile", "-k", "5"]);
        assert_eq!(p.options.filename.as_deref(), Some("-dashfile"));
        assert_eq!(p.options.edit(TagId::Track).value, "5");
    }

    #[test]
    fn second_filename_is_fatal() {
        let e = parse_err(&["a.mp3", "b.mp3"]);
        assert_eq!(
            e,
            ParseError::FileAlreadySet {
                attempted: "b.mp3".to_owned(),
                current: "a.mp3".to_owned(),
            }
        );
    }

    #[test]
    fn file_flag_after_positional_is_fatal() {
        let e = parse_err(&["a.mp3", "--file", "b.mp3"]);
        assert!(matches!(e, ParseError::FileAlreadySet { .. }));
    }

    #[test]
    fn repeating_the_same_filename_is_still_fatal() {
        let e = parse_err(&["a.mp3", "a.mp3"]);
        assert!(matches!(e, ParseError::FileAlreadySet { .. }));
    }

    #[test]
    fn missing_filename_is_fatal() {
        let e = parse_err(&["-t", "Song"]);
        assert_eq!(e, ParseError::MissingFile);
    }

    #[test]
    fn file_flag_without_value_is_fatal() {
        let e = parse_err(&["--file"]);
        assert_eq!(
            e,
            ParseError::TooFewArguments {
                option: "--file".to_owned(),
                pattern: "--file FILE".to_owned(),
            }
        );
    }

    // ── Tag edits and single assignment ──────────────────────────────────────

    #[test]
    fn set_tag_stages_an_edit() {
        let p = parse(&["song.mp3", "-t", "Song", "--artist", "Band"]);
        let title = p.options.edit(TagId::Title);
        assert!(title.set);
        assert_eq!(title.value, "Song");
        assert_eq!(p.options.edit(TagId::Artist).value, "Band");
        assert!(!p.options.edit(TagId::Album).set);
    }

    #[test]
    fn duplicate_set_keeps_first_value_and_warns_once() {
        let p = parse(&["song.mp3", "-t", "First", "-t", "Second"]);
        assert_eq!(p.options.edit(TagId::Title).value, "First");
        assert_eq!(p.warnings.len(), 1);
        assert!(p.warnings[0].contains("title"));
        assert!(p.warnings[0].contains("First"));
    }

    #[test]
    fn third_set_attempt_warns_no_further() {
        let p = parse(&["song.mp3", "-t", "A", "-t", "B", "-t", "C"]);
        assert_eq!(p.options.edit(TagId::Title).value, "A");
        assert_eq!(p.warnings.len(), 1);
    }

    #[test]
    fn clear_tag_stages_the_zero_value() {
        let p = parse(&["song.mp3", "--clear-genre", "--clear-track"]);
        let genre = p.options.edit(TagId::Genre);
        assert!(genre.set);
        assert_eq!(genre.value, "");
        let track = p.options.edit(TagId::Track);
        assert!(track.set);
        assert_eq!(track.value, "0");
    }

    #[test]
    fn set_then_clear_conflict_drops_the_edit_and_warns_once() {
        let p = parse(&["song.mp3", "-t", "Song", "--clear-title"]);
        let title = p.options.edit(TagId::Title);
        assert!(!title.set);
        assert_eq!(title.value, "");
        let conflicts: Vec<_> = p
            .warnings
            .iter()
            .filter(|w| w.contains("conflicting"))
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].contains("title"));
    }

    #[test]
    fn clear_then_set_conflict_is_symmetric() {
        let p = parse(&["song.mp3", "--clear-year", "-y", "1999"]);
        assert!(!p.options.edit(TagId::Year).set);
        assert_eq!(p.warnings.len(), 1);
        assert!(p.warnings[0].contains("year"));
    }

    #[test]
    fn no_further_warnings_after_a_conflict() {
        let p = parse(&[
            "song.mp3",
            "-t",
            "Song",
            "--clear-title",
            "-t",
            "Again",
            "--clear-title",
        ]);
        assert!(!p.options.edit(TagId::Title).set);
        assert_eq!(p.warnings.len(), 1);
    }

    #[test]
    fn duplicate_clear_reports_empty_remaining_value() {
        let p = parse(&["song.mp3", "--clear-track", "--clear-track"]);
        assert_eq!(p.warnings.len(), 1);
        // Integer zero reads back as the empty string, never "0".
        assert!(p.warnings[0].contains("value remains ''"));
    }

    // ── Aggregate clear ──────────────────────────────────────────────────────

    #[test]
    fn clear_all_stages_every_mutable_tag() {
        let p = parse(&["song.mp3", "--clear"]);
        for tag in TAGS.iter().filter(|d| d.mutable) {
            let edit = p.options.edit(tag.id);
            assert!(edit.set, "tag {} not cleared", tag.long);
            assert_eq!(edit.value, if tag.integer { "0" } else { "" });
        }
        assert!(p.warnings.is_empty());
    }

    #[test]
    fn clear_all_conflicts_with_a_prior_set_for_that_tag_only() {
        let p = parse(&["song.mp3", "-t", "Song", "--clear"]);
        assert!(!p.options.edit(TagId::Title).set);
        for tag in TAGS.iter().filter(|d| d.mutable && d.id != TagId::Title) {
            assert!(p.options.edit(tag.id).set, "tag {} not cleared", tag.long);
        }
        let conflicts: Vec<_> = p
            .warnings
            .iter()
            .filter(|w| w.contains("conflicting"))
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].contains("title"));
    }

    #[test]
    fn clear_all_twice_warns_once_per_tag() {
        let p = parse(&["song.mp3", "--clear", "--clear"]);
        assert_eq!(
            p.warnings.len(),
            TAGS.iter().filter(|d| d.mutable).count()
        );
        let p = parse(&["song.mp3", "--clear", "--clear", "--clear"]);
        assert_eq!(
            p.warnings.len(),
            TAGS.iter().filter(|d| d.mutable).count()
        );
    }

    // ── Show selection ───────────────────────────────────────────────────────

    #[test]
    fn show_without_mode_defaults() {
        let p = parse(&["song.mp3", "-s"]);
        assert!(p.options.show.enabled);
        assert_eq!(p.options.show.mode, ShowMode::Default);
    }

    #[test]
    fn show_with_mode() {
        let p = parse(&["song.mp3", "-s", "technical"]);
        assert_eq!(p.options.show.mode, ShowMode::Technical);
    }

    #[test]
    fn show_mode_token_that_is_no_mode_is_left_for_the_filename() {
        let p = parse(&["-s", "song.mp3"]);
        assert_eq!(p.options.show.mode, ShowMode::Default);
        assert_eq!(p.options.filename.as_deref(), Some("song.mp3"));
    }

    #[test]
    fn second_show_selection_warns_once_then_silence() {
        let p = parse(&["song.mp3", "-s", "simple", "-s", "full", "-s"]);
        assert_eq!(p.options.show.mode, ShowMode::Simple);
        assert_eq!(p.warnings.len(), 1);
        assert!(p.warnings[0].contains("show mode already given"));
    }

    #[test]
    fn show_format_stores_the_raw_template() {
        let p = parse(&["song.mp3", "--show-format", "%t - %r"]);
        assert_eq!(p.options.show.mode, ShowMode::Custom);
        assert_eq!(p.options.show.format, "%t - %r");
    }

    #[test]
    fn show_format_and_show_share_one_key() {
        let p = parse(&["song.mp3", "--show-format", "%t", "-s", "full"]);
        assert_eq!(p.options.show.mode, ShowMode::Custom);
        assert_eq!(p.warnings.len(), 1);
        let p = parse(&["song.mp3", "-s", "full", "--show-format", "%t"]);
        assert_eq!(p.options.show.mode, ShowMode::Full);
        assert_eq!(p.warnings.len(), 1);
    }

    #[test]
    fn show_format_without_template_is_fatal() {
        let e = parse_err(&["song.mp3", "--show-format"]);
        assert!(matches!(e, ParseError::TooFewArguments { .. }));
    }

    // ── Default display rule ─────────────────────────────────────────────────

    #[test]
    fn bare_filename_defaults_to_showing_tags() {
        let p = parse(&["song.mp3"]);
        assert!(p.options.show.enabled);
        assert_eq!(p.options.show.mode, ShowMode::Default);
    }

    #[test]
    fn edits_without_show_do_not_display() {
        let p = parse(&["song.mp3", "-t", "Song"]);
        assert!(!p.options.show.enabled);
    }

    // ── Integer slot validation ──────────────────────────────────────────────

    #[test]
    fn non_numeric_track_is_fatal() {
        let e = parse_err(&["song.mp3", "-k", "abc"]);
        assert_eq!(e, ParseError::NotAnInteger("abc".to_owned()));
    }

    #[test]
    fn zero_track_violates_the_condition() {
        let e = parse_err(&["song.mp3", "-k", "0"]);
        assert_eq!(
            e,
            ParseError::NumberCondition {
                value: 0,
                condition: "x > 0",
            }
        );
    }

    #[test]
    fn negative_year_violates_the_condition() {
        let e = parse_err(&["song.mp3", "--year", "-3"]);
        assert_eq!(
            e,
            ParseError::NumberCondition {
                value: -3,
                condition: "x > 0",
            }
        );
    }

    #[test]
    fn missing_track_value_is_fatal() {
        let e = parse_err(&["song.mp3", "-k"]);
        assert_eq!(
            e,
            ParseError::TooFewArguments {
                option: "-k".to_owned(),
                pattern: "-k TRACK".to_owned(),
            }
        );
    }

    // ── Warnings survive only successful scans ───────────────────────────────

    #[test]
    fn fatal_error_returns_no_partial_result() {
        let registry = FlagRegistry::new();
        let result = parse_args_from(
            &registry,
            &make_args(&["song.mp3", "-t", "A", "-t", "B", "-k", "abc"]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn warnings_are_ordered_by_encounter() {
        let p = parse(&["song.mp3", "-t", "A", "-t", "B", "-s", "full", "-s"]);
        assert_eq!(p.warnings.len(), 2);
        assert!(p.warnings[0].contains("title"));
        assert!(p.warnings[1].contains("show mode"));
    }

    // ── Early exit ───────────────────────────────────────────────────────────

    #[test]
    fn empty_argv_exits_early() {
        let p = parse(&[]);
        assert!(p.exit_early);
    }

    #[test]
    fn help_flag_exits_early_without_filename() {
        let p = parse(&["--help"]);
        assert!(p.exit_early);
    }

    #[test]
    fn help_mid_scan_stops_processing() {
        // The trailing bogus token is never reached, so no error surfaces.
        let p = parse(&["-h", "examples", "-k", "notanumber"]);
        assert!(p.exit_early);
    }

    #[test]
    fn help_with_unknown_page_shows_the_main_manual() {
        // "bogus" fails the optional page slot, is left unconsumed, and the
        // scan stops at the help action anyway.
        let p = parse(&["--help", "bogus"]);
        assert!(p.exit_early);
    }
}
