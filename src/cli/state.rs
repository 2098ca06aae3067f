//! The per-key single-assignment state machine.
//!
//! Every logical setting (the filename, the show selection, and each mutable
//! tag's set and clear triggers) owns one [`ParseState`] slot. States only
//! move forward: `Parse` → `Reparse` → `Ignore`. The first commit attempt
//! applies, the second warns exactly once, everything after is silently
//! dropped — first write wins without warning spam.
//!
//! The set and clear triggers of one tag share the value but not the state:
//! they occupy two independent slots, and crossing from one to the other is a
//! conflict rather than a duplicate (see [`ParseTracker::attempt_tag`]).

use crate::cli::registry::TagId;

/// How many times a setting has been attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// Never attempted; the next attempt applies.
    #[default]
    Parse,
    /// Applied once; the next attempt is rejected with a warning.
    Reparse,
    /// Rejected once already; further attempts are silent.
    Ignore,
}

/// Outcome of one single-assignment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// First attempt: apply the value.
    First,
    /// Second attempt: keep the existing value, warn once.
    Repeated,
    /// Later attempt: keep the existing value, stay quiet.
    Suppressed,
}

/// Advance one state by one attempt. Pure; the only transition function.
pub fn advance(state: ParseState) -> (ParseState, Attempt) {
    match state {
        ParseState::Parse => (ParseState::Reparse, Attempt::First),
        ParseState::Reparse => (ParseState::Ignore, Attempt::Repeated),
        ParseState::Ignore => (ParseState::Ignore, Attempt::Suppressed),
    }
}

/// Which of a tag's two triggers is firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Set,
    Clear,
}

/// Outcome of a tag trigger attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAttempt {
    /// First attempt on this trigger: apply.
    First,
    /// Same trigger repeated: keep the value, warn once.
    Repeated,
    /// Same trigger repeated again, or any attempt after a conflict: silent.
    Suppressed,
    /// The opposite trigger already fired: drop the tag's staged edit, warn
    /// once, and silence both triggers for the rest of the run.
    Conflict,
}

/// Per-run state table, one slot per logical key. Created fresh for every
/// invocation and discarded with it.
#[derive(Debug)]
pub struct ParseTracker {
    file: ParseState,
    show: ParseState,
    set: [ParseState; TagId::COUNT],
    clear: [ParseState; TagId::COUNT],
}

impl ParseTracker {
    pub fn new() -> Self {
        ParseTracker {
            file: ParseState::Parse,
            show: ParseState::Parse,
            set: [ParseState::Parse; TagId::COUNT],
            clear: [ParseState::Parse; TagId::COUNT],
        }
    }

    /// Attempt to commit the filename.
    pub fn attempt_file(&mut self) -> Attempt {
        let (next, attempt) = advance(self.file);
        self.file = next;
        attempt
    }

    /// Whether a filename was committed at some point during the scan.
    pub fn file_committed(&self) -> bool {
        self.file != ParseState::Parse
    }

    /// Attempt to commit the show selection. `--show` and `--show-format`
    /// share this one key: whichever appears first wins.
    pub fn attempt_show(&mut self) -> Attempt {
        let (next, attempt) = advance(self.show);
        self.show = next;
        attempt
    }

    /// Attempt `trigger` on `id`.
    ///
    /// Conflict rule: if this trigger is still untouched while the opposite
    /// trigger has already fired, neither wins — both slots jump to `Ignore`
    /// and the caller must discard the staged edit. Evaluated in strict
    /// encounter order, so the conflict fires on the second, *different*
    /// trigger only.
    pub fn attempt_tag(&mut self, id: TagId, trigger: Trigger) -> TagAttempt {
        let index = id.index();
        let (current, other) = match trigger {
            Trigger::Set => (self.set[index], self.clear[index]),
            Trigger::Clear => (self.clear[index], self.set[index]),
        };

        if current == ParseState::Parse && other != ParseState::Parse {
            self.set[index] = ParseState::Ignore;
            self.clear[index] = ParseState::Ignore;
            return TagAttempt::Conflict;
        }

        let (next, attempt) = advance(current);
        match trigger {
            Trigger::Set => self.set[index] = next,
            Trigger::Clear => self.clear[index] = next,
        }
        match attempt {
            Attempt::First => TagAttempt::First,
            Attempt::Repeated => TagAttempt::Repeated,
            Attempt::Suppressed => TagAttempt::Suppressed,
        }
    }
}

impl Default for ParseTracker {
    fn default() -> Self {
        ParseTracker::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── advance ──────────────────────────────────────────────────────────────

    #[test]
    fn states_move_forward_only() {
        assert_eq!(
            advance(ParseState::Parse),
            (ParseState::Reparse, Attempt::First)
        );
        assert_eq!(
            advance(ParseState::Reparse),
            (ParseState::Ignore, Attempt::Repeated)
        );
        assert_eq!(
            advance(ParseState::Ignore),
            (ParseState::Ignore, Attempt::Suppressed)
        );
    }

    // ── single assignment ────────────────────────────────────────────────────

    #[test]
    fn file_first_write_wins_then_warns_then_silent() {
        let mut tracker = ParseTracker::new();
        assert!(!tracker.file_committed());
        assert_eq!(tracker.attempt_file(), Attempt::First);
        assert!(tracker.file_committed());
        assert_eq!(tracker.attempt_file(), Attempt::Repeated);
        assert_eq!(tracker.attempt_file(), Attempt::Suppressed);
        assert_eq!(tracker.attempt_file(), Attempt::Suppressed);
    }

    #[test]
    fn show_triggers_share_one_key() {
        let mut tracker = ParseTracker::new();
        assert_eq!(tracker.attempt_show(), Attempt::First);
        assert_eq!(tracker.attempt_show(), Attempt::Repeated);
        assert_eq!(tracker.attempt_show(), Attempt::Suppressed);
    }

    #[test]
    fn repeated_set_warns_once() {
        let mut tracker = ParseTracker::new();
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Set),
            TagAttempt::First
        );
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Set),
            TagAttempt::Repeated
        );
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Set),
            TagAttempt::Suppressed
        );
    }

    #[test]
    fn tags_are_tracked_independently() {
        let mut tracker = ParseTracker::new();
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Set),
            TagAttempt::First
        );
        assert_eq!(
            tracker.attempt_tag(TagId::Album, Trigger::Set),
            TagAttempt::First
        );
    }

    // ── set/clear conflicts ──────────────────────────────────────────────────

    #[test]
    fn clear_after_set_is_a_conflict() {
        let mut tracker = ParseTracker::new();
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Set),
            TagAttempt::First
        );
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Clear),
            TagAttempt::Conflict
        );
    }

    #[test]
    fn set_after_clear_is_a_conflict() {
        let mut tracker = ParseTracker::new();
        assert_eq!(
            tracker.attempt_tag(TagId::Genre, Trigger::Clear),
            TagAttempt::First
        );
        assert_eq!(
            tracker.attempt_tag(TagId::Genre, Trigger::Set),
            TagAttempt::Conflict
        );
    }

    #[test]
    fn everything_after_a_conflict_is_silent() {
        let mut tracker = ParseTracker::new();
        tracker.attempt_tag(TagId::Title, Trigger::Set);
        tracker.attempt_tag(TagId::Title, Trigger::Clear);
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Set),
            TagAttempt::Suppressed
        );
        assert_eq!(
            tracker.attempt_tag(TagId::Title, Trigger::Clear),
            TagAttempt::Suppressed
        );
    }

    #[test]
    fn conflict_does_not_leak_to_other_tags() {
        let mut tracker = ParseTracker::new();
        tracker.attempt_tag(TagId::Title, Trigger::Set);
        tracker.attempt_tag(TagId::Title, Trigger::Clear);
        assert_eq!(
            tracker.attempt_tag(TagId::Album, Trigger::Clear),
            TagAttempt::First
        );
    }
}
