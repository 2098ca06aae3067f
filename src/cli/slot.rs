//! Per-slot validation of flag argument values.
//!
//! Each flag declares an ordered list of [`ArgSlot`]s. The scanner offers the
//! next raw token to each slot in turn: a token that validates is consumed, a
//! token that fails an *optional* slot is left in place for the next consumer,
//! and a token that fails a *mandatory* slot aborts the whole parse.

use crate::cli::error::ParseError;

/// A named numeric predicate applied to integer slot values.
#[derive(Debug, Clone, Copy)]
pub struct NumberRule {
    /// Human-readable form, quoted in validation errors.
    pub description: &'static str,
    pub accepts: fn(i64) -> bool,
}

/// `x > 0` — the rule every integer-valued tag uses.
pub const POSITIVE: NumberRule = NumberRule {
    description: "x > 0",
    accepts: |x| x > 0,
};

/// What values a slot admits.
#[derive(Debug, Clone, Copy)]
pub enum SlotKind {
    /// Any token.
    Text,
    /// An integer satisfying a named rule.
    Number(NumberRule),
    /// One of a fixed candidate set.
    Choice(&'static [&'static str]),
}

/// One argument slot of a flag.
#[derive(Debug, Clone)]
pub struct ArgSlot {
    /// Placeholder shown in arity errors and help text (e.g. `FILE`,
    /// `[MODE]`).
    pub pattern: String,
    /// Optional slots are skipped on failure or exhausted input without
    /// consuming the token; mandatory slots make both fatal.
    pub optional: bool,
    pub kind: SlotKind,
}

impl ArgSlot {
    /// Check `token` against this slot without consuming it.
    pub fn validate(&self, token: &str) -> Result<(), ParseError> {
        match self.kind {
            SlotKind::Text => Ok(()),
            SlotKind::Number(rule) => {
                let value: i64 = token
                    .parse()
                    .map_err(|_| ParseError::NotAnInteger(token.to_owned()))?;
                if (rule.accepts)(value) {
                    Ok(())
                } else {
                    Err(ParseError::NumberCondition {
                        value,
                        condition: rule.description,
                    })
                }
            }
            SlotKind::Choice(candidates) => {
                if candidates.contains(&token) {
                    Ok(())
                } else {
                    Err(ParseError::NotACandidate {
                        value: token.to_owned(),
                        allowed: candidates.join(", "),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_slot() -> ArgSlot {
        ArgSlot {
            pattern: "VALUE".to_owned(),
            optional: false,
            kind: SlotKind::Text,
        }
    }

    fn number_slot() -> ArgSlot {
        ArgSlot {
            pattern: "TRACK".to_owned(),
            optional: false,
            kind: SlotKind::Number(POSITIVE),
        }
    }

    fn choice_slot() -> ArgSlot {
        ArgSlot {
            pattern: "[MODE]".to_owned(),
            optional: true,
            kind: SlotKind::Choice(&["default", "simple", "technical", "full"]),
        }
    }

    // ── Text ─────────────────────────────────────────────────────────────────

    #[test]
    fn text_accepts_anything() {
        assert!(text_slot().validate("The Artist").is_ok());
        assert!(text_slot().validate("").is_ok());
        assert!(text_slot().validate("-dashed").is_ok());
    }

    // ── Number ───────────────────────────────────────────────────────────────

    #[test]
    fn number_accepts_positive_integers() {
        assert!(number_slot().validate("1").is_ok());
        assert!(number_slot().validate("42").is_ok());
    }

    #[test]
    fn number_rejects_non_integers() {
        assert_eq!(
            number_slot().validate("abc"),
            Err(ParseError::NotAnInteger("abc".to_owned()))
        );
        assert_eq!(
            number_slot().validate("4.5"),
            Err(ParseError::NotAnInteger("4.5".to_owned()))
        );
    }

    #[test]
    fn number_rejects_values_violating_the_rule() {
        assert_eq!(
            number_slot().validate("0"),
            Err(ParseError::NumberCondition {
                value: 0,
                condition: "x > 0"
            })
        );
        assert_eq!(
            number_slot().validate("-3"),
            Err(ParseError::NumberCondition {
                value: -3,
                condition: "x > 0"
            })
        );
    }

    #[test]
    fn number_error_names_the_condition() {
        let message = number_slot().validate("0").unwrap_err().to_string();
        assert!(message.contains("x > 0"), "got: {message}");
    }

    // ── Choice ───────────────────────────────────────────────────────────────

    #[test]
    fn choice_accepts_candidates() {
        assert!(choice_slot().validate("simple").is_ok());
        assert!(choice_slot().validate("full").is_ok());
    }

    #[test]
    fn choice_rejects_and_lists_candidates() {
        let message = choice_slot().validate("fancy").unwrap_err().to_string();
        assert!(
            message.contains("default, simple, technical, full"),
            "got: {message}"
        );
    }
}
