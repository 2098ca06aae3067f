//! Console output helpers: `WARN`/`ERR` lines on stderr and bold styling for
//! manual pages on stdout.
//!
//! ANSI escapes are emitted only when the corresponding stream is a terminal,
//! so piped output stays clean.

use std::io::IsTerminal;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Print a non-fatal warning line to stderr.
pub fn warn(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{YELLOW}WARN{RESET} {message}");
    } else {
        eprintln!("WARN {message}");
    }
}

/// Print a fatal error line to stderr.
pub fn error(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{RED}ERR{RESET} {message}");
    } else {
        eprintln!("ERR {message}");
    }
}

/// Bold `text` for stdout, or return it unchanged when stdout is piped.
pub fn bold(text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{BOLD}{text}{RESET}")
    } else {
        text.to_owned()
    }
}
