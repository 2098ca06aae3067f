//! The accumulated result of a successful argument scan.
//!
//! An [`Options`] value is created fresh per invocation, mutated only through
//! tracker-gated transitions inside the scanner, and frozen afterwards: the
//! store layer applies its edits, the show layer reads its display settings.

use crate::cli::registry::TagId;

/// How tags should be presented after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    /// Production tags plus comment, genre and year.
    Default,
    /// Production tags plus length.
    Simple,
    /// Stream properties (bitrate, channels, samplerate) plus length.
    Technical,
    /// Every tag.
    Full,
    /// A user-supplied format template.
    Custom,
}

impl ShowMode {
    /// Map a `--show` keyword to its mode. Keywords are the exact candidate
    /// set of the show slot; anything else is `None`.
    pub fn from_keyword(keyword: &str) -> Option<ShowMode> {
        match keyword {
            "default" => Some(ShowMode::Default),
            "simple" => Some(ShowMode::Simple),
            "technical" => Some(ShowMode::Technical),
            "full" => Some(ShowMode::Full),
            _ => None,
        }
    }
}

/// Display settings selected on the command line.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    /// Whether any display was requested (or defaulted to).
    pub enabled: bool,
    /// The selected mode; `Custom` implies `format` holds the template.
    pub mode: ShowMode,
    /// Raw format template for `Custom` mode.
    pub format: String,
}

/// One staged change to a mutable tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEdit {
    /// Whether this tag should be written at commit time.
    pub set: bool,
    /// The value to write; the empty string (or "0" for integer tags) clears.
    pub value: String,
}

/// Everything the scanner resolved from the command line.
#[derive(Debug, Clone)]
pub struct Options {
    /// The audio file to operate on. Unset until the first filename commits;
    /// the scanner guarantees it is `Some` on every non-early successful
    /// parse.
    pub filename: Option<String>,
    /// Display settings.
    pub show: ShowConfig,
    /// Staged edits, one slot per tag identifier (only mutable tags are ever
    /// staged).
    tags: [TagEdit; TagId::COUNT],
}

impl Options {
    pub fn new() -> Self {
        Options {
            filename: None,
            show: ShowConfig {
                enabled: false,
                mode: ShowMode::Default,
                format: String::new(),
            },
            tags: std::array::from_fn(|_| TagEdit::default()),
        }
    }

    /// The staged edit for `id`.
    pub fn edit(&self, id: TagId) -> &TagEdit {
        &self.tags[id.index()]
    }

    /// Mutable access for the scanner's completion handlers.
    pub fn edit_mut(&mut self, id: TagId) -> &mut TagEdit {
        &mut self.tags[id.index()]
    }

    /// Whether any tag edit is staged.
    pub fn any_tag_edit(&self) -> bool {
        self.tags.iter().any(|edit| edit.set)
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}
