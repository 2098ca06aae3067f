//! Immutable tag and flag tables.
//!
//! Everything here is built once before scanning starts and never mutated
//! afterwards: the static [`TAGS`] descriptor array, the escape-character
//! table, and the [`FlagRegistry`] mapping command-line spellings to
//! [`FlagSpec`] entries. Completion behaviour is a closed [`FlagAction`]
//! variant set consumed by one exhaustive match in the scanner, so a missing
//! handler is a compile error rather than a runtime lookup failure.

use std::collections::HashMap;

use crate::cli::options::ShowMode;
use crate::cli::slot::{ArgSlot, SlotKind, POSITIVE};

/// Identifier of one logical tag. Declaration order is registry order and is
/// the order mode-based display and aggregate clearing walk the tags in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    Album,
    Artist,
    Bitrate,
    Channels,
    Comment,
    Genre,
    Length,
    Samplerate,
    Title,
    Track,
    Year,
}

impl TagId {
    /// Number of tags in the registry.
    pub const COUNT: usize = 11;

    /// Every tag in registry order.
    pub const ALL: [TagId; TagId::COUNT] = [
        TagId::Album,
        TagId::Artist,
        TagId::Bitrate,
        TagId::Channels,
        TagId::Comment,
        TagId::Genre,
        TagId::Length,
        TagId::Samplerate,
        TagId::Title,
        TagId::Track,
        TagId::Year,
    ];

    /// Position of this tag in the registry, usable as a fixed-table index.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which predefined show modes display a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Shown in default, simple and full modes.
    Production,
    /// Shown in technical and full modes.
    Technical,
    /// Shown in default and full modes.
    Extra,
    /// Shown in simple, technical and full modes.
    Timing,
}

impl Visibility {
    /// Whether a tag with this visibility appears in `mode`. `Custom` mode
    /// never uses visibility; templates address tags explicitly.
    pub fn shown_in(self, mode: ShowMode) -> bool {
        match self {
            Visibility::Production => {
                matches!(mode, ShowMode::Default | ShowMode::Simple | ShowMode::Full)
            }
            Visibility::Technical => matches!(mode, ShowMode::Technical | ShowMode::Full),
            Visibility::Extra => matches!(mode, ShowMode::Default | ShowMode::Full),
            Visibility::Timing => {
                matches!(mode, ShowMode::Simple | ShowMode::Technical | ShowMode::Full)
            }
        }
    }
}

/// Static description of one tag.
#[derive(Debug)]
pub struct TagDescriptor {
    pub id: TagId,
    /// Single-character escape alias (`%t`, `%r`, …).
    pub short: char,
    /// Long key, also the long flag spelling stem.
    pub long: &'static str,
    /// Display name for mode-based listing.
    pub name: &'static str,
    /// Writable tags get set/clear flags; the rest are display-only.
    pub mutable: bool,
    /// Integer-valued tags validate their slot and hide zero on display.
    pub integer: bool,
    pub visibility: Visibility,
    pub set_help: &'static str,
    pub clear_help: &'static str,
}

/// The tag registry, in declaration order.
pub static TAGS: [TagDescriptor; TagId::COUNT] = [
    TagDescriptor {
        id: TagId::Album,
        short: 'l',
        long: "album",
        name: "Album",
        mutable: true,
        integer: false,
        visibility: Visibility::Production,
        set_help: "set Album tag",
        clear_help: "clear Album tag",
    },
    TagDescriptor {
        id: TagId::Artist,
        short: 'r',
        long: "artist",
        name: "Artist",
        mutable: true,
        integer: false,
        visibility: Visibility::Production,
        set_help: "set Artist tag",
        clear_help: "clear Artist tag",
    },
    TagDescriptor {
        id: TagId::Bitrate,
        short: 'b',
        long: "bitrate",
        name: "Bitrate",
        mutable: false,
        integer: true,
        visibility: Visibility::Technical,
        set_help: "",
        clear_help: "",
    },
    TagDescriptor {
        id: TagId::Channels,
        short: 'h',
        long: "channels",
        name: "Channels",
        mutable: false,
        integer: true,
        visibility: Visibility::Technical,
        set_help: "",
        clear_help: "",
    },
    TagDescriptor {
        id: TagId::Comment,
        short: 'c',
        long: "comment",
        name: "Comment",
        mutable: true,
        integer: false,
        visibility: Visibility::Extra,
        set_help: "set Comment tag",
        clear_help: "clear Comment tag",
    },
    TagDescriptor {
        id: TagId::Genre,
        short: 'g',
        long: "genre",
        name: "Genre",
        mutable: true,
        integer: false,
        visibility: Visibility::Extra,
        set_help: "set Genre tag",
        clear_help: "clear Genre tag",
    },
    TagDescriptor {
        id: TagId::Length,
        short: 'n',
        long: "length",
        name: "Length",
        mutable: false,
        integer: false,
        visibility: Visibility::Timing,
        set_help: "",
        clear_help: "",
    },
    TagDescriptor {
        id: TagId::Samplerate,
        short: 's',
        long: "samplerate",
        name: "Samplerate",
        mutable: false,
        integer: true,
        visibility: Visibility::Technical,
        set_help: "",
        clear_help: "",
    },
    TagDescriptor {
        id: TagId::Title,
        short: 't',
        long: "title",
        name: "Title",
        mutable: true,
        integer: false,
        visibility: Visibility::Production,
        set_help: "set Title tag",
        clear_help: "clear Title tag",
    },
    TagDescriptor {
        id: TagId::Track,
        short: 'k',
        long: "track",
        name: "Track",
        mutable: true,
        integer: true,
        visibility: Visibility::Production,
        set_help: "set Track tag",
        clear_help: "clear Track tag",
    },
    TagDescriptor {
        id: TagId::Year,
        short: 'y',
        long: "year",
        name: "Year",
        mutable: true,
        integer: true,
        visibility: Visibility::Extra,
        set_help: "set Year tag",
        clear_help: "clear Year tag",
    },
];

/// The descriptor for `id`.
pub fn descriptor(id: TagId) -> &'static TagDescriptor {
    &TAGS[id.index()]
}

/// Resolve a single-character format escape (`%t` → Title) to its tag.
pub fn tag_for_escape(short: char) -> Option<TagId> {
    TAGS.iter().find(|d| d.short == short).map(|d| d.id)
}

/// What a flag does once its slots are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    /// Print a manual page and stop the scan.
    Help,
    /// Commit the slot value as the filename.
    File,
    /// Select a predefined show mode (or default it).
    ShowMode,
    /// Select custom display with the slot value as template.
    ShowFormat,
    /// Stage the slot value for one tag.
    SetTag(TagId),
    /// Stage the zero value for one tag.
    ClearTag(TagId),
    /// Stage the zero value for every mutable tag.
    ClearAll,
}

/// One flag: canonical spelling, argument slots in order, completion action.
#[derive(Debug)]
pub struct FlagSpec {
    /// Canonical (long) spelling, used in help text.
    pub name: String,
    pub slots: Vec<ArgSlot>,
    pub action: FlagAction,
}

/// Immutable table of every flag the scanner recognises, keyed by spelling.
/// Multiple spellings (short and long forms) alias one entry.
#[derive(Debug)]
pub struct FlagRegistry {
    specs: Vec<FlagSpec>,
    spellings: HashMap<String, usize>,
}

/// Candidate pages for `--help`.
pub const HELP_PAGES: &[&str] = &["show", "examples"];

/// Candidate keywords for `--show`.
pub const SHOW_KEYWORDS: &[&str] = &["default", "simple", "technical", "full"];

impl FlagRegistry {
    pub fn new() -> Self {
        let mut registry = FlagRegistry {
            specs: Vec::new(),
            spellings: HashMap::new(),
        };

        registry.add(
            &["-h", "--help"],
            vec![ArgSlot {
                pattern: "[PAGE]".to_owned(),
                optional: true,
                kind: SlotKind::Choice(HELP_PAGES),
            }],
            FlagAction::Help,
        );

        registry.add(
            &["-f", "--file"],
            vec![ArgSlot {
                pattern: "FILE".to_owned(),
                optional: false,
                kind: SlotKind::Text,
            }],
            FlagAction::File,
        );

        registry.add(
            &["-s", "--show"],
            vec![ArgSlot {
                pattern: "[MODE]".to_owned(),
                optional: true,
                kind: SlotKind::Choice(SHOW_KEYWORDS),
            }],
            FlagAction::ShowMode,
        );

        registry.add(
            &["--show-format"],
            vec![ArgSlot {
                pattern: "FORMAT".to_owned(),
                optional: false,
                kind: SlotKind::Text,
            }],
            FlagAction::ShowFormat,
        );

        for tag in TAGS.iter().filter(|d| d.mutable) {
            let kind = if tag.integer {
                SlotKind::Number(POSITIVE)
            } else {
                SlotKind::Text
            };
            let short = format!("-{}", tag.short);
            let long = format!("--{}", tag.long);
            registry.add(
                &[&short, &long],
                vec![ArgSlot {
                    pattern: tag.long.to_uppercase(),
                    optional: false,
                    kind,
                }],
                FlagAction::SetTag(tag.id),
            );

            let clear = format!("--clear-{}", tag.long);
            registry.add(&[&clear], Vec::new(), FlagAction::ClearTag(tag.id));
        }

        registry.add(&["--clear"], Vec::new(), FlagAction::ClearAll);

        registry
    }

    /// Look a raw command-line token up. `None` means "not a flag": the
    /// scanner falls back to filename handling.
    pub fn lookup(&self, token: &str) -> Option<&FlagSpec> {
        self.spellings.get(token).map(|&index| &self.specs[index])
    }

    fn add(&mut self, aliases: &[&str], slots: Vec<ArgSlot>, action: FlagAction) {
        let index = self.specs.len();
        // Canonical spelling is the long form, listed last.
        let name = aliases.last().map(|&a| a.to_owned()).unwrap_or_default();
        self.specs.push(FlagSpec {
            name,
            slots,
            action,
        });
        for alias in aliases {
            self.spellings.insert((*alias).to_owned(), index);
        }
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        FlagRegistry::new()
    }
}
