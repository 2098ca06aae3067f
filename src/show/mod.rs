//! Tag presentation: mode-based listing and custom format rendering.

pub mod format;

use crate::cli::options::{ShowConfig, ShowMode};
use crate::cli::registry::TAGS;
use crate::store::TagValues;

/// Print the tags selected by `show` to stdout.
pub fn show_tags(values: &TagValues, show: &ShowConfig) {
    if show.mode == ShowMode::Custom {
        println!("{}", format::render(&show.format, values));
    } else {
        for line in mode_lines(values, show.mode) {
            println!("{line}");
        }
    }
}

/// The listing for one predefined mode: every tag the mode displays, in
/// registry order, with a right-aligned label. Zero-valued integer tags read
/// back as empty from [`TagValues`], so they render as blank, never "0".
pub fn mode_lines(values: &TagValues, mode: ShowMode) -> Vec<String> {
    let width = label_width(mode);
    TAGS.iter()
        .filter(|tag| tag.visibility.shown_in(mode))
        .map(|tag| format!("{:>width$}: {}", tag.name, values.get(tag.id)))
        .collect()
}

/// Label column width per mode — wide enough for the longest visible name.
fn label_width(mode: ShowMode) -> usize {
    match mode {
        ShowMode::Default => 7,
        ShowMode::Simple => 6,
        ShowMode::Technical | ShowMode::Full => 10,
        ShowMode::Custom => 0,
    }
}
