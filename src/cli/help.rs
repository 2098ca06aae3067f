//! Manual pages, printed to stdout.
//!
//! Three pages: the main options page, the presentation (`show`) page, and
//! the examples page. Flag lines and the visibility table are generated from
//! the same registry data the scanner dispatches on, so the manual cannot
//! drift from the flag table.

use crate::cli::console::bold;
use crate::cli::options::ShowMode;
use crate::cli::registry::{FlagRegistry, TagDescriptor, TAGS};
use crate::PROGRAM_NAME;

/// Argument pattern of the flag registered under `spelling`, or "" for flags
/// without slots.
fn slot_pattern(registry: &FlagRegistry, spelling: &str) -> String {
    registry
        .lookup(spelling)
        .and_then(|spec| spec.slots.first())
        .map(|slot| slot.pattern.clone())
        .unwrap_or_default()
}

fn header() -> String {
    format!(
        "{}\n ...is a tool for reading and editing meta data embedded into audio files\n",
        bold(PROGRAM_NAME)
    )
}

/// The main manual page.
pub fn print_options_manual(registry: &FlagRegistry) {
    let mut page = header();
    page += &format!(
        "\n{}\n        {} [options...] <file>\n\n{}\n",
        bold("Usage"),
        PROGRAM_NAME,
        bold("Options")
    );

    page += &format!("      {}\n", bold("set tag"));
    for tag in mutable_tags() {
        let pattern = slot_pattern(registry, &format!("--{}", tag.long));
        page += &format!(
            "        {:<28}{}\n",
            format!("-{}, --{} {}", tag.short, tag.long, pattern),
            tag.set_help
        );
    }

    page += &format!("\n      {}\n", bold("clear tag(s)"));
    for tag in mutable_tags() {
        page += &format!(
            "        {:<28}{}\n",
            format!("--clear-{}", tag.long),
            tag.clear_help
        );
    }
    page += &format!("\n        {:<28}clear all tags\n\n", "--clear");

    page += &format!(
        "      {} (see Presentation)\n",
        bold("display tags")
    );
    page += &format!(
        "        {:<28}show the tags defined by mode\n",
        format!("-s, --show {}", slot_pattern(registry, "--show"))
    );
    page += &format!(
        "        {:<28}display tags and custom text defined by format\n\n",
        format!("--show-format {}", slot_pattern(registry, "--show-format"))
    );

    page += &format!("      {}\n", bold("miscellaneous"));
    page += &format!(
        "        {:<28}show help page\n",
        "-h, --help [show|examples]"
    );
    let file_pattern = slot_pattern(registry, "--file");
    page += &format!(
        "        {:<28}explicitly take {} as input file\n\n",
        format!("-f, --file {}", file_pattern),
        file_pattern
    );

    page += &format!(
        "{}\n        {PROGRAM_NAME} --help show\n         ...to get further help on how \
         to display the tags\n            with the options --show and --show-format\n\n",
        bold("Presentation")
    );
    page += &format!(
        "{}\n        {PROGRAM_NAME} --help examples\n         ...to show examples on how \
         to use {PROGRAM_NAME}\n\n",
        bold("Examples")
    );
    page += &format!("{}\n        {PROGRAM_NAME} v{}", bold("Note"), crate::VERSION);

    println!("{page}");
}

/// The presentation page: show modes, the visibility table, and the format
/// escape table.
pub fn print_show_manual(registry: &FlagRegistry) {
    let mut page = header();
    page += &format!(
        "    showing '{}' help page, for main page use {PROGRAM_NAME} --help\n\n",
        bold("show")
    );

    page += &format!(
        "{}\n      {:<28}\n\n",
        bold("Presentation"),
        format!("-s, --show {}", slot_pattern(registry, "--show"))
    );
    page += "        show the tags defined by MODE\n";
    page += "        MODE is optional and can be omitted\n";
    page += "        in this case mode defaults to 'default'\n\n";
    page += &format!(
        "        available modes:  {}, {}, {}, {}\n\n",
        bold("default"),
        bold("simple"),
        bold("technical"),
        bold("full")
    );
    page += "        there can only be one mode active at a time\n";
    page += "        if you want a custom format use --show-format\n\n";

    page += "       tag        | shown by\n";
    page += "       ------------------------------------\n";
    for tag in &TAGS {
        page += &format!(
            "       {:<10} | {}\n",
            tag.name,
            shown_by(tag)
        );
    }

    page += &format!(
        "\n\n      {:<28}\n\n",
        format!("--show-format {}", slot_pattern(registry, "--show-format"))
    );
    page += "        display tags and custom text defined by format\n";
    page += "        format is a string that may contain the following escapes:\n\n";
    page += "       escape | expands to\n";
    page += "       -----------------------\n";
    for tag in &TAGS {
        page += &format!("       %{:<5} | {} tag\n", tag.short, tag.name);
    }
    page += "       %%     | literal %\n\n";
    page += "        after these escapes are resolved, the backslash escapes\n";
    page += "        \\n, \\t, \\\\ and \\\" are interpreted, so multi-line\n";
    page += "        formats are possible\n\n";
    page += &format!(
        "{}\n        for examples see {PROGRAM_NAME} --help examples",
        bold("Note")
    );

    println!("{page}");
}

/// The examples page.
pub fn print_examples_manual() {
    let mut page = header();
    page += &format!(
        "    showing '{}' help page, for main page use {PROGRAM_NAME} --help\n\n",
        bold("examples")
    );
    page += &format!("{}\n", bold("Examples"));
    page += &format!(
        "      {PROGRAM_NAME} test.mp3\n        show tag information of file 'test.mp3'\n\n"
    );
    page += &format!(
        "      {PROGRAM_NAME} test.mp3 --clear\n        clear all tags of file 'test.mp3'\n\n"
    );
    page += &format!(
        "      {PROGRAM_NAME} test.mp3 -r \"The Artist\"\n        change artist tag of file \
         'test.mp3' to 'The Artist'\n\n"
    );
    page += &format!(
        "      {PROGRAM_NAME} test.mp3 -c \"A Comment\" -s simple\n        change comment tag \
         of file 'test.mp3' to 'A Comment' and\n        display the tags in simple mode \
         afterwards\n\n"
    );
    page += &format!(
        "      {PROGRAM_NAME} test.mp3 --clear-genre --show-format \"year;%y\\nalbum;%l\"\n        \
         clear the genre tag of file 'test.mp3' and\n        display tags using a custom \
         given format\n\n"
    );
    page += &format!(
        "      {PROGRAM_NAME} -f -dashfile -k 5\n        change track number tag of file \
         '-dashfile' to 5"
    );

    println!("{page}");
}

fn mutable_tags() -> impl Iterator<Item = &'static TagDescriptor> {
    TAGS.iter().filter(|d| d.mutable)
}

/// Comma-separated list of the predefined modes displaying `tag`.
fn shown_by(tag: &TagDescriptor) -> String {
    let mut modes = Vec::new();
    for (mode, keyword) in [
        (ShowMode::Default, "default"),
        (ShowMode::Simple, "simple"),
        (ShowMode::Technical, "technical"),
        (ShowMode::Full, "full"),
    ] {
        if tag.visibility.shown_in(mode) {
            modes.push(keyword);
        }
    }
    modes.join(", ")
}
