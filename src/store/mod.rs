//! The tag store: the narrow contract the core depends on, and the helpers
//! that move data across it.
//!
//! | Submodule  | Responsibility |
//! |------------|---------------|
//! | [`audio`]  | `AudioFileStore` — lofty-backed store reading and writing real audio files. |
//! | [`memory`] | `MemoryStore` — array-backed store for tests. |
//!
//! The parser never sees a store; the store never sees raw argv. They meet
//! only here, through [`apply_edits`] (staged edits in, one commit out) and
//! [`resolve_values`] (current values out, ready for display).

pub mod audio;
pub mod memory;

use std::time::Duration;

use anyhow::Result;

use crate::cli::options::Options;
use crate::cli::registry::{TagId, TAGS};

/// A tag value as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Text(String),
    Number(u32),
}

/// The contract every tag backend satisfies. `get` and `set` operate on the
/// in-memory state; nothing touches the underlying medium until `commit`.
pub trait TagStore {
    fn get(&self, id: TagId) -> TagValue;
    fn set(&mut self, id: TagId, value: TagValue);
    fn commit(&mut self) -> Result<()>;
}

/// A frozen snapshot of every tag's display string, indexed by [`TagId`].
/// Integer tags at zero resolve to the empty string, never "0".
#[derive(Debug)]
pub struct TagValues {
    values: [String; TagId::COUNT],
}

impl TagValues {
    pub fn get(&self, id: TagId) -> &str {
        &self.values[id.index()]
    }
}

/// Snapshot the store's current values for display.
pub fn resolve_values(store: &dyn TagStore) -> TagValues {
    let values = std::array::from_fn(|index| match store.get(TagId::ALL[index]) {
        TagValue::Text(text) => text,
        TagValue::Number(0) => String::new(),
        TagValue::Number(n) => n.to_string(),
    });
    TagValues { values }
}

/// Stage every edit from `options` in registry order, then commit — once,
/// and only if something was actually staged. A pure display run never
/// rewrites the file.
pub fn apply_edits(store: &mut dyn TagStore, options: &Options) -> Result<()> {
    let mut dirty = false;
    for tag in TAGS.iter().filter(|d| d.mutable) {
        let edit = options.edit(tag.id);
        if !edit.set {
            continue;
        }
        let value = if tag.integer {
            TagValue::Number(edit.value.parse().unwrap_or(0))
        } else {
            TagValue::Text(edit.value.clone())
        };
        store.set(tag.id, value);
        dirty = true;
    }
    if dirty {
        store.commit()?;
    }
    Ok(())
}

/// Render a duration as `m:ss`, with an hour prefix once it applies.
pub fn format_length(length: Duration) -> String {
    let total = length.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::cli::options::Options;

    // ── format_length ────────────────────────────────────────────────────────

    #[test]
    fn length_under_an_hour() {
        assert_eq!(format_length(Duration::from_secs(0)), "0:00");
        assert_eq!(format_length(Duration::from_secs(5)), "0:05");
        assert_eq!(format_length(Duration::from_secs(185)), "3:05");
        assert_eq!(format_length(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn length_with_hours() {
        assert_eq!(format_length(Duration::from_secs(3725)), "1:02:05");
    }

    // ── resolve_values ───────────────────────────────────────────────────────

    #[test]
    fn zero_numbers_resolve_to_empty_strings() {
        let store = MemoryStore::new();
        let values = resolve_values(&store);
        assert_eq!(values.get(TagId::Track), "");
        assert_eq!(values.get(TagId::Year), "");
        assert_eq!(values.get(TagId::Bitrate), "");
        assert_eq!(values.get(TagId::Title), "");
    }

    #[test]
    fn nonzero_values_resolve_verbatim() {
        let mut store = MemoryStore::new();
        store.set(TagId::Title, TagValue::Text("Song".to_owned()));
        store.set(TagId::Track, TagValue::Number(7));
        let values = resolve_values(&store);
        assert_eq!(values.get(TagId::Title), "Song");
        assert_eq!(values.get(TagId::Track), "7");
    }

    // ── apply_edits ──────────────────────────────────────────────────────────

    #[test]
    fn staged_edits_are_written_then_committed_once() {
        let mut store = MemoryStore::new();
        let mut options = Options::new();
        let title = options.edit_mut(TagId::Title);
        title.set = true;
        title.value = "Song".to_owned();
        let track = options.edit_mut(TagId::Track);
        track.set = true;
        track.value = "7".to_owned();

        apply_edits(&mut store, &options).unwrap();
        assert_eq!(store.get(TagId::Title), TagValue::Text("Song".to_owned()));
        assert_eq!(store.get(TagId::Track), TagValue::Number(7));
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn clear_edits_write_zero_values() {
        let mut store = MemoryStore::new();
        store.set(TagId::Genre, TagValue::Text("Jazz".to_owned()));
        store.set(TagId::Year, TagValue::Number(1959));

        let mut options = Options::new();
        let genre = options.edit_mut(TagId::Genre);
        genre.set = true;
        genre.value = String::new();
        let year = options.edit_mut(TagId::Year);
        year.set = true;
        year.value = "0".to_owned();

        apply_edits(&mut store, &options).unwrap();
        assert_eq!(store.get(TagId::Genre), TagValue::Text(String::new()));
        assert_eq!(store.get(TagId::Year), TagValue::Number(0));
    }

    #[test]
    fn no_edits_means_no_commit() {
        let mut store = MemoryStore::new();
        apply_edits(&mut store, &Options::new()).unwrap();
        assert_eq!(store.commit_count(), 0);
    }
}
