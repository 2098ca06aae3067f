//! The lofty-backed tag store.
//!
//! Opening probes the file once and keeps two things in memory: the primary
//! tag (or a fresh tag of the file's primary type when none exists yet) and
//! the audio properties. All gets and sets run against that in-memory state;
//! [`TagStore::commit`] saves the tag back to the original path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::properties::FileProperties;
use lofty::tag::Tag;

use crate::cli::registry::TagId;

use super::{format_length, TagStore, TagValue};

/// A [`TagStore`] over one audio file on disk.
pub struct AudioFileStore {
    path: PathBuf,
    tag: Tag,
    properties: FileProperties,
}

impl std::fmt::Debug for AudioFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `lofty::tag::Tag` does not implement `Debug`; summarize it by type.
        f.debug_struct("AudioFileStore")
            .field("path", &self.path)
            .field("tag", &self.tag.tag_type())
            .field("properties", &self.properties)
            .finish()
    }
}

impl AudioFileStore {
    /// Probe `path` and load its primary tag and audio properties.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tagged = Probe::open(path)
            .with_context(|| format!("unable to open file '{}'", path.display()))?
            .read()
            .with_context(|| format!("unable to read file '{}'", path.display()))?;

        let properties = tagged.properties().clone();
        let tag = match tagged.primary_tag() {
            Some(existing) => existing.clone(),
            None => Tag::new(tagged.primary_tag_type()),
        };

        Ok(AudioFileStore {
            path: path.to_path_buf(),
            tag,
            properties,
        })
    }
}

impl TagStore for AudioFileStore {
    fn get(&self, id: TagId) -> TagValue {
        match id {
            TagId::Album => text(self.tag.album()),
            TagId::Artist => text(self.tag.artist()),
            TagId::Comment => text(self.tag.comment()),
            TagId::Genre => text(self.tag.genre()),
            TagId::Title => text(self.tag.title()),
            TagId::Track => TagValue::Number(self.tag.track().unwrap_or(0)),
            TagId::Year => TagValue::Number(self.tag.year().unwrap_or(0)),
            TagId::Bitrate => TagValue::Number(self.properties.audio_bitrate().unwrap_or(0)),
            TagId::Channels => {
                TagValue::Number(self.properties.channels().map(u32::from).unwrap_or(0))
            }
            TagId::Samplerate => TagValue::Number(self.properties.sample_rate().unwrap_or(0)),
            TagId::Length => TagValue::Text(format_length(self.properties.duration())),
        }
    }

    fn set(&mut self, id: TagId, value: TagValue) {
        // Empty text and zero numbers clear the item entirely instead of
        // writing an empty frame.
        match (id, value) {
            (TagId::Album, TagValue::Text(v)) => {
                if v.is_empty() {
                    self.tag.remove_album();
                } else {
                    self.tag.set_album(v);
                }
            }
            (TagId::Artist, TagValue::Text(v)) => {
                if v.is_empty() {
                    self.tag.remove_artist();
                } else {
                    self.tag.set_artist(v);
                }
            }
            (TagId::Comment, TagValue::Text(v)) => {
                if v.is_empty() {
                    self.tag.remove_comment();
                } else {
                    self.tag.set_comment(v);
                }
            }
            (TagId::Genre, TagValue::Text(v)) => {
                if v.is_empty() {
                    self.tag.remove_genre();
                } else {
                    self.tag.set_genre(v);
                }
            }
            (TagId::Title, TagValue::Text(v)) => {
                if v.is_empty() {
                    self.tag.remove_title();
                } else {
                    self.tag.set_title(v);
                }
            }
            (TagId::Track, TagValue::Number(n)) => {
                if n == 0 {
                    self.tag.remove_track();
                } else {
                    self.tag.set_track(n);
                }
            }
            (TagId::Year, TagValue::Number(n)) => {
                if n == 0 {
                    self.tag.remove_year();
                } else {
                    self.tag.set_year(n);
                }
            }
            // Display-only tags are derived from the stream and never staged.
            _ => {}
        }
    }

    fn commit(&mut self) -> Result<()> {
        self.tag
            .save_to_path(&self.path, WriteOptions::default())
            .with_context(|| format!("unable to save tags to '{}'", self.path.display()))
    }
}

fn text(value: Option<std::borrow::Cow<'_, str>>) -> TagValue {
    TagValue::Text(value.map(|v| v.into_owned()).unwrap_or_default())
}
