// e2e/store.rs — AudioFileStore tests against real files on disk.
//
// Uses a hand-built minimal PCM WAV as the fixture: small, deterministic,
// and readable by the tag probe without any binary test assets.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use taggr::cli::registry::TagId;
use taggr::store::audio::AudioFileStore;
use taggr::store::{resolve_values, TagStore, TagValue};

/// Write a one-second mono 16-bit 44.1 kHz PCM WAV of silence.
fn write_wav(dir: &TempDir, name: &str) -> PathBuf {
    const SAMPLE_RATE: u32 = 44_100;
    const DATA_LEN: u32 = SAMPLE_RATE * 2; // 1 second of 16-bit mono

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + DATA_LEN).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&DATA_LEN.to_le_bytes());
    bytes.extend_from_slice(&vec![0u8; DATA_LEN as usize]);

    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

// ── 1. Open failures ──────────────────────────────────────────────────────────

#[test]
fn opening_a_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.mp3");
    let result = AudioFileStore::open(&path);
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("missing.mp3"), "got: {message}");
}

#[test]
fn opening_a_non_audio_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.mp3");
    fs::write(&path, b"this is not audio data at all").unwrap();
    assert!(AudioFileStore::open(&path).is_err());
}

// ── 2. Stream properties ──────────────────────────────────────────────────────

#[test]
fn wav_properties_are_exposed_as_immutable_tags() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(&dir, "silence.wav");

    let store = AudioFileStore::open(&path).unwrap();
    assert_eq!(store.get(TagId::Samplerate), TagValue::Number(44_100));
    assert_eq!(store.get(TagId::Channels), TagValue::Number(1));

    let values = resolve_values(&store);
    assert_eq!(values.get(TagId::Length), "0:01");
    // A fresh file carries no tags: every mutable tag resolves empty.
    assert_eq!(values.get(TagId::Title), "");
    assert_eq!(values.get(TagId::Track), "");
}

// ── 3. Tag round-trip ─────────────────────────────────────────────────────────

#[test]
fn committed_tags_survive_a_reopen() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(&dir, "tagged.wav");

    let mut store = AudioFileStore::open(&path).unwrap();
    store.set(TagId::Title, TagValue::Text("So What".to_owned()));
    store.set(TagId::Artist, TagValue::Text("Miles Davis".to_owned()));
    store.commit().unwrap();

    let reopened = AudioFileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get(TagId::Title),
        TagValue::Text("So What".to_owned())
    );
    assert_eq!(
        reopened.get(TagId::Artist),
        TagValue::Text("Miles Davis".to_owned())
    );
}

#[test]
fn clearing_a_tag_removes_it_from_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(&dir, "cleared.wav");

    let mut store = AudioFileStore::open(&path).unwrap();
    store.set(TagId::Title, TagValue::Text("Temporary".to_owned()));
    store.commit().unwrap();

    let mut store = AudioFileStore::open(&path).unwrap();
    store.set(TagId::Title, TagValue::Text(String::new()));
    store.commit().unwrap();

    let reopened = AudioFileStore::open(&path).unwrap();
    assert_eq!(reopened.get(TagId::Title), TagValue::Text(String::new()));
}
