//! Array-backed tag store for tests.

use anyhow::Result;

use crate::cli::registry::{descriptor, TagId};

use super::{TagStore, TagValue};

/// An in-memory [`TagStore`]: text tags start empty, integer tags start at
/// zero. Commits are counted so tests can assert commit behaviour.
#[derive(Debug)]
pub struct MemoryStore {
    values: [TagValue; TagId::COUNT],
    commits: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        let values = std::array::from_fn(|index| {
            if descriptor(TagId::ALL[index]).integer {
                TagValue::Number(0)
            } else {
                TagValue::Text(String::new())
            }
        });
        MemoryStore { values, commits: 0 }
    }

    /// How many times [`TagStore::commit`] ran.
    pub fn commit_count(&self) -> u32 {
        self.commits
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl TagStore for MemoryStore {
    fn get(&self, id: TagId) -> TagValue {
        self.values[id.index()].clone()
    }

    fn set(&mut self, id: TagId, value: TagValue) {
        self.values[id.index()] = value;
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}
