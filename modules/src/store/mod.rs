//! Persistence layer of the IBC state machine.
//!
//! The host only offers a fixed-width word store: 32-byte keys mapping to
//! 32-byte values, where an all-zero word means "unset". [`codec`] packs
//! arbitrary byte blobs into such words, and [`Buffer`] collects the writes
//! of a single call so that they reach the host store all at once or not at
//! all. [`IbcStore`] layers typed access to the protocol objects on top.

use std::collections::BTreeMap;

use primitive_types::H256;

pub mod buffer;
pub mod codec;
pub mod error;
pub mod ibc_store;

pub use buffer::Buffer;
pub use error::Error;
pub use ibc_store::IbcStore;

/// The host storage primitive under the slot codec.
pub trait WordStore {
    /// Reads the word stored at `key`. Unset keys read as [`H256::zero`].
    fn get_word(&self, key: &H256) -> H256;

    /// Writes `word` at `key`. Writing the zero word clears the key.
    fn set_word(&mut self, key: H256, word: H256);
}

impl<S: WordStore + ?Sized> WordStore for &mut S {
    fn get_word(&self, key: &H256) -> H256 {
        (**self).get_word(key)
    }

    fn set_word(&mut self, key: H256, word: H256) {
        (**self).set_word(key, word)
    }
}

/// An in-memory word store, standing in for the host storage in tests and
/// tooling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    words: BTreeMap<H256, H256>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-zero words currently stored.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordStore for MemoryStore {
    fn get_word(&self, key: &H256) -> H256 {
        self.words.get(key).copied().unwrap_or_else(H256::zero)
    }

    fn set_word(&mut self, key: H256, word: H256) {
        if word.is_zero() {
            self.words.remove(&key);
        } else {
            self.words.insert(key, word);
        }
    }
}
