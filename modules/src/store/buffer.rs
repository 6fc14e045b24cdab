use std::collections::BTreeMap;
use std::mem;

use primitive_types::H256;
use tracing::debug;

use super::WordStore;

/// A word store with an in-memory write buffer.
///
/// Reads see the pending writes first and fall back to the base store.
/// Nothing reaches the base store until [`Buffer::commit`] or
/// [`Buffer::consume`] is called; dropping the buffer discards the writes.
#[derive(Clone, Debug)]
pub struct Buffer<S> {
    base: S,
    pending: BTreeMap<H256, H256>,
}

impl<S> Buffer<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Number of words written since the buffer was created or last committed.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Consume self, do not flush, just return the underlying store and the
    /// pending writes.
    pub fn disassemble(self) -> (S, BTreeMap<H256, H256>) {
        (self.base, self.pending)
    }
}

impl<S: WordStore> Buffer<S> {
    /// Flush pending writes to the underlying store.
    pub fn commit(&mut self) {
        let pending = mem::take(&mut self.pending);
        debug!(words = pending.len(), "committing buffered writes");

        for (key, word) in pending {
            self.base.set_word(key, word);
        }
    }

    /// Consume self, flush pending writes to the underlying store, return
    /// the underlying store.
    pub fn consume(mut self) -> S {
        self.commit();
        self.base
    }
}

impl<S: WordStore> WordStore for Buffer<S> {
    fn get_word(&self, key: &H256) -> H256 {
        match self.pending.get(key) {
            Some(word) => *word,
            None => self.base.get_word(key),
        }
    }

    fn set_word(&mut self, key: H256, word: H256) {
        self.pending.insert(key, word);
    }
}
