//! Packing of variable-length byte blobs into 32-byte storage words.
//!
//! A blob lives at a base key derived from its path (`keccak256(path)`):
//!
//! - A blob of at most 31 bytes occupies the base word alone. The data is
//!   left-aligned and the last byte holds `len * 2`, so its low bit is 0.
//! - Any other blob (including the empty blob) stores `len * 2 + 1` as a
//!   big-endian integer in the base word, so its low bit is 1. The data
//!   follows in 32-byte chunks, the last one zero-padded. Chunk `i` lives at
//!   `keccak256(base_key) + i`.
//!
//! An all-zero base word is an unset slot. Because the empty blob uses the
//! long form, a present zero-length value never reads as unset.

use primitive_types::{H256, U256};
use sha3::{Digest, Keccak256};

use super::error::Error;
use super::WordStore;

pub const WORD_SIZE: usize = 32;

/// Longest blob stored inline in the base word.
pub const MAX_INLINE_LEN: usize = WORD_SIZE - 1;

/// Upper bound on a decoded length, guarding against corrupted headers.
const MAX_BLOB_LEN: u64 = u32::MAX as u64;

/// A storage location for one byte blob, identified by its path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    path: String,
    key: H256,
}

impl Slot {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let key = keccak256(path.as_bytes());
        Self { path, key }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn key(&self) -> H256 {
        self.key
    }

    /// Key of the `index`-th continuation chunk, counting from zero.
    fn chunk_key(&self, index: usize) -> H256 {
        let start = U256::from_big_endian(keccak256(self.key.as_bytes()).as_bytes());
        let (key, _) = start.overflowing_add(U256::from(index));
        u256_to_h256(key)
    }
}

pub fn keccak256(bytes: &[u8]) -> H256 {
    H256::from_slice(Keccak256::digest(bytes).as_slice())
}

fn u256_to_h256(value: U256) -> H256 {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    H256(word)
}

enum Header {
    Inline(usize),
    Chunked(usize),
}

fn read_header(word: &H256, slot: &Slot) -> Result<Option<Header>, Error> {
    if word.is_zero() {
        return Ok(None);
    }

    let tag = word.as_bytes()[WORD_SIZE - 1];
    if tag & 1 == 0 {
        let len = (tag / 2) as usize;
        if len > MAX_INLINE_LEN {
            return Err(Error::bad_length(tag.to_string()));
        }
        return Ok(Some(Header::Inline(len)));
    }

    let encoded = U256::from_big_endian(word.as_bytes());
    let len = (encoded - U256::one()) / U256::from(2u8);
    if len > U256::from(MAX_BLOB_LEN) {
        return Err(Error::bad_length(encoded.to_string()));
    }
    let len = len.low_u64() as usize;
    if len != 0 && len <= MAX_INLINE_LEN {
        // short blobs are always inlined by `set_bytes`
        tracing::debug!(path = slot.path(), len, "non-canonical chunked header");
        return Err(Error::bad_length(encoded.to_string()));
    }

    Ok(Some(Header::Chunked(len)))
}

fn chunk_count(len: usize) -> usize {
    len.div_ceil(WORD_SIZE)
}

/// Stores `value` at `slot`, overwriting any previous value.
pub fn set_bytes<S: WordStore>(store: &mut S, slot: &Slot, value: &[u8]) {
    let len = value.len();

    // drop continuation chunks a previous, longer value may have left behind
    clear_chunks(store, slot);

    if len != 0 && len <= MAX_INLINE_LEN {
        let mut word = [0u8; WORD_SIZE];
        word[..len].copy_from_slice(value);
        word[WORD_SIZE - 1] = (len * 2) as u8;
        store.set_word(slot.key(), H256(word));
        return;
    }

    let header = U256::from(len) * U256::from(2u8) + U256::one();
    store.set_word(slot.key(), u256_to_h256(header));

    for (index, chunk) in value.chunks(WORD_SIZE).enumerate() {
        let mut word = [0u8; WORD_SIZE];
        word[..chunk.len()].copy_from_slice(chunk);
        store.set_word(slot.chunk_key(index), H256(word));
    }
}

/// Reads the blob stored at `slot`. Fails with `EmptyState` if the slot was
/// never written (or was deleted).
pub fn get_bytes<S: WordStore>(store: &S, slot: &Slot) -> Result<Vec<u8>, Error> {
    let word = store.get_word(&slot.key());

    match read_header(&word, slot)? {
        None => Err(Error::empty_state(slot.path().to_string())),
        Some(Header::Inline(len)) => Ok(word.as_bytes()[..len].to_vec()),
        Some(Header::Chunked(len)) => {
            let mut value = Vec::with_capacity(chunk_count(len) * WORD_SIZE);
            for index in 0..chunk_count(len) {
                value.extend_from_slice(store.get_word(&slot.chunk_key(index)).as_bytes());
            }
            value.truncate(len);
            Ok(value)
        }
    }
}

/// Like [`get_bytes`], but maps an unset slot to `None`.
pub fn try_get_bytes<S: WordStore>(store: &S, slot: &Slot) -> Result<Option<Vec<u8>>, Error> {
    if is_set(store, slot) {
        get_bytes(store, slot).map(Some)
    } else {
        Ok(None)
    }
}

pub fn is_set<S: WordStore>(store: &S, slot: &Slot) -> bool {
    !store.get_word(&slot.key()).is_zero()
}

/// Zeroes the base word and every continuation chunk of `slot`. Deleting an
/// unset slot is a no-op.
pub fn delete_bytes<S: WordStore>(store: &mut S, slot: &Slot) {
    clear_chunks(store, slot);
    store.set_word(slot.key(), H256::zero());
}

fn clear_chunks<S: WordStore>(store: &mut S, slot: &Slot) {
    let word = store.get_word(&slot.key());
    // a corrupted header has no trustworthy chunk count, leave the chunks be
    if let Ok(Some(Header::Chunked(len))) = read_header(&word, slot) {
        for index in 0..chunk_count(len) {
            store.set_word(slot.chunk_key(index), H256::zero());
        }
    }
}

/// Stores `value` as an 8-byte big-endian blob.
pub fn set_u64<S: WordStore>(store: &mut S, slot: &Slot, value: u64) {
    set_bytes(store, slot, &value.to_be_bytes());
}

pub fn get_u64<S: WordStore>(store: &S, slot: &Slot) -> Result<u64, Error> {
    let bytes = get_bytes(store, slot)?;
    let bytes: [u8; 8] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::invalid_u64(slot.path().to_string(), bytes.len()))?;
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::error::ErrorDetail;
    use crate::store::MemoryStore;
    use test_log::test;

    fn blob(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8 + 1).collect()
    }

    #[test]
    fn round_trip_preserves_every_length() {
        let slot = Slot::new("clients/07-tendermint-0/clientState");
        for len in [0, 1, 31, 32, 33, 64, 1000] {
            let mut store = MemoryStore::new();
            let value = blob(len);
            set_bytes(&mut store, &slot, &value);
            assert_eq!(get_bytes(&store, &slot).unwrap(), value, "length {len}");
        }
    }

    #[test]
    fn short_values_occupy_a_single_word() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("ports/transfer");

        set_bytes(&mut store, &slot, b"hello");
        assert_eq!(store.len(), 1);

        let word = store.get_word(&slot.key());
        assert_eq!(&word.as_bytes()[..5], b"hello");
        assert_eq!(word.as_bytes()[WORD_SIZE - 1], 10);
    }

    #[test]
    fn long_values_are_chunked_after_the_hashed_key() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("connections/connection-0");
        let value = blob(33);

        set_bytes(&mut store, &slot, &value);
        assert_eq!(store.len(), 3);

        let header = U256::from_big_endian(store.get_word(&slot.key()).as_bytes());
        assert_eq!(header, U256::from(67u8));

        let first = keccak256(slot.key().as_bytes());
        assert_eq!(store.get_word(&first).as_bytes(), &value[..32]);

        let second = u256_to_h256(U256::from_big_endian(first.as_bytes()) + U256::one());
        let mut last = [0u8; WORD_SIZE];
        last[0] = value[32];
        assert_eq!(store.get_word(&second), H256(last));
    }

    #[test]
    fn empty_value_is_distinct_from_unset_slot() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("acks/ports/transfer/channels/channel-0/sequences/1");

        let err = get_bytes(&store, &slot).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::EmptyState(_)));

        set_bytes(&mut store, &slot, &[]);
        assert!(is_set(&store, &slot));
        assert_eq!(get_bytes(&store, &slot).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn delete_clears_every_word() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("commitments/ports/transfer/channels/channel-0/sequences/1");

        set_bytes(&mut store, &slot, &blob(100));
        delete_bytes(&mut store, &slot);

        assert!(store.is_empty());
        assert!(get_bytes(&store, &slot).is_err());
        assert_eq!(try_get_bytes(&store, &slot).unwrap(), None);
    }

    #[test]
    fn overwriting_with_a_shorter_value_leaves_no_stale_chunks() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("channelEnds/ports/transfer/channels/channel-0");

        set_bytes(&mut store, &slot, &blob(200));
        set_bytes(&mut store, &slot, b"short");

        assert_eq!(store.len(), 1);
        assert_eq!(get_bytes(&store, &slot).unwrap(), b"short".to_vec());
    }

    #[test]
    fn corrupted_headers_are_rejected() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("nextChannelSequence");

        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - 1] = 64;
        store.set_word(slot.key(), H256(word));
        let err = get_bytes(&store, &slot).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::BadLength(_)));

        store.set_word(slot.key(), u256_to_h256(U256::from(11u8)));
        let err = get_bytes(&store, &slot).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::BadLength(_)));

        store.set_word(slot.key(), H256::repeat_byte(0xff));
        let err = get_bytes(&store, &slot).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::BadLength(_)));
    }

    #[test]
    fn u64_values_are_big_endian_blobs() {
        let mut store = MemoryStore::new();
        let slot = Slot::new("nextSequenceSend/ports/transfer/channels/channel-0");

        set_u64(&mut store, &slot, 7);
        assert_eq!(get_bytes(&store, &slot).unwrap(), 7u64.to_be_bytes().to_vec());
        assert_eq!(get_u64(&store, &slot).unwrap(), 7);

        set_bytes(&mut store, &slot, b"abc");
        let err = get_u64(&store, &slot).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidU64(_)));
    }
}
