//! Helpers for building real ICS-23 proofs in tests.
//!
//! [`CommitmentTree`] models a counterparty's committed state as a two-level
//! chained tree, the way Cosmos SDK chains commit it: a store tree holding
//! the IBC paths, whose root is itself a leaf (keyed by the store prefix) of
//! the multistore tree. Both levels follow the Tendermint simple-merkle
//! layout, so proofs check out against [`proof_specs`].

use std::collections::BTreeMap;

use ibc_precompile_proto::ibc::core::commitment::v1::MerkleProof as RawMerkleProof;
use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, CommitmentProof, ExistenceProof, HashOp, HostFunctionsManager,
    InnerOp, NonExistenceProof,
};
use sha2::{Digest, Sha256};

use crate::ics23_commitment::specs::ProofSpecs;
use crate::Address;

/// Proof specs matching the trees built by [`CommitmentTree`].
pub fn proof_specs() -> ProofSpecs {
    vec![ics23::tendermint_spec(), ics23::tendermint_spec()].into()
}

/// Address of the account submitting messages in tests.
pub fn get_dummy_address() -> Address {
    Address::repeat_byte(0x11)
}

#[derive(Clone, Debug, Default)]
pub struct CommitmentTree {
    prefix: Vec<u8>,
    leaves: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl CommitmentTree {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.as_bytes().to_vec(),
            leaves: BTreeMap::new(),
        }
    }

    pub fn with(mut self, path: impl ToString, value: Vec<u8>) -> Self {
        self.insert(path, value);
        self
    }

    pub fn insert(&mut self, path: impl ToString, value: Vec<u8>) {
        self.leaves.insert(path.to_string().into_bytes(), value);
    }

    /// Root of the multistore, i.e. the `app_hash` a consensus state records.
    pub fn root(&self) -> Vec<u8> {
        let (_, multistore) = self.levels();
        root_of(&multistore)
    }

    /// Encoded `MerkleProof` that `path` maps to its stored value.
    pub fn membership_proof(&self, path: impl ToString) -> Vec<u8> {
        let key = path.to_string().into_bytes();
        let (store, multistore) = self.levels();
        let leaf = store
            .iter()
            .find(|proof| proof.key == key)
            .cloned()
            .expect("path must be present in the tree");

        encode(vec![Proof::Exist(leaf), Proof::Exist(multistore)])
    }

    /// Encoded `MerkleProof` that nothing is stored at `path`.
    pub fn non_membership_proof(&self, path: impl ToString) -> Vec<u8> {
        let key = path.to_string().into_bytes();
        assert!(!self.leaves.contains_key(&key), "path must be absent from the tree");

        let (store, multistore) = self.levels();
        let left = store.iter().filter(|proof| proof.key < key).last().cloned();
        let right = store.iter().find(|proof| proof.key > key).cloned();

        encode(vec![
            Proof::Nonexist(NonExistenceProof { key, left, right }),
            Proof::Exist(multistore),
        ])
    }

    /// Existence proofs for every leaf of the store tree, plus the proof of
    /// the store root inside the multistore.
    fn levels(&self) -> (Vec<ExistenceProof>, ExistenceProof) {
        assert!(!self.leaves.is_empty(), "a commitment tree needs at least one leaf");

        let leaves: Vec<(Vec<u8>, Vec<u8>)> = self
            .leaves
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let store = build(&leaves);
        let store_root = root_of(&store[0]);

        let multistore = build(&[(self.prefix.clone(), store_root)])
            .pop()
            .expect("one leaf yields one proof");

        (store, multistore)
    }
}

fn root_of(proof: &ExistenceProof) -> Vec<u8> {
    calculate_existence_root::<HostFunctionsManager>(proof).expect("well-formed existence proof")
}

fn leaf(key: Vec<u8>, value: Vec<u8>) -> ExistenceProof {
    ExistenceProof {
        key,
        value,
        leaf: ics23::tendermint_spec().leaf_spec,
        path: vec![],
    }
}

fn inner_hash(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update([1u8]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().to_vec()
}

/// Builds the existence proofs of a simple merkle tree over sorted leaves.
/// The tree splits at the largest power of two below the leaf count.
fn build(leaves: &[(Vec<u8>, Vec<u8>)]) -> Vec<ExistenceProof> {
    if leaves.len() == 1 {
        let (key, value) = leaves[0].clone();
        return vec![leaf(key, value)];
    }

    let split = leaves.len().next_power_of_two() / 2;
    let mut left = build(&leaves[..split]);
    let mut right = build(&leaves[split..]);
    let left_hash = root_of(&left[0]);
    let right_hash = root_of(&right[0]);

    for proof in left.iter_mut() {
        proof.path.push(InnerOp {
            hash: HashOp::Sha256 as i32,
            prefix: vec![1],
            suffix: right_hash.clone(),
        });
    }
    for proof in right.iter_mut() {
        let mut prefix = vec![1];
        prefix.extend_from_slice(&left_hash);
        proof.path.push(InnerOp {
            hash: HashOp::Sha256 as i32,
            prefix,
            suffix: vec![],
        });
    }

    debug_assert_eq!(root_of(&left[0]), inner_hash(&left_hash, &right_hash));
    left.append(&mut right);
    left
}

fn encode(proofs: Vec<Proof>) -> Vec<u8> {
    let raw = RawMerkleProof {
        proofs: proofs
            .into_iter()
            .map(|proof| CommitmentProof { proof: Some(proof) })
            .collect(),
    };
    prost::Message::encode_to_vec(&raw)
}
