use ibc_precompile_proto::ibc::core::commitment::v1::MerklePath;
use ibc_precompile_proto::ibc::core::commitment::v1::MerkleProof as RawMerkleProof;
use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsManager, NonExistenceProof,
};

use super::commitment::{CommitmentPrefix, CommitmentRoot};
use super::error::Error;
use super::specs::ProofSpecs;

/// Prepends the store prefix to a path, yielding the root-to-leaf key path
/// a chained proof is checked against.
pub fn apply_prefix(prefix: &CommitmentPrefix, mut path: Vec<String>) -> MerklePath {
    let mut key_path: Vec<String> = vec![format!("{prefix:?}")];
    key_path.append(&mut path);
    MerklePath { key_path }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    pub proofs: Vec<CommitmentProof>,
}

impl From<RawMerkleProof> for MerkleProof {
    fn from(proof: RawMerkleProof) -> Self {
        Self {
            proofs: proof.proofs,
        }
    }
}

impl From<MerkleProof> for RawMerkleProof {
    fn from(proof: MerkleProof) -> Self {
        Self {
            proofs: proof.proofs,
        }
    }
}

impl MerkleProof {
    fn check_shape(&self, specs: &ProofSpecs, root: &CommitmentRoot, keys: &MerklePath) -> Result<(), Error> {
        if self.proofs.is_empty() {
            return Err(Error::empty_merkle_proof());
        }
        if root.is_empty() {
            return Err(Error::empty_merkle_root());
        }
        let num = self.proofs.len();
        if specs.len() != num {
            return Err(Error::number_of_specs_mismatch(specs.len(), num));
        }
        if keys.key_path.len() != num {
            return Err(Error::number_of_keys_mismatch(keys.key_path.len(), num));
        }
        Ok(())
    }

    pub fn verify_membership(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        keys: &MerklePath,
        value: Vec<u8>,
        start_index: usize,
    ) -> Result<(), Error> {
        // validate arguments
        self.check_shape(specs, root, keys)?;
        if value.is_empty() {
            return Err(Error::empty_verified_value());
        }

        let mut subroot = value.clone();
        let mut value = value;
        // keys are represented from root-to-leaf
        for ((proof, spec), key) in self
            .proofs
            .iter()
            .zip(specs.iter())
            .zip(keys.key_path.iter().rev())
            .skip(start_index)
        {
            match &proof.proof {
                Some(Proof::Exist(existence_proof)) => {
                    subroot = calculate_existence_root::<HostFunctionsManager>(existence_proof)
                        .map_err(|_| Error::invalid_merkle_proof())?;

                    if !verify_membership::<HostFunctionsManager>(
                        proof,
                        spec,
                        &subroot,
                        key.as_bytes(),
                        &value,
                    ) {
                        return Err(Error::verification_failure());
                    }
                    value.clone_from(&subroot);
                }
                _ => return Err(Error::invalid_merkle_proof()),
            }
        }

        if root.as_bytes() != subroot.as_slice() {
            return Err(Error::verification_failure());
        }

        Ok(())
    }

    pub fn verify_non_membership(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        keys: &MerklePath,
    ) -> Result<(), Error> {
        // validate arguments
        self.check_shape(specs, root, keys)?;

        // verify the absence of key in lowest subtree
        let proof = self.proofs.first().ok_or_else(Error::invalid_merkle_proof)?;
        let spec = specs.iter().next().ok_or_else(Error::invalid_merkle_proof)?;
        // keys are represented from root-to-leaf
        let key = keys.key_path.last().ok_or_else(Error::invalid_merkle_proof)?;

        match &proof.proof {
            Some(Proof::Nonexist(non_existence_proof)) => {
                let subroot = calculate_non_existence_root(non_existence_proof)?;

                if !verify_non_membership::<HostFunctionsManager>(
                    proof,
                    spec,
                    &subroot,
                    key.as_bytes(),
                ) {
                    return Err(Error::verification_failure());
                }

                // verify membership proofs starting from index 1 with value = subroot
                self.verify_membership(specs, root, keys, subroot, 1)
            }
            _ => Err(Error::invalid_merkle_proof()),
        }
    }
}

fn calculate_non_existence_root(proof: &NonExistenceProof) -> Result<Vec<u8>, Error> {
    let neighbour = proof
        .left
        .as_ref()
        .or(proof.right.as_ref())
        .ok_or_else(Error::invalid_merkle_proof)?;

    calculate_existence_root::<HostFunctionsManager>(neighbour)
        .map_err(|_| Error::invalid_merkle_proof())
}
