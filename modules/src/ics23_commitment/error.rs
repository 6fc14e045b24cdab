use flex_error::{define_error, TraceError};
use prost::DecodeError;

define_error! {
    #[derive(Debug)]
    Error {
        InvalidRawMerkleProof
            [ TraceError<DecodeError> ]
            |_| { "invalid raw merkle proof" },

        EmptyCommitmentPrefix
            |_| { "empty commitment prefix" },

        EmptyMerkleProof
            |_| { "empty merkle proof" },

        EmptyMerkleRoot
            |_| { "empty merkle root" },

        EmptyVerifiedValue
            |_| { "empty verified value" },

        NumberOfSpecsMismatch
            { specs: usize, proofs: usize }
            | e | { format_args!("mismatch between the number of proofs ({1}) and specs ({0})", e.specs, e.proofs) },

        NumberOfKeysMismatch
            { keys: usize, proofs: usize }
            | e | { format_args!("mismatch between the number of proofs ({1}) and keys ({0})", e.keys, e.proofs) },

        InvalidMerkleProof
            |_| { "invalid merkle proof" },

        VerificationFailure
            |_| { "proof verification failed" },
    }
}
