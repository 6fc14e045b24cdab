use ibc_precompile_proto::ibc::core::commitment::v1::MerkleRoot;
use ibc_precompile_proto::ibc::lightclients::tendermint::v1::ConsensusState as RawConsensusState;
use ibc_precompile_proto::protobuf::Protobuf;
use serde_derive::{Deserialize, Serialize};

use crate::ics07_tendermint::error::Error;
use crate::ics07_tendermint::header::Header;
use crate::ics23_commitment::commitment::CommitmentRoot;
use crate::timestamp::Timestamp;

pub const TENDERMINT_CONSENSUS_STATE_TYPE_URL: &str =
    "/ibc.lightclients.tendermint.v1.ConsensusState";

/// Root written into the consensus state installed by a client upgrade. No
/// proof can verify against it, so the client must be updated with a header
/// of the upgraded chain before it is used again.
pub const SENTINEL_ROOT: &[u8] = b"sentinel_root";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    pub timestamp: Timestamp,
    pub root: CommitmentRoot,
    pub next_validators_hash: Vec<u8>,
}

impl ConsensusState {
    pub fn new(root: CommitmentRoot, timestamp: Timestamp, next_validators_hash: Vec<u8>) -> Self {
        Self {
            timestamp,
            root,
            next_validators_hash,
        }
    }

    /// The consensus state taking over after an upgrade.
    pub fn upgraded(upgraded: &ConsensusState) -> Self {
        Self::new(
            CommitmentRoot::from_bytes(SENTINEL_ROOT),
            upgraded.timestamp,
            upgraded.next_validators_hash.clone(),
        )
    }
}

impl Protobuf<RawConsensusState> for ConsensusState {}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = Error;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        let timestamp = raw
            .timestamp
            .ok_or_else(Error::missing_timestamp)
            .and_then(|ts| Timestamp::from_proto(&ts).map_err(Error::invalid_timestamp))?;

        Ok(Self {
            root: raw
                .root
                .ok_or_else(Error::missing_root)?
                .hash
                .into(),
            timestamp,
            next_validators_hash: raw.next_validators_hash,
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(value: ConsensusState) -> Self {
        RawConsensusState {
            timestamp: value.timestamp.into_proto(),
            root: Some(MerkleRoot {
                hash: value.root.into_vec(),
            }),
            next_validators_hash: value.next_validators_hash,
        }
    }
}

impl From<Header> for ConsensusState {
    fn from(header: Header) -> Self {
        Self {
            root: CommitmentRoot::from_bytes(&header.app_hash),
            timestamp: header.timestamp,
            next_validators_hash: header.next_validators_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use super::ConsensusState;
    use crate::ics07_tendermint::header::test_util::get_dummy_tendermint_header;
    use crate::Height;

    #[test]
    fn consensus_state_from_header() {
        let header = get_dummy_tendermint_header(Height::new(0, 5), Height::new(0, 4));
        let consensus_state = ConsensusState::from(header.clone());

        assert_eq!(consensus_state.root.as_bytes(), header.app_hash.as_slice());
        assert_eq!(consensus_state.timestamp, header.timestamp);

        let decoded = ConsensusState::decode_vec(&consensus_state.encode_vec().unwrap()).unwrap();
        assert_eq!(decoded, consensus_state);
    }
}
