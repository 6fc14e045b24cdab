use ibc_precompile_proto::ibc::lightclients::tendermint::v1::ConsensusState as RawTmConsensusState;
use ibc_precompile_proto::protobuf::Protobuf;
use ibc_precompile_proto::Any;
use prost::Message;

use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::error::Error;
use crate::ics07_tendermint::consensus_state::{
    ConsensusState as TendermintConsensusState, TENDERMINT_CONSENSUS_STATE_TYPE_URL,
};
use crate::ics23_commitment::commitment::CommitmentRoot;
use crate::timestamp::Timestamp;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyConsensusState {
    Tendermint(TendermintConsensusState),
}

impl AnyConsensusState {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Tendermint(cs_state) => cs_state.timestamp,
        }
    }

    pub fn root(&self) -> &CommitmentRoot {
        match self {
            Self::Tendermint(cs_state) => &cs_state.root,
        }
    }

    pub fn client_type(&self) -> ClientType {
        match self {
            AnyConsensusState::Tendermint(_) => ClientType::Tendermint,
        }
    }
}

impl Protobuf<Any> for AnyConsensusState {}

impl TryFrom<Any> for AnyConsensusState {
    type Error = Error;

    fn try_from(value: Any) -> Result<Self, Self::Error> {
        match value.type_url.as_str() {
            "" => Err(Error::unknown_consensus_state_type(value.type_url)),

            TENDERMINT_CONSENSUS_STATE_TYPE_URL => Ok(AnyConsensusState::Tendermint(
                TendermintConsensusState::decode_vec(&value.value)
                    .map_err(Error::decode_raw_consensus_state)?,
            )),

            _ => Err(Error::unknown_consensus_state_type(value.type_url)),
        }
    }
}

impl From<AnyConsensusState> for Any {
    fn from(value: AnyConsensusState) -> Self {
        match value {
            AnyConsensusState::Tendermint(value) => Any {
                type_url: TENDERMINT_CONSENSUS_STATE_TYPE_URL.to_string(),
                value: RawTmConsensusState::from(value).encode_to_vec(),
            },
        }
    }
}

impl From<TendermintConsensusState> for AnyConsensusState {
    fn from(cs: TendermintConsensusState) -> Self {
        Self::Tendermint(cs)
    }
}

#[cfg(test)]
mod tests {
    use ibc_precompile_proto::Any;
    use test_log::test;

    use super::AnyConsensusState;
    use crate::ics07_tendermint::consensus_state::ConsensusState;
    use crate::timestamp::Timestamp;

    #[test]
    fn any_consensus_state_serialization() {
        let timestamp = Timestamp::from_nanoseconds(1_600_000_000_000_000_000).unwrap();
        let consensus_state: AnyConsensusState =
            ConsensusState::new(vec![7; 32].into(), timestamp, vec![1; 32]).into();

        let raw: Any = consensus_state.clone().into();
        assert_eq!(raw.type_url, "/ibc.lightclients.tendermint.v1.ConsensusState");

        let decoded = AnyConsensusState::try_from(raw).unwrap();
        assert_eq!(decoded, consensus_state);
        assert_eq!(decoded.timestamp(), timestamp);
        assert_eq!(decoded.root().as_bytes(), &[7; 32]);
    }
}
