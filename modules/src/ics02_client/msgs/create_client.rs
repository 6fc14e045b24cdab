//! Definition of domain type message `MsgCreateAnyClient`.

use ibc_precompile_proto::protobuf::Protobuf;

use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::error::Error;

/// A type of message that triggers the creation of a new on-chain (IBC) client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgCreateAnyClient {
    /// Client type requested by the caller, either `tendermint` or `07-tendermint`.
    pub client_type: String,
    pub client_state: AnyClientState,
    pub consensus_state: AnyConsensusState,
}

impl MsgCreateAnyClient {
    pub fn new(
        client_type: impl Into<String>,
        client_state: AnyClientState,
        consensus_state: AnyConsensusState,
    ) -> Self {
        MsgCreateAnyClient {
            client_type: client_type.into(),
            client_state,
            consensus_state,
        }
    }

    /// Builds the message from `Any`-encoded client and consensus states.
    pub fn from_encoded(
        client_type: impl Into<String>,
        client_state: &[u8],
        consensus_state: &[u8],
    ) -> Result<Self, Error> {
        Ok(Self::new(
            client_type,
            AnyClientState::decode_vec(client_state).map_err(Error::decode_raw_client_state)?,
            AnyConsensusState::decode_vec(consensus_state)
                .map_err(Error::decode_raw_consensus_state)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use super::MsgCreateAnyClient;
    use crate::ics07_tendermint::client_state::test_util::get_dummy_tendermint_client_state;
    use crate::ics07_tendermint::consensus_state::ConsensusState;
    use crate::ics07_tendermint::header::test_util::get_dummy_tendermint_header;
    use crate::Height;

    #[test]
    fn msg_from_encoded_states() {
        let height = Height::new(0, 5);
        let client_state = get_dummy_tendermint_client_state(height);
        let consensus_state: crate::ics02_client::client_consensus::AnyConsensusState =
            ConsensusState::from(get_dummy_tendermint_header(height, Height::zero())).into();

        let msg = MsgCreateAnyClient::from_encoded(
            "tendermint",
            &client_state.encode_vec().unwrap(),
            &consensus_state.encode_vec().unwrap(),
        )
        .unwrap();

        assert_eq!(msg, MsgCreateAnyClient::new("tendermint", client_state, consensus_state));
        assert!(MsgCreateAnyClient::from_encoded("tendermint", b"garbage", &[]).is_err());
    }
}
