use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_precompile_proto::ibc::lightclients::tendermint::v1::ClientState as RawTmClientState;
use ibc_precompile_proto::protobuf::Protobuf;
use ibc_precompile_proto::Any;
use prost::Message;
use serde_derive::{Deserialize, Serialize};

use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::error::Error;
use crate::ics07_tendermint::client_state::{
    ClientState as TendermintClientState, TENDERMINT_CLIENT_STATE_TYPE_URL,
};
use crate::ics23_commitment::specs::ProofSpecs;
use crate::Height;

/// Status of a client, derived from its stored state and the host clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The client can be updated and used to verify proofs.
    Active,
    /// The client was frozen after evidence of misbehaviour.
    Frozen,
    /// The latest consensus state is missing or older than the trusting period.
    Expired,
}

impl Status {
    pub fn is_active(&self) -> bool {
        *self == Status::Active
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Frozen => "Frozen",
            Status::Expired => "Expired",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyClientState {
    Tendermint(TendermintClientState),
}

impl AnyClientState {
    pub fn latest_height(&self) -> Height {
        match self {
            Self::Tendermint(tm_state) => tm_state.latest_height(),
        }
    }

    pub fn frozen_height(&self) -> Option<Height> {
        match self {
            Self::Tendermint(tm_state) => tm_state.frozen_height(),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_height().is_some()
    }

    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Tendermint(state) => state.client_type(),
        }
    }

    pub fn proof_specs(&self) -> &ProofSpecs {
        match self {
            Self::Tendermint(state) => &state.proof_specs,
        }
    }

    pub fn upgrade_path(&self) -> &[String] {
        match self {
            Self::Tendermint(state) => &state.upgrade_path,
        }
    }

    /// Checks the client-specific parameters required at creation.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Tendermint(state) => state.validate().map_err(Error::tendermint),
        }
    }

    /// The client state with every field a chain may choose for itself
    /// cleared. This is the form committed to the upgrade store.
    pub fn zero_custom_fields(&self) -> Self {
        match self {
            Self::Tendermint(state) => Self::Tendermint(state.zero_custom_fields()),
        }
    }
}

impl Protobuf<Any> for AnyClientState {}

impl TryFrom<Any> for AnyClientState {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            "" => Err(Error::unknown_client_state_type(raw.type_url)),

            TENDERMINT_CLIENT_STATE_TYPE_URL => Ok(AnyClientState::Tendermint(
                TendermintClientState::decode_vec(&raw.value)
                    .map_err(Error::decode_raw_client_state)?,
            )),

            _ => Err(Error::unknown_client_state_type(raw.type_url)),
        }
    }
}

impl From<AnyClientState> for Any {
    fn from(value: AnyClientState) -> Self {
        match value {
            AnyClientState::Tendermint(value) => Any {
                type_url: TENDERMINT_CLIENT_STATE_TYPE_URL.to_string(),
                value: RawTmClientState::from(value).encode_to_vec(),
            },
        }
    }
}

impl From<TendermintClientState> for AnyClientState {
    fn from(cs: TendermintClientState) -> Self {
        Self::Tendermint(cs)
    }
}

#[cfg(test)]
mod tests {
    use ibc_precompile_proto::Any;
    use test_log::test;

    use super::AnyClientState;
    use crate::ics02_client::error::ErrorDetail;
    use crate::ics07_tendermint::client_state::test_util::get_dummy_tendermint_client_state;
    use crate::Height;

    #[test]
    fn any_client_state_serialization() {
        let tm_client_state = get_dummy_tendermint_client_state(Height::new(0, 10));

        let raw: Any = tm_client_state.clone().into();
        assert_eq!(raw.type_url, "/ibc.lightclients.tendermint.v1.ClientState");

        let decoded = AnyClientState::try_from(raw).unwrap();
        assert_eq!(decoded, tm_client_state);
        assert_eq!(decoded.latest_height(), Height::new(0, 10));
        assert!(!decoded.is_frozen());
    }

    #[test]
    fn unknown_type_url_is_rejected() {
        let raw = Any {
            type_url: "/ibc.lightclients.solomachine.v2.ClientState".to_string(),
            value: vec![],
        };

        match AnyClientState::try_from(raw) {
            Err(e) => match e.detail() {
                ErrorDetail::UnknownClientStateType(e) => {
                    assert_eq!(e.client_state_type, "/ibc.lightclients.solomachine.v2.ClientState")
                }
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unknown client state type was accepted"),
        }
    }
}
