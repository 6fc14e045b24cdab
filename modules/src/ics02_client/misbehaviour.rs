use ibc_precompile_proto::ibc::lightclients::tendermint::v1::Misbehaviour as RawTmMisbehaviour;
use ibc_precompile_proto::protobuf::Protobuf;
use ibc_precompile_proto::Any;
use prost::Message;

use crate::ics02_client::error::Error;
use crate::ics07_tendermint::misbehaviour::{
    Misbehaviour as TmMisbehaviour, TENDERMINT_MISBEHAVIOR_TYPE_URL,
};
use crate::ics24_host::identifier::ClientId;
use crate::Height;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyMisbehaviour {
    Tendermint(TmMisbehaviour),
}

impl AnyMisbehaviour {
    pub fn client_id(&self) -> &ClientId {
        match self {
            Self::Tendermint(misbehaviour) => &misbehaviour.client_id,
        }
    }

    /// The greater of the two conflicting header heights.
    pub fn height(&self) -> Height {
        match self {
            Self::Tendermint(misbehaviour) => misbehaviour.height(),
        }
    }
}

impl Protobuf<Any> for AnyMisbehaviour {}

impl TryFrom<Any> for AnyMisbehaviour {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Error> {
        match raw.type_url.as_str() {
            TENDERMINT_MISBEHAVIOR_TYPE_URL => Ok(AnyMisbehaviour::Tendermint(
                TmMisbehaviour::decode_vec(&raw.value).map_err(Error::decode_raw_misbehaviour)?,
            )),

            _ => Err(Error::unknown_misbehaviour_type(raw.type_url)),
        }
    }
}

impl From<AnyMisbehaviour> for Any {
    fn from(value: AnyMisbehaviour) -> Self {
        match value {
            AnyMisbehaviour::Tendermint(misbehaviour) => Any {
                type_url: TENDERMINT_MISBEHAVIOR_TYPE_URL.to_string(),
                value: RawTmMisbehaviour::from(misbehaviour).encode_to_vec(),
            },
        }
    }
}

impl From<TmMisbehaviour> for AnyMisbehaviour {
    fn from(misbehaviour: TmMisbehaviour) -> Self {
        Self::Tendermint(misbehaviour)
    }
}
