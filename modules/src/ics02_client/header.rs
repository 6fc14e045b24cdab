use ibc_precompile_proto::ibc::lightclients::tendermint::v1::Header as RawTmHeader;
use ibc_precompile_proto::protobuf::Protobuf;
use ibc_precompile_proto::Any;
use prost::Message;

use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::error::Error;
use crate::ics07_tendermint::header::{Header as TendermintHeader, TENDERMINT_HEADER_TYPE_URL};
use crate::timestamp::Timestamp;
use crate::Height;

/// Headers submitted to update a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyHeader {
    Tendermint(TendermintHeader),
}

impl AnyHeader {
    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Tendermint(header) => header.client_type(),
        }
    }

    pub fn height(&self) -> Height {
        match self {
            Self::Tendermint(header) => header.height,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Tendermint(header) => header.timestamp,
        }
    }
}

impl Protobuf<Any> for AnyHeader {}

impl TryFrom<Any> for AnyHeader {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Error> {
        match raw.type_url.as_str() {
            TENDERMINT_HEADER_TYPE_URL => {
                let val = TendermintHeader::decode_vec(&raw.value).map_err(Error::decode_raw_header)?;

                Ok(AnyHeader::Tendermint(val))
            }

            _ => Err(Error::unknown_header_type(raw.type_url)),
        }
    }
}

impl From<AnyHeader> for Any {
    fn from(value: AnyHeader) -> Self {
        match value {
            AnyHeader::Tendermint(header) => Any {
                type_url: TENDERMINT_HEADER_TYPE_URL.to_string(),
                value: RawTmHeader::from(header).encode_to_vec(),
            },
        }
    }
}

impl From<TendermintHeader> for AnyHeader {
    fn from(header: TendermintHeader) -> Self {
        Self::Tendermint(header)
    }
}
