//! Definition of domain type message `MsgUpdateAnyClient`.

use ibc_precompile_proto::protobuf::Protobuf;

use crate::ics02_client::error::Error;
use crate::ics02_client::header::AnyHeader;
use crate::ics24_host::identifier::ClientId;

/// A type of message that triggers the update of an on-chain (IBC) client with new headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateAnyClient {
    pub client_id: ClientId,
    pub header: AnyHeader,
}

impl MsgUpdateAnyClient {
    pub fn new(client_id: ClientId, header: AnyHeader) -> Self {
        MsgUpdateAnyClient { client_id, header }
    }

    /// Builds the message from an `Any`-encoded header.
    pub fn from_encoded(client_id: ClientId, header: &[u8]) -> Result<Self, Error> {
        Ok(Self::new(
            client_id,
            AnyHeader::decode_vec(header).map_err(Error::decode_raw_header)?,
        ))
    }
}
