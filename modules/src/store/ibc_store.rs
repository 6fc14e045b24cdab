//! Typed access to the IBC objects kept in a word store.
//!
//! Every object lives under its ICS-24 path (see [`Path`]); the slot key is
//! the keccak hash of the path string. Objects are stored in their protobuf
//! encoding, counters and sequences as 8-byte big-endian integers.

use core::fmt::Display;

use ibc_precompile_proto::ibc::core::channel::v1::Channel as RawChannel;
use ibc_precompile_proto::ibc::core::client::v1::Height as RawHeight;
use ibc_precompile_proto::ibc::core::connection::v1::ConnectionEnd as RawConnectionEnd;
use ibc_precompile_proto::protobuf::Protobuf;
use ibc_precompile_proto::Any;
use prost::Message;

use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_state::AnyClientState;
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::commitment::{AcknowledgementCommitment, PacketCommitment};
use crate::ics04_channel::packet::{Receipt, Sequence};
use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::ics24_host::path::Path;
use crate::timestamp::Timestamp;
use crate::{Address, Height};

use super::codec::{self, Slot};
use super::error::Error;
use super::WordStore;

/// Marker written for granted capabilities.
const CAPABILITY_MARKER: &[u8] = &[1];

#[derive(Clone, Debug, Default)]
pub struct IbcStore<S> {
    words: S,
}

impl<S> IbcStore<S> {
    pub fn new(words: S) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &S {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut S {
        &mut self.words
    }

    pub fn into_words(self) -> S {
        self.words
    }
}

impl<S: WordStore> IbcStore<S> {
    pub fn get_bytes(&self, path: &Path) -> Result<Vec<u8>, Error> {
        codec::get_bytes(&self.words, &slot(path))
    }

    pub fn try_get_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>, Error> {
        codec::try_get_bytes(&self.words, &slot(path))
    }

    pub fn set_bytes(&mut self, path: &Path, value: &[u8]) {
        codec::set_bytes(&mut self.words, &slot(path), value)
    }

    pub fn delete(&mut self, path: &Path) {
        codec::delete_bytes(&mut self.words, &slot(path))
    }

    pub fn contains(&self, path: &Path) -> bool {
        codec::is_set(&self.words, &slot(path))
    }

    pub fn try_get_u64(&self, path: &Path) -> Result<Option<u64>, Error> {
        let slot = slot(path);
        if codec::is_set(&self.words, &slot) {
            codec::get_u64(&self.words, &slot).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn set_u64(&mut self, path: &Path, value: u64) {
        codec::set_u64(&mut self.words, &slot(path), value)
    }

    fn try_get_proto<T, Raw>(&self, path: &Path) -> Result<Option<T>, Error>
    where
        T: Protobuf<Raw>,
        Raw: Message + Default + From<T>,
        <T as TryFrom<Raw>>::Error: Display,
    {
        self.try_get_bytes(path)?
            .map(|bytes| T::decode_vec(&bytes).map_err(|e| Error::decode(path.to_string(), e)))
            .transpose()
    }

    // Encodes before touching the store, so a failed encoding writes nothing.
    fn set_proto<T, Raw>(&mut self, path: &Path, value: T) -> Result<(), Error>
    where
        T: Protobuf<Raw>,
        Raw: Message + Default + From<T>,
        <T as TryFrom<Raw>>::Error: Display,
    {
        let bytes = value
            .encode_vec()
            .map_err(|e| Error::encode(path.to_string(), e))?;
        self.set_bytes(path, &bytes);
        Ok(())
    }

    /// The client type is kept as its ICS identifier string.
    pub fn client_type(&self, client_id: &ClientId) -> Result<Option<String>, Error> {
        let path = Path::ClientType(client_id.clone());
        self.try_get_bytes(&path)?
            .map(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|e| Error::invalid_value(path.to_string(), e.to_string()))
            })
            .transpose()
    }

    pub fn set_client_type(&mut self, client_id: &ClientId, client_type: &str) {
        self.set_bytes(&Path::ClientType(client_id.clone()), client_type.as_bytes())
    }

    pub fn client_state(&self, client_id: &ClientId) -> Result<Option<AnyClientState>, Error> {
        self.try_get_proto::<AnyClientState, Any>(&Path::ClientState(client_id.clone()))
    }

    pub fn set_client_state(
        &mut self,
        client_id: &ClientId,
        client_state: AnyClientState,
    ) -> Result<(), Error> {
        self.set_proto::<AnyClientState, Any>(&Path::ClientState(client_id.clone()), client_state)
    }

    pub fn consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Option<AnyConsensusState>, Error> {
        let path = Path::ClientConsensusState {
            client_id: client_id.clone(),
            height,
        };
        self.try_get_proto::<AnyConsensusState, Any>(&path)
    }

    pub fn set_consensus_state(
        &mut self,
        client_id: &ClientId,
        height: Height,
        consensus_state: AnyConsensusState,
    ) -> Result<(), Error> {
        let path = Path::ClientConsensusState {
            client_id: client_id.clone(),
            height,
        };
        self.set_proto::<AnyConsensusState, Any>(&path, consensus_state)
    }

    /// Host time at which the consensus state at `height` was stored, in
    /// nanoseconds.
    pub fn processed_time(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Option<Timestamp>, Error> {
        let path = Path::ProcessedTime {
            client_id: client_id.clone(),
            height,
        };
        self.try_get_u64(&path)?
            .map(|nanos| {
                Timestamp::from_nanoseconds(nanos)
                    .map_err(|e| Error::invalid_value(path.to_string(), e.to_string()))
            })
            .transpose()
    }

    pub fn set_processed_time(&mut self, client_id: &ClientId, height: Height, time: Timestamp) {
        let path = Path::ProcessedTime {
            client_id: client_id.clone(),
            height,
        };
        self.set_u64(&path, time.nanoseconds())
    }

    pub fn processed_height(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Option<Height>, Error> {
        let path = Path::ProcessedHeight {
            client_id: client_id.clone(),
            height,
        };
        self.try_get_proto::<Height, RawHeight>(&path)
    }

    pub fn set_processed_height(
        &mut self,
        client_id: &ClientId,
        height: Height,
        host_height: Height,
    ) -> Result<(), Error> {
        let path = Path::ProcessedHeight {
            client_id: client_id.clone(),
            height,
        };
        self.set_proto::<Height, RawHeight>(&path, host_height)
    }

    pub fn connection(&self, connection_id: &ConnectionId) -> Result<Option<ConnectionEnd>, Error> {
        let path = Path::Connections(connection_id.clone());
        self.try_get_proto::<ConnectionEnd, RawConnectionEnd>(&path)
    }

    pub fn set_connection(
        &mut self,
        connection_id: &ConnectionId,
        connection_end: ConnectionEnd,
    ) -> Result<(), Error> {
        let path = Path::Connections(connection_id.clone());
        self.set_proto::<ConnectionEnd, RawConnectionEnd>(&path, connection_end)
    }

    pub fn channel(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelEnd>, Error> {
        let path = Path::ChannelEnds(port_id.clone(), channel_id.clone());
        self.try_get_proto::<ChannelEnd, RawChannel>(&path)
    }

    pub fn set_channel(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        channel_end: ChannelEnd,
    ) -> Result<(), Error> {
        self.set_proto::<ChannelEnd, RawChannel>(
            &Path::ChannelEnds(port_id.clone(), channel_id.clone()),
            channel_end,
        )
    }

    pub fn port_owner(&self, port_id: &PortId) -> Result<Option<Address>, Error> {
        let path = Path::Ports(port_id.clone());
        match self.try_get_bytes(&path)? {
            None => Ok(None),
            Some(bytes) if bytes.len() == Address::len_bytes() => {
                Ok(Some(Address::from_slice(&bytes)))
            }
            Some(bytes) => Err(Error::invalid_value(
                path.to_string(),
                format!("{} bytes is not an address", bytes.len()),
            )),
        }
    }

    pub fn set_port_owner(&mut self, port_id: &PortId, owner: Address) {
        self.set_bytes(&Path::Ports(port_id.clone()), owner.as_bytes())
    }

    pub fn has_capability(&self, port_id: &PortId, channel_id: &ChannelId) -> bool {
        self.contains(&Path::Capabilities(port_id.clone(), channel_id.clone()))
    }

    pub fn set_capability(&mut self, port_id: &PortId, channel_id: &ChannelId) {
        self.set_bytes(
            &Path::Capabilities(port_id.clone(), channel_id.clone()),
            CAPABILITY_MARKER,
        )
    }

    /// Reads one of the three per-channel sequence counters.
    pub fn sequence(&self, path: &Path) -> Result<Option<Sequence>, Error> {
        Ok(self.try_get_u64(path)?.map(Sequence::from))
    }

    pub fn set_sequence(&mut self, path: &Path, seq: Sequence) {
        self.set_u64(path, seq.into())
    }

    pub fn packet_commitment(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<PacketCommitment>, Error> {
        let path = commitment_path(port_id, channel_id, sequence);
        Ok(self.try_get_bytes(&path)?.map(PacketCommitment::from))
    }

    pub fn set_packet_commitment(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
        commitment: &PacketCommitment,
    ) {
        let path = commitment_path(port_id, channel_id, sequence);
        self.set_bytes(&path, commitment.as_bytes())
    }

    pub fn delete_packet_commitment(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) {
        self.delete(&commitment_path(port_id, channel_id, sequence))
    }

    pub fn packet_receipt(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<Receipt>, Error> {
        let path = Path::Receipts {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        };
        match self.try_get_bytes(&path)? {
            None => Ok(None),
            Some(bytes) if bytes.as_slice() == Receipt::Ok.as_bytes() => Ok(Some(Receipt::Ok)),
            Some(_) => Err(Error::invalid_value(
                path.to_string(),
                "unknown receipt marker".to_string(),
            )),
        }
    }

    pub fn set_packet_receipt(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
        receipt: Receipt,
    ) {
        let path = Path::Receipts {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        };
        self.set_bytes(&path, receipt.as_bytes())
    }

    pub fn packet_acknowledgement(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<AcknowledgementCommitment>, Error> {
        let path = Path::Acks {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        };
        Ok(self.try_get_bytes(&path)?.map(AcknowledgementCommitment::from))
    }

    pub fn set_packet_acknowledgement(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
        ack_commitment: &AcknowledgementCommitment,
    ) {
        let path = Path::Acks {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence,
        };
        self.set_bytes(&path, ack_commitment.as_bytes())
    }

    /// Identifier counters start at zero when never written.
    pub fn counter(&self, path: &Path) -> Result<u64, Error> {
        Ok(self.try_get_u64(path)?.unwrap_or_default())
    }

    pub fn increase_counter(&mut self, path: &Path) -> Result<(), Error> {
        let next = self.counter(path)?.checked_add(1).ok_or_else(|| {
            Error::invalid_value(path.to_string(), "counter overflow".to_string())
        })?;
        self.set_u64(path, next);
        Ok(())
    }
}

fn slot(path: &Path) -> Slot {
    Slot::new(path.to_string())
}

fn commitment_path(port_id: &PortId, channel_id: &ChannelId, sequence: Sequence) -> Path {
    Path::Commitments {
        port_id: port_id.clone(),
        channel_id: channel_id.clone(),
        sequence,
    }
}
