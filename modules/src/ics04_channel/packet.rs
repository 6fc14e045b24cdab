use core::str::FromStr;

use derive_more::{Display, From, Into};
use ibc_precompile_proto::ibc::core::channel::v1::Packet as RawPacket;
use serde::Serializer;
use serde_derive::{Deserialize, Serialize};
use subtle_encoding::{Encoding, Hex};

use crate::ics02_client::height::height_or_zero;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::handler::acknowledgement::AckPacketResult;
use crate::ics04_channel::handler::recv_packet::RecvPacketResult;
use crate::ics04_channel::handler::send_packet::SendPacketResult;
use crate::ics04_channel::handler::timeout::TimeoutPacketResult;
use crate::ics04_channel::handler::write_acknowledgement::WriteAckPacketResult;
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::timestamp::Timestamp;
use crate::Height;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketResult {
    Send(SendPacketResult),
    Recv(RecvPacketResult),
    WriteAck(WriteAckPacketResult),
    Ack(AckPacketResult),
    Timeout(TimeoutPacketResult),
}

/// Marker stored on receipt of a packet over an unordered channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receipt {
    Ok,
}

impl Receipt {
    /// Stored byte representation of the marker.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Receipt::Ok => &[1],
        }
    }
}

/// The sequence number of a packet enforces ordering among packets from the same source.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    From,
    Into,
    Display,
)]
pub struct Sequence(u64);

impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.parse::<u64>().map_err(|e| {
            Error::invalid_string_as_sequence(s.to_string(), e)
        })?))
    }
}

impl Sequence {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn increment(&self) -> Sequence {
        Sequence(self.0 + 1)
    }

    /// Big-endian encoding, as stored and as proven to counterparties.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize, Serialize)]
pub struct Packet {
    pub sequence: Sequence,
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub destination_port: PortId,
    pub destination_channel: ChannelId,
    #[serde(serialize_with = "ser_hex_upper")]
    pub data: Vec<u8>,
    pub timeout_height: Height,
    pub timeout_timestamp: Timestamp,
}

fn ser_hex_upper<S, T>(data: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    let hex = Hex::upper_case()
        .encode_to_string(data)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&hex)
}

impl Packet {
    /// Checks whether the packet is timed-out relative to the given view of the
    /// destination chain: its height `dst_chain_height` and timestamp `dst_chain_ts`.
    ///
    /// A timeout is reached once the destination reaches it, i.e. the destination
    /// is at or beyond the timeout height or timestamp. Unset timeouts never expire.
    pub fn timed_out(&self, dst_chain_ts: &Timestamp, dst_chain_height: Height) -> bool {
        self.height_timed_out(dst_chain_height) || self.timestamp_timed_out(dst_chain_ts)
    }

    pub fn height_timed_out(&self, dst_chain_height: Height) -> bool {
        !self.timeout_height.is_zero() && dst_chain_height >= self.timeout_height
    }

    pub fn timestamp_timed_out(&self, dst_chain_ts: &Timestamp) -> bool {
        self.timeout_timestamp.is_set()
            && dst_chain_ts.is_set()
            && !self.timeout_timestamp.after(dst_chain_ts)
    }
}

/// Custom display output to omit the packet data
impl core::fmt::Display for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.sequence,
            self.source_port,
            self.source_channel,
            self.destination_port,
            self.destination_channel,
            self.timeout_height,
            self.timeout_timestamp
        )
    }
}

impl TryFrom<RawPacket> for Packet {
    type Error = Error;

    fn try_from(raw_pkt: RawPacket) -> Result<Self, Self::Error> {
        if Sequence::from(raw_pkt.sequence).is_zero() {
            return Err(Error::zero_packet_sequence());
        }
        let packet_timeout_height = height_or_zero(raw_pkt.timeout_height);

        if raw_pkt.data.is_empty() {
            return Err(Error::zero_packet_data());
        }

        let timeout_timestamp = Timestamp::from_nanoseconds(raw_pkt.timeout_timestamp)
            .map_err(Error::invalid_packet_timestamp)?;

        if packet_timeout_height.is_zero() && !timeout_timestamp.is_set() {
            return Err(Error::zero_packet_timeout());
        }

        Ok(Packet {
            sequence: Sequence::from(raw_pkt.sequence),
            source_port: raw_pkt
                .source_port
                .parse()
                .map_err(Error::invalid_identifier)?,
            source_channel: raw_pkt
                .source_channel
                .parse()
                .map_err(Error::invalid_identifier)?,
            destination_port: raw_pkt
                .destination_port
                .parse()
                .map_err(Error::invalid_identifier)?,
            destination_channel: raw_pkt
                .destination_channel
                .parse()
                .map_err(Error::invalid_identifier)?,
            data: raw_pkt.data,
            timeout_height: packet_timeout_height,
            timeout_timestamp,
        })
    }
}

impl From<Packet> for RawPacket {
    fn from(packet: Packet) -> Self {
        RawPacket {
            sequence: packet.sequence.0,
            source_port: packet.source_port.to_string(),
            source_channel: packet.source_channel.to_string(),
            destination_port: packet.destination_port.to_string(),
            destination_channel: packet.destination_channel.to_string(),
            data: packet.data,
            timeout_height: Some(packet.timeout_height.into()),
            timeout_timestamp: packet.timeout_timestamp.nanoseconds(),
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
pub mod test_utils {
    use ibc_precompile_proto::ibc::core::channel::v1::Packet as RawPacket;
    use ibc_precompile_proto::ibc::core::client::v1::Height as RawHeight;

    /// Returns a dummy `RawPacket`, for testing only!
    /// It travels from `transfer/channel-1` to `transfer/channel-0`.
    pub fn get_dummy_raw_packet(timeout_height: u64, timeout_timestamp: u64) -> RawPacket {
        RawPacket {
            sequence: 1,
            source_port: "transfer".to_string(),
            source_channel: "channel-1".to_string(),
            destination_port: "transfer".to_string(),
            destination_channel: "channel-0".to_string(),
            data: vec![0],
            timeout_height: Some(RawHeight {
                revision_number: 0,
                revision_height: timeout_height,
            }),
            timeout_timestamp,
        }
    }
}
