use flex_error::{define_error, TraceError};
use ibc_precompile_proto::protobuf::Error as ProtoError;

use crate::ics02_client::error as client_error;
use crate::ics03_connection::error as connection_error;
use crate::ics04_channel::channel::State;
use crate::ics04_channel::packet::Sequence;
use crate::ics05_port::error as port_error;
use crate::ics24_host::error::ValidationError;
use crate::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::store::Error as StoreError;
use crate::timestamp::{ParseTimestampError, Timestamp};
use crate::Height;

define_error! {
    #[derive(Debug)]
    Error {
        Ics02Client
            [ client_error::Error ]
            | _ | { "ics02 client error" },

        Ics03Connection
            [ connection_error::Error ]
            | _ | { "ics03 connection error" },

        Ics05Port
            [ port_error::Error ]
            | _ | { "ics05 port error" },

        UnknownState
            { state: i32 }
            | e | { format_args!("channel state unknown: {}", e.state) },

        UnknownOrderType
            { type_id: String }
            | e | { format_args!("channel order type unknown: {}", e.type_id) },

        UninitializedChannel
            | _ | { "a channel end must not be in the uninitialized state" },

        MissingCounterparty
            | _ | { "missing counterparty" },

        InvalidIdentifier
            [ ValidationError ]
            | _ | { "identifier error" },

        InvalidConnectionHopsLength
            { expected: usize, actual: usize }
            | e | {
                format_args!(
                    "expected connection hops to be of length {} but instead got {}",
                    e.expected, e.actual)
            },

        InvalidVersionLengthConnection
            | _ | { "single version must be negotiated on connection before opening channel" },

        ChannelFeatureNotSupportedByConnection
            | _ | { "the channel ordering is not supported by connection" },

        InvalidChannelState
            { channel_id: ChannelId, state: State }
            | e | {
                format_args!(
                    "channel {0} is in state {1}, which does not allow this operation",
                    e.channel_id, e.state)
            },

        ChannelNotFound
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!("channel {1} on port {0} does not exist", e.port_id, e.channel_id)
            },

        ConnectionNotOpen
            { connection_id: ConnectionId }
            | e | { format_args!("connection {0} is not open", e.connection_id) },

        MissingCounterpartyConnectionId
            | _ | { "the counterparty of the channel's connection has no connection id" },

        InvalidCounterpartyChannelId
            | _ | { "invalid counterparty channel id" },

        MissingNextSendSeq
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!("missing sequence number for sending packets on port {0} and channel {1}",
                    e.port_id, e.channel_id)
            },

        MissingNextRecvSeq
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!("missing sequence number for receiving packets on port {0} and channel {1}",
                    e.port_id, e.channel_id)
            },

        MissingNextAckSeq
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!("missing sequence number for ack packets on port {0} and channel {1}",
                    e.port_id, e.channel_id)
            },

        InvalidPacketCounterparty
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!(
                    "packet port ({0}) and channel ({1}) do not match the channel counterparty",
                    e.port_id, e.channel_id)
            },

        SequenceOutOfOrder
            { given_sequence: Sequence, next_sequence: Sequence }
            | e | {
                format_args!(
                    "packet sequence {0} is ahead of the next sequence to receive {1}",
                    e.given_sequence, e.next_sequence)
            },

        InvalidPacketSequence
            { given_sequence: Sequence, next_sequence: Sequence }
            | e | {
                format_args!(
                    "packet sequence {0} does not match the expected sequence {1}",
                    e.given_sequence, e.next_sequence)
            },

        InvalidStringAsSequence
            { value: String }
            [ TraceError<core::num::ParseIntError> ]
            | e | { format_args!("string {0} cannot be converted to a packet sequence", e.value) },

        LowPacketHeight
            { chain_height: Height, timeout_height: Height }
            | e | {
                format_args!(
                    "receiving chain block height {0} >= packet timeout height {1}",
                    e.chain_height, e.timeout_height)
            },

        LowPacketTimestamp
            { chain_timestamp: Timestamp, timeout_timestamp: Timestamp }
            | e | {
                format_args!(
                    "receiving chain block timestamp {0} >= packet timeout timestamp {1}",
                    e.chain_timestamp, e.timeout_timestamp)
            },

        PacketTimeoutNotReached
            {
                timeout_height: Height,
                chain_height: Height,
                timeout_timestamp: Timestamp,
                chain_timestamp: Timestamp,
            }
            | e | {
                format_args!(
                    "packet timeout height {0} > proof height {1} and timeout timestamp {2} > counterparty timestamp {3}",
                    e.timeout_height, e.chain_height, e.timeout_timestamp, e.chain_timestamp)
            },

        InvalidPacketTimestamp
            [ ParseTimestampError ]
            | _ | { "invalid packet timeout timestamp value" },

        ZeroPacketSequence
            | _ | { "packet sequence cannot be 0" },

        ZeroPacketData
            | _ | { "packet data bytes cannot be empty" },

        ZeroPacketTimeout
            | _ | { "packet timeout height and packet timeout timestamp cannot both be 0" },

        IncorrectPacketCommitment
            { sequence: Sequence }
            | e | {
                format_args!("the stored commitment of the packet {0} is incorrect", e.sequence)
            },

        InvalidAcknowledgement
            | _ | { "acknowledgement cannot be empty" },

        AcknowledgementExists
            { sequence: Sequence }
            | e | {
                format_args!("packet acknowledgement exists for the packet with the sequence {0}",
                    e.sequence)
            },

        CapabilityMissing
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!("caller does not own the capability for channel {1} on port {0}",
                    e.port_id, e.channel_id)
            },

        ChannelCounterOverflow
            | _ | { "channel counter overflow" },

        NoOpMsg
            { description: String }
            | e | { format_args!("message has no effect: {0}", e.description) },

        VerifyChannelFailed
            [ client_error::Error ]
            | _ | { "error verifying the counterparty channel end" },

        PacketVerificationFailed
            { sequence: Sequence }
            [ client_error::Error ]
            | e | {
                format_args!("verification fails for the packet with the sequence number {0}",
                    e.sequence)
            },

        EncodeChannelEnd
            [ ProtoError ]
            | _ | { "failed to encode the channel end" },

        Store
            [ StoreError ]
            | _ | { "storage error" },
    }
}

impl Error {
    /// Whether this error marks a message that was already processed and must
    /// succeed without effects.
    pub fn is_no_op(&self) -> bool {
        matches!(self.detail(), ErrorDetail::NoOpMsg(_))
    }
}
