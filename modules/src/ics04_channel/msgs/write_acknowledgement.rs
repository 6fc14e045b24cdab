use crate::ics04_channel::packet::Packet;

/// Records the application acknowledgement of a received packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgWriteAcknowledgement {
    pub packet: Packet,
    pub ack: Vec<u8>,
}
