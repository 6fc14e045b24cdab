use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::timestamp::Timestamp;
use crate::Height;

/// Sends `data` over the channel `source_port/source_channel`. The sequence
/// and the destination are filled in from the channel end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSendPacket {
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub data: Vec<u8>,
    /// Zero means no height timeout.
    pub timeout_height: Height,
    pub timeout_timestamp: Timestamp,
}
