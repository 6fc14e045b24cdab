use crate::ics04_channel::channel::ChannelEnd;
use crate::ics24_host::identifier::PortId;

///
/// Message definition for the first step in the channel open handshake (`ChanOpenInit` datagram).
/// The channel end must be in state `Init`, with no counterparty channel id.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenInit {
    pub port_id: PortId,
    pub channel: ChannelEnd,
}

impl MsgChannelOpenInit {
    pub fn new(port_id: PortId, channel: ChannelEnd) -> Self {
        Self { port_id, channel }
    }
}
