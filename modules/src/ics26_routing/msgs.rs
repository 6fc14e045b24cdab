use crate::ics02_client::msgs::ClientMsg;
use crate::ics03_connection::msgs::ConnectionMsg;
use crate::ics04_channel::msgs::{ChannelMsg, PacketMsg};
use crate::ics05_port::msgs::PortMsg;

/// Enumeration of all messages that the local ICS26 module is capable of routing.
#[derive(Clone, Debug)]
pub enum Ics26Envelope {
    Ics2Msg(ClientMsg),
    Ics3Msg(ConnectionMsg),
    Ics4ChannelMsg(ChannelMsg),
    Ics4PacketMsg(PacketMsg),
    Ics5Msg(PortMsg),
}

impl Ics26Envelope {
    /// Short name of the module the message is routed to.
    pub fn module(&self) -> &'static str {
        match self {
            Ics26Envelope::Ics2Msg(_) => "client",
            Ics26Envelope::Ics3Msg(_) => "connection",
            Ics26Envelope::Ics4ChannelMsg(_) => "channel",
            Ics26Envelope::Ics4PacketMsg(_) => "packet",
            Ics26Envelope::Ics5Msg(_) => "port",
        }
    }
}
