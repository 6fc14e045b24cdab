//! Events emitted by the IBC handlers, handed to the host once a message has
//! been processed successfully.

use core::fmt::{Display, Error as FmtError, Formatter};

use serde_derive::{Deserialize, Serialize};

use crate::ics02_client::events as ClientEvents;
use crate::ics03_connection::events as ConnectionEvents;
use crate::ics04_channel::events as ChannelEvents;
use crate::ics05_port::events as PortEvents;

/// A key/value pair describing one aspect of an event.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

impl EventAttribute {
    pub fn new(key: &str, value: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Events types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum IbcEventType {
    CreateClient,
    UpdateClient,
    UpgradeClient,
    ClientMisbehaviour,
    OpenInitConnection,
    OpenTryConnection,
    OpenAckConnection,
    OpenConfirmConnection,
    OpenInitChannel,
    OpenTryChannel,
    OpenAckChannel,
    OpenConfirmChannel,
    CloseInitChannel,
    CloseConfirmChannel,
    SendPacket,
    ReceivePacket,
    WriteAck,
    AckPacket,
    Timeout,
    TimeoutOnClose,
    BindPort,
}

impl IbcEventType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            IbcEventType::CreateClient => "create_client",
            IbcEventType::UpdateClient => "update_client",
            IbcEventType::UpgradeClient => "upgrade_client",
            IbcEventType::ClientMisbehaviour => "client_misbehaviour",
            IbcEventType::OpenInitConnection => "connection_open_init",
            IbcEventType::OpenTryConnection => "connection_open_try",
            IbcEventType::OpenAckConnection => "connection_open_ack",
            IbcEventType::OpenConfirmConnection => "connection_open_confirm",
            IbcEventType::OpenInitChannel => "channel_open_init",
            IbcEventType::OpenTryChannel => "channel_open_try",
            IbcEventType::OpenAckChannel => "channel_open_ack",
            IbcEventType::OpenConfirmChannel => "channel_open_confirm",
            IbcEventType::CloseInitChannel => "channel_close_init",
            IbcEventType::CloseConfirmChannel => "channel_close_confirm",
            IbcEventType::SendPacket => "send_packet",
            IbcEventType::ReceivePacket => "recv_packet",
            IbcEventType::WriteAck => "write_acknowledgement",
            IbcEventType::AckPacket => "acknowledge_packet",
            IbcEventType::Timeout => "timeout_packet",
            IbcEventType::TimeoutOnClose => "timeout_on_close_packet",
            IbcEventType::BindPort => "bind_port",
        }
    }
}

impl Display for IbcEventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum IbcEvent {
    CreateClient(ClientEvents::CreateClient),
    UpdateClient(ClientEvents::UpdateClient),
    UpgradeClient(ClientEvents::UpgradeClient),
    ClientMisbehaviour(ClientEvents::ClientMisbehaviour),

    OpenInitConnection(ConnectionEvents::OpenInit),
    OpenTryConnection(ConnectionEvents::OpenTry),
    OpenAckConnection(ConnectionEvents::OpenAck),
    OpenConfirmConnection(ConnectionEvents::OpenConfirm),

    OpenInitChannel(ChannelEvents::OpenInit),
    OpenTryChannel(ChannelEvents::OpenTry),
    OpenAckChannel(ChannelEvents::OpenAck),
    OpenConfirmChannel(ChannelEvents::OpenConfirm),
    CloseInitChannel(ChannelEvents::CloseInit),
    CloseConfirmChannel(ChannelEvents::CloseConfirm),

    SendPacket(ChannelEvents::SendPacket),
    ReceivePacket(ChannelEvents::ReceivePacket),
    WriteAcknowledgement(ChannelEvents::WriteAcknowledgement),
    AcknowledgePacket(ChannelEvents::AcknowledgePacket),
    TimeoutPacket(ChannelEvents::TimeoutPacket),
    TimeoutOnClosePacket(ChannelEvents::TimeoutOnClosePacket),

    BindPort(PortEvents::BindPort),
}

impl IbcEvent {
    pub fn event_type(&self) -> IbcEventType {
        match self {
            IbcEvent::CreateClient(_) => IbcEventType::CreateClient,
            IbcEvent::UpdateClient(_) => IbcEventType::UpdateClient,
            IbcEvent::UpgradeClient(_) => IbcEventType::UpgradeClient,
            IbcEvent::ClientMisbehaviour(_) => IbcEventType::ClientMisbehaviour,
            IbcEvent::OpenInitConnection(_) => IbcEventType::OpenInitConnection,
            IbcEvent::OpenTryConnection(_) => IbcEventType::OpenTryConnection,
            IbcEvent::OpenAckConnection(_) => IbcEventType::OpenAckConnection,
            IbcEvent::OpenConfirmConnection(_) => IbcEventType::OpenConfirmConnection,
            IbcEvent::OpenInitChannel(_) => IbcEventType::OpenInitChannel,
            IbcEvent::OpenTryChannel(_) => IbcEventType::OpenTryChannel,
            IbcEvent::OpenAckChannel(_) => IbcEventType::OpenAckChannel,
            IbcEvent::OpenConfirmChannel(_) => IbcEventType::OpenConfirmChannel,
            IbcEvent::CloseInitChannel(_) => IbcEventType::CloseInitChannel,
            IbcEvent::CloseConfirmChannel(_) => IbcEventType::CloseConfirmChannel,
            IbcEvent::SendPacket(_) => IbcEventType::SendPacket,
            IbcEvent::ReceivePacket(_) => IbcEventType::ReceivePacket,
            IbcEvent::WriteAcknowledgement(_) => IbcEventType::WriteAck,
            IbcEvent::AcknowledgePacket(_) => IbcEventType::AckPacket,
            IbcEvent::TimeoutPacket(_) => IbcEventType::Timeout,
            IbcEvent::TimeoutOnClosePacket(_) => IbcEventType::TimeoutOnClose,
            IbcEvent::BindPort(_) => IbcEventType::BindPort,
        }
    }

    /// Flattens the event into key/value attributes.
    pub fn attributes(&self) -> Vec<EventAttribute> {
        match self.clone() {
            IbcEvent::CreateClient(ev) => ev.0.into(),
            IbcEvent::UpdateClient(ev) => ev.0.into(),
            IbcEvent::UpgradeClient(ev) => ev.0.into(),
            IbcEvent::ClientMisbehaviour(ev) => ev.0.into(),
            IbcEvent::OpenInitConnection(ev) => ev.0.into(),
            IbcEvent::OpenTryConnection(ev) => ev.0.into(),
            IbcEvent::OpenAckConnection(ev) => ev.0.into(),
            IbcEvent::OpenConfirmConnection(ev) => ev.0.into(),
            IbcEvent::OpenInitChannel(ev) => ev.0.into(),
            IbcEvent::OpenTryChannel(ev) => ev.0.into(),
            IbcEvent::OpenAckChannel(ev) => ev.0.into(),
            IbcEvent::OpenConfirmChannel(ev) => ev.0.into(),
            IbcEvent::CloseInitChannel(ev) => ev.0.into(),
            IbcEvent::CloseConfirmChannel(ev) => ev.0.into(),
            IbcEvent::SendPacket(ev) => ev.into(),
            IbcEvent::ReceivePacket(ev) => ev.into(),
            IbcEvent::WriteAcknowledgement(ev) => ev.into(),
            IbcEvent::AcknowledgePacket(ev) => ev.into(),
            IbcEvent::TimeoutPacket(ev) => ev.into(),
            IbcEvent::TimeoutOnClosePacket(ev) => ev.into(),
            IbcEvent::BindPort(ev) => ev.into(),
        }
    }
}

impl Display for IbcEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.event_type())?;
        for attr in self.attributes() {
            write!(f, " {}={}", attr.key, attr.value)?;
        }
        Ok(())
    }
}
