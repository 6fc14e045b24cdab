//! Types for the IBC events emitted by the channel and packet handlers.

use serde_derive::{Deserialize, Serialize};
use subtle_encoding::hex;

use crate::events::{EventAttribute, IbcEvent};
use crate::ics04_channel::packet::Packet;
use crate::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::Height;

/// Channel event attribute keys
pub const HEIGHT_ATTRIBUTE_KEY: &str = "height";
pub const CONNECTION_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const CHANNEL_ID_ATTRIBUTE_KEY: &str = "channel_id";
pub const PORT_ID_ATTRIBUTE_KEY: &str = "port_id";
pub const COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY: &str = "counterparty_channel_id";
pub const COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY: &str = "counterparty_port_id";

/// Packet event attribute keys
pub const PKT_SEQ_ATTRIBUTE_KEY: &str = "packet_sequence";
pub const PKT_DATA_ATTRIBUTE_KEY: &str = "packet_data";
pub const PKT_SRC_PORT_ATTRIBUTE_KEY: &str = "packet_src_port";
pub const PKT_SRC_CHANNEL_ATTRIBUTE_KEY: &str = "packet_src_channel";
pub const PKT_DST_PORT_ATTRIBUTE_KEY: &str = "packet_dst_port";
pub const PKT_DST_CHANNEL_ATTRIBUTE_KEY: &str = "packet_dst_channel";
pub const PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY: &str = "packet_timeout_height";
pub const PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY: &str = "packet_timeout_timestamp";
pub const PKT_ACK_ATTRIBUTE_KEY: &str = "packet_ack";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub height: Height,
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub connection_id: ConnectionId,
    pub counterparty_port_id: PortId,
    pub counterparty_channel_id: Option<ChannelId>,
}

impl From<Attributes> for Vec<EventAttribute> {
    fn from(a: Attributes) -> Self {
        let mut attributes = vec![
            EventAttribute::new(HEIGHT_ATTRIBUTE_KEY, a.height),
            EventAttribute::new(PORT_ID_ATTRIBUTE_KEY, a.port_id),
            EventAttribute::new(CHANNEL_ID_ATTRIBUTE_KEY, a.channel_id),
            EventAttribute::new(CONNECTION_ID_ATTRIBUTE_KEY, a.connection_id),
            EventAttribute::new(COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY, a.counterparty_port_id),
        ];
        if let Some(channel_id) = a.counterparty_channel_id {
            attributes.push(EventAttribute::new(
                COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY,
                channel_id,
            ));
        }
        attributes
    }
}

/// Flattens a packet into its event attributes. The data is hex-encoded.
fn packet_attributes(height: Height, p: Packet) -> Vec<EventAttribute> {
    let data = String::from_utf8(hex::encode(&p.data)).unwrap_or_default();
    vec![
        EventAttribute::new(HEIGHT_ATTRIBUTE_KEY, height),
        EventAttribute::new(PKT_SRC_PORT_ATTRIBUTE_KEY, p.source_port),
        EventAttribute::new(PKT_SRC_CHANNEL_ATTRIBUTE_KEY, p.source_channel),
        EventAttribute::new(PKT_DST_PORT_ATTRIBUTE_KEY, p.destination_port),
        EventAttribute::new(PKT_DST_CHANNEL_ATTRIBUTE_KEY, p.destination_channel),
        EventAttribute::new(PKT_SEQ_ATTRIBUTE_KEY, p.sequence),
        EventAttribute::new(PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY, p.timeout_height),
        EventAttribute::new(
            PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY,
            p.timeout_timestamp.nanoseconds(),
        ),
        EventAttribute::new(PKT_DATA_ATTRIBUTE_KEY, data),
    ]
}

macro_rules! channel_event {
    ($name:ident, $variant:ident) => {
        #[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
        pub struct $name(pub Attributes);

        impl $name {
            pub fn attributes(&self) -> &Attributes {
                &self.0
            }

            pub fn port_id(&self) -> &PortId {
                &self.0.port_id
            }

            pub fn channel_id(&self) -> &ChannelId {
                &self.0.channel_id
            }

            pub fn height(&self) -> Height {
                self.0.height
            }
        }

        impl From<Attributes> for $name {
            fn from(attrs: Attributes) -> Self {
                $name(attrs)
            }
        }

        impl From<$name> for IbcEvent {
            fn from(v: $name) -> Self {
                IbcEvent::$variant(v)
            }
        }
    };
}

channel_event!(OpenInit, OpenInitChannel);
channel_event!(OpenTry, OpenTryChannel);
channel_event!(OpenAck, OpenAckChannel);
channel_event!(OpenConfirm, OpenConfirmChannel);
channel_event!(CloseInit, CloseInitChannel);
channel_event!(CloseConfirm, CloseConfirmChannel);

macro_rules! packet_event {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
        pub struct $name {
            pub height: Height,
            pub packet: Packet,
        }

        impl $name {
            pub fn height(&self) -> Height {
                self.height
            }

            pub fn src_port_id(&self) -> &PortId {
                &self.packet.source_port
            }

            pub fn src_channel_id(&self) -> &ChannelId {
                &self.packet.source_channel
            }

            pub fn dst_port_id(&self) -> &PortId {
                &self.packet.destination_port
            }

            pub fn dst_channel_id(&self) -> &ChannelId {
                &self.packet.destination_channel
            }
        }

        impl From<$name> for IbcEvent {
            fn from(v: $name) -> Self {
                IbcEvent::$name(v)
            }
        }

        impl From<$name> for Vec<EventAttribute> {
            fn from(v: $name) -> Self {
                packet_attributes(v.height, v.packet)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
                write!(f, "{} - h:{}, {}", stringify!($name), self.height, self.packet)
            }
        }
    };
}

packet_event!(
    /// A packet was committed on the source chain.
    SendPacket
);
packet_event!(ReceivePacket);
packet_event!(AcknowledgePacket);
packet_event!(TimeoutPacket);
packet_event!(
    /// A packet timed out because its (ordered) channel was closed on the
    /// destination.
    TimeoutOnClosePacket
);

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WriteAcknowledgement {
    pub height: Height,
    pub packet: Packet,
    pub ack: Vec<u8>,
}

impl WriteAcknowledgement {
    pub fn height(&self) -> Height {
        self.height
    }

    pub fn dst_port_id(&self) -> &PortId {
        &self.packet.destination_port
    }

    pub fn dst_channel_id(&self) -> &ChannelId {
        &self.packet.destination_channel
    }
}

impl From<WriteAcknowledgement> for IbcEvent {
    fn from(v: WriteAcknowledgement) -> Self {
        IbcEvent::WriteAcknowledgement(v)
    }
}

impl From<WriteAcknowledgement> for Vec<EventAttribute> {
    fn from(v: WriteAcknowledgement) -> Self {
        let mut attributes = packet_attributes(v.height, v.packet);
        let ack = String::from_utf8(hex::encode(&v.ack)).unwrap_or_default();
        attributes.push(EventAttribute::new(PKT_ACK_ATTRIBUTE_KEY, ack));
        attributes
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::ics04_channel::packet::test_utils::get_dummy_raw_packet;

    #[test]
    fn channel_attributes_skip_missing_counterparty_channel() {
        let attrs = Attributes {
            height: Height::new(0, 3),
            port_id: PortId::transfer(),
            channel_id: ChannelId::new(0),
            connection_id: ConnectionId::new(0),
            counterparty_port_id: PortId::transfer(),
            counterparty_channel_id: None,
        };

        let event: IbcEvent = OpenInit::from(attrs).into();
        let flat = event.attributes();

        assert_eq!(event.event_type().as_str(), "channel_open_init");
        assert_eq!(flat.len(), 5);
        assert_eq!(flat[2], EventAttribute::new("channel_id", "channel-0"));
    }

    #[test]
    fn packet_attributes_hex_encode_payloads() {
        let mut raw = get_dummy_raw_packet(10, 0);
        raw.data = b"hi".to_vec();
        let packet = Packet::try_from(raw).unwrap();

        let event: IbcEvent = WriteAcknowledgement {
            height: Height::new(0, 1),
            packet,
            ack: vec![0xab],
        }
        .into();
        let flat = event.attributes();

        assert_eq!(event.event_type().as_str(), "write_acknowledgement");
        assert!(flat.contains(&EventAttribute::new("packet_sequence", "1")));
        assert!(flat.contains(&EventAttribute::new("packet_data", "6869")));
        assert!(flat.contains(&EventAttribute::new("packet_ack", "ab")));
        assert!(flat.contains(&EventAttribute::new("packet_timeout_height", "0-10")));
    }
}
