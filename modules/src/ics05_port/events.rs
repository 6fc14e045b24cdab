//! Types for the IBC events emitted by the port module.

use serde_derive::{Deserialize, Serialize};

use crate::events::{EventAttribute, IbcEvent};
use crate::ics24_host::identifier::PortId;
use crate::Address;

const PORT_ID_ATTRIBUTE_KEY: &str = "port_id";
const OWNER_ATTRIBUTE_KEY: &str = "owner";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BindPort {
    pub port_id: PortId,
    pub owner: Address,
}

impl From<BindPort> for IbcEvent {
    fn from(v: BindPort) -> Self {
        IbcEvent::BindPort(v)
    }
}

impl From<BindPort> for Vec<EventAttribute> {
    fn from(v: BindPort) -> Self {
        vec![
            EventAttribute::new(PORT_ID_ATTRIBUTE_KEY, v.port_id),
            EventAttribute::new(OWNER_ATTRIBUTE_KEY, format!("{:?}", v.owner)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn bind_port_event_serializes() {
        let event = BindPort {
            port_id: PortId::transfer(),
            owner: Address::repeat_byte(0x42),
        };

        let json = serde_json::to_string(&event).unwrap();
        let decoded: BindPort = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);

        let attributes = Vec::<EventAttribute>::from(event);
        assert_eq!(attributes[0].key, PORT_ID_ATTRIBUTE_KEY);
        assert_eq!(attributes[0].value, "transfer");
        assert_eq!(attributes[1].key, OWNER_ATTRIBUTE_KEY);
    }
}
