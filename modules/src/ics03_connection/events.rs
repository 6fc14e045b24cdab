//! Types for the IBC events emitted by the connection module.

use serde_derive::{Deserialize, Serialize};

use crate::events::{EventAttribute, IbcEvent};
use crate::ics24_host::identifier::{ClientId, ConnectionId};
use crate::Height;

const HEIGHT_ATTRIBUTE_KEY: &str = "height";
const CONN_ID_ATTRIBUTE_KEY: &str = "connection_id";
const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";
const COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY: &str = "counterparty_connection_id";
const COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY: &str = "counterparty_client_id";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub height: Height,
    pub connection_id: ConnectionId,
    pub client_id: ClientId,
    pub counterparty_connection_id: Option<ConnectionId>,
    pub counterparty_client_id: ClientId,
}

/// Convert attributes to the key/value list handed to the host.
impl From<Attributes> for Vec<EventAttribute> {
    fn from(a: Attributes) -> Self {
        vec![
            EventAttribute::new(HEIGHT_ATTRIBUTE_KEY, a.height),
            EventAttribute::new(CONN_ID_ATTRIBUTE_KEY, a.connection_id),
            EventAttribute::new(CLIENT_ID_ATTRIBUTE_KEY, a.client_id),
            EventAttribute::new(
                COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY,
                a.counterparty_connection_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ),
            EventAttribute::new(COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY, a.counterparty_client_id),
        ]
    }
}

macro_rules! connection_event {
    ($name:ident, $variant:ident) => {
        #[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
        pub struct $name(pub Attributes);

        impl $name {
            pub fn attributes(&self) -> &Attributes {
                &self.0
            }

            pub fn connection_id(&self) -> &ConnectionId {
                &self.0.connection_id
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

connection_event!(OpenInit, OpenInitConnection);
connection_event!(OpenTry, OpenTryConnection);
connection_event!(OpenAck, OpenAckConnection);
connection_event!(OpenConfirm, OpenConfirmConnection);

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;

    #[test]
    fn attributes_flatten_missing_counterparty_to_empty() {
        let attrs = Attributes {
            height: Height::new(0, 10),
            connection_id: ConnectionId::new(0),
            client_id: ClientId::from_str("07-tendermint-0").unwrap(),
            counterparty_connection_id: None,
            counterparty_client_id: ClientId::from_str("07-tendermint-1").unwrap(),
        };

        let event: IbcEvent = OpenInit::from(attrs).into();
        let flat = event.attributes();

        assert_eq!(event.event_type().as_str(), "connection_open_init");
        assert_eq!(flat[1], EventAttribute::new("connection_id", "connection-0"));
        assert_eq!(flat[3], EventAttribute::new("counterparty_connection_id", ""));
    }
}
