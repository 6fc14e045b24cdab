//! Types for the IBC events emitted by the client module.

use serde_derive::{Deserialize, Serialize};

use crate::events::{EventAttribute, IbcEvent};
use crate::ics02_client::client_type::ClientType;
use crate::ics24_host::identifier::ClientId;
use crate::Height;

/// The content of the `key` field for the attribute containing the height.
const HEIGHT_ATTRIBUTE_KEY: &str = "height";

/// The content of the `key` field for the attribute containing the client identifier.
const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";

/// The content of the `key` field for the attribute containing the client type.
const CLIENT_TYPE_ATTRIBUTE_KEY: &str = "client_type";

/// The content of the `key` field for the attribute containing the height.
const CONSENSUS_HEIGHT_ATTRIBUTE_KEY: &str = "consensus_height";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Attributes {
    /// Host height at which the event happened.
    pub height: Height,
    pub client_id: ClientId,
    pub client_type: ClientType,
    pub consensus_height: Height,
}

impl From<Attributes> for Vec<EventAttribute> {
    fn from(a: Attributes) -> Self {
        vec![
            EventAttribute::new(HEIGHT_ATTRIBUTE_KEY, a.height),
            EventAttribute::new(CLIENT_ID_ATTRIBUTE_KEY, a.client_id),
            EventAttribute::new(CLIENT_TYPE_ATTRIBUTE_KEY, a.client_type.as_str()),
            EventAttribute::new(CONSENSUS_HEIGHT_ATTRIBUTE_KEY, a.consensus_height),
        ]
    }
}

impl core::fmt::Display for Attributes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "h: {}, cs_h: {}({})",
            self.height, self.client_id, self.consensus_height
        )
    }
}

macro_rules! client_event {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
        pub struct $name(pub Attributes);

        impl $name {
            pub fn client_id(&self) -> &ClientId {
                &self.0.client_id
            }

            pub fn height(&self) -> Height {
                self.0.height
            }

            pub fn consensus_height(&self) -> Height {
                self.0.consensus_height
            }
        }

        impl From<Attributes> for $name {
            fn from(attrs: Attributes) -> Self {
                $name(attrs)
            }
        }

        impl From<$name> for IbcEvent {
            fn from(v: $name) -> Self {
                IbcEvent::$name(v)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
                write!(f, "{}", self.0)
            }
        }
    };
}

client_event!(
    /// CreateClient event signals the creation of a new on-chain client (IBC client).
    CreateClient
);

client_event!(
    /// UpdateClient event signals a recent update of an on-chain client (IBC Client).
    UpdateClient
);

client_event!(
    /// UpgradeClient event signals that an on-chain client was moved to a new revision.
    UpgradeClient
);

client_event!(
    /// ClientMisbehaviour event signals that a client was frozen after evidence of misbehaviour.
    ClientMisbehaviour
);
