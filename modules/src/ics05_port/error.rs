use flex_error::define_error;

use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::store::Error as StoreError;
use crate::Address;

define_error! {
    #[derive(Debug)]
    Error {
        PortAlreadyBound
            { port_id: PortId, owner: Address }
            | e | {
                format_args!("port {0} is already bound to {1:?}", e.port_id, e.owner)
            },

        PortOwnerMismatch
            { port_id: PortId, caller: Address }
            | e | {
                format_args!("port {0} is not owned by {1:?}", e.port_id, e.caller)
            },

        CapabilityAlreadyExists
            { port_id: PortId, channel_id: ChannelId }
            | e | {
                format_args!("capability for channel {1} on port {0} already exists",
                    e.port_id, e.channel_id)
            },

        Store
            [ StoreError ]
            | _ | { "storage error" },
    }
}
