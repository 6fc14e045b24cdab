//! ICS5 (port) context.

use crate::ics05_port::error::Error;
use crate::ics05_port::handler::PortResult;
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Address;

/// Read-only access to port bindings and channel capabilities.
pub trait PortReader {
    /// The address a port is bound to, if any.
    fn port_owner(&self, port_id: &PortId) -> Result<Option<Address>, Error>;

    /// Whether the capability for the channel end `(port_id, channel_id)` has been granted.
    fn has_capability(&self, port_id: &PortId, channel_id: &ChannelId) -> Result<bool, Error>;
}

pub trait PortKeeper {
    fn store_port_result(&mut self, result: PortResult) -> Result<(), Error> {
        self.store_port_owner(result.port_id, result.owner)
    }

    fn store_port_owner(&mut self, port_id: PortId, owner: Address) -> Result<(), Error>;

    /// Grants the capability for a freshly created channel end.
    fn store_capability(&mut self, port_id: PortId, channel_id: ChannelId) -> Result<(), Error>;
}
