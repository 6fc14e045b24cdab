use crate::ics24_host::identifier::PortId;

/// Claims `port_id` for the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgBindPort {
    pub port_id: PortId,
}

impl MsgBindPort {
    pub fn new(port_id: PortId) -> Self {
        Self { port_id }
    }
}
