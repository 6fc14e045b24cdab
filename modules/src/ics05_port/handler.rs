//! This module implements the processing logic for ICS5 (port) messages.

use crate::handler::HandlerOutput;
use crate::ics05_port::context::PortReader;
use crate::ics05_port::error::Error;
use crate::ics05_port::msgs::PortMsg;
use crate::ics24_host::identifier::PortId;
use crate::Address;

pub mod bind_port;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortResult {
    pub port_id: PortId,
    pub owner: Address,
}

pub fn dispatch<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: PortMsg,
) -> Result<HandlerOutput<PortResult>, Error>
where
    Ctx: PortReader,
{
    match msg {
        PortMsg::BindPort(msg) => bind_port::process(ctx, caller, msg),
    }
}
