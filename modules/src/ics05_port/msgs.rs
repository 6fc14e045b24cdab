//! Message definitions for the port module.

pub mod bind_port;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortMsg {
    BindPort(bind_port::MsgBindPort),
}
