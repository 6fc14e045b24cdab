//! ICS 03: Connection implementation for connecting a client
//! on the local chain with a client on a remote chain.

pub mod connection;
pub mod context;
pub mod error;
pub mod events;
/// Message processing logic (protocol) for ICS 03.
pub mod handler;
pub mod msgs;
pub mod version;
