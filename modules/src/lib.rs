#![forbid(unsafe_code)]
#![allow(clippy::large_enum_variant)]
#![allow(clippy::result_large_err)]
//! This library implements the InterBlockchain Communication (IBC) protocol
//! state machine as it runs inside an execution-environment precompile: every
//! protocol object is persisted in a fixed-width word store.
//!
//! The layout mirrors the ICS standards:
//!
//! + ICS 02: Client semantics,
//! + ICS 03: Connection semantics,
//! + ICS 04: Channel and packet semantics,
//! + ICS 05: Port allocation,
//! + ICS 07: Tendermint light client,
//! + ICS 23: Vector commitments,
//! + ICS 24: Host requirements,
//! + ICS 26: Routing module.
//!
//! Persistence goes through the [`store`] module, which packs byte blobs into
//! 32-byte words. All writes of a routed message are buffered and only
//! flushed when the message succeeds (see [`ics26_routing::handler::deliver`]).

pub mod config;
pub mod context;
pub mod events;
pub mod handler;
pub mod host;
pub mod ics02_client;
pub mod ics03_connection;
pub mod ics04_channel;
pub mod ics05_port;
pub mod ics07_tendermint;
pub mod ics23_commitment;
pub mod ics24_host;
pub mod ics26_routing;
pub mod store;
pub mod timestamp;

#[cfg(any(test, feature = "mocks"))]
pub mod mock;

#[cfg(any(test, feature = "mocks"))]
pub mod test_utils;

/// Re-export of the height type, used across all modules.
pub type Height = crate::ics02_client::height::Height;

/// Address of the account invoking an operation.
pub type Address = primitive_types::H160;
