//! ICS 05: Port allocation. Ports are bound to the address that claims them
//! first; channel capabilities are granted per `(port, channel)` when a
//! channel end is created.

pub mod capabilities;
pub mod context;
pub mod error;
pub mod events;
pub mod handler;
pub mod msgs;
