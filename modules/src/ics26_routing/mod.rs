//! ICS 26: Routing module of the IBC state machine. Every operation enters
//! through [`handler::deliver`].

pub mod context;
pub mod error;
pub mod handler;
pub mod msgs;
