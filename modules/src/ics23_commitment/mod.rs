//! ICS 23: Vector commitments, as used to verify counterparty state.

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod specs;
