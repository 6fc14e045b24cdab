//! Implementation of mocks for context and host chain, used in testing the
//! handlers of all IBC modules.

pub mod context;
pub mod host;
