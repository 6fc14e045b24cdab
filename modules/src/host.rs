//! The narrow interface through which the IBC core talks to the execution
//! environment hosting it.

use crate::events::IbcEvent;
use crate::timestamp::Timestamp;
use crate::Height;

/// Read access to the current block of the host chain.
pub trait HostBlock {
    fn current_height(&self) -> Height;

    fn current_timestamp(&self) -> Timestamp;
}

/// The full host surface: block information plus event emission.
///
/// Events are fire-and-forget notifications for relayers; nothing in the
/// state machine depends on them being delivered.
pub trait Host: HostBlock {
    fn emit_event(&mut self, event: IbcEvent);
}

/// A frozen copy of the host block taken at the start of a call, so that
/// every check performed while handling one message sees the same clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSnapshot {
    pub height: Height,
    pub timestamp: Timestamp,
}

impl BlockSnapshot {
    pub fn of(host: &impl HostBlock) -> Self {
        Self {
            height: host.current_height(),
            timestamp: host.current_timestamp(),
        }
    }
}

impl HostBlock for BlockSnapshot {
    fn current_height(&self) -> Height {
        self.height
    }

    fn current_timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
