//! A host chain whose clock only moves when a test tells it to.

use core::time::Duration;

use crate::events::IbcEvent;
use crate::host::{Host, HostBlock};
use crate::ics07_tendermint::header::test_util::GENESIS_TIME_NANOS;
use crate::timestamp::Timestamp;
use crate::Height;

/// Height of a freshly created mock host.
pub const MOCK_HOST_HEIGHT: u64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHost {
    height: Height,
    timestamp: Timestamp,
    events: Vec<IbcEvent>,
}

/// The host starts at height `0-100`, one second per block after the time
/// of the dummy genesis header.
impl Default for MockHost {
    fn default() -> Self {
        Self::new(Height::new(0, MOCK_HOST_HEIGHT))
    }
}

impl MockHost {
    pub fn new(height: Height) -> Self {
        let timestamp = Timestamp::from_nanoseconds(
            GENESIS_TIME_NANOS + height.revision_height * 1_000_000_000,
        )
        .unwrap();

        Self {
            height,
            timestamp,
            events: Vec::new(),
        }
    }

    /// Moves the host `blocks` blocks and `elapsed` time forward.
    pub fn advance(&mut self, blocks: u64, elapsed: Duration) {
        self.height = self.height.add(blocks);
        self.timestamp = (self.timestamp + elapsed).unwrap();
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[IbcEvent] {
        &self.events
    }
}

impl HostBlock for MockHost {
    fn current_height(&self) -> Height {
        self.height
    }

    fn current_timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl Host for MockHost {
    fn emit_event(&mut self, event: IbcEvent) {
        self.events.push(event);
    }
}
