//! Implementation of a global context mock. Used in testing handlers of all IBC modules.
//!
//! The mock is the real [`IbcContext`] over an in-memory word store and a
//! [`MockHost`], so every handler test also exercises the slot codec and the
//! typed object store. The builder methods below write straight to the
//! store, bypassing the handlers.

use core::time::Duration;

use crate::config::IbcConfig;
use crate::context::IbcContext;
use crate::events::IbcEvent;
use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::context::{ClientKeeper, ClientReader};
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics03_connection::context::ConnectionKeeper;
use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::commitment::PacketCommitment;
use crate::ics04_channel::context::ChannelKeeper;
use crate::ics04_channel::packet::{Receipt, Sequence};
use crate::ics05_port::context::PortKeeper;
use crate::ics07_tendermint::client_state::test_util::get_dummy_tendermint_client_state;
use crate::ics07_tendermint::consensus_state::ConsensusState;
use crate::ics07_tendermint::header::test_util::get_dummy_tendermint_header;
use crate::ics23_commitment::commitment::CommitmentRoot;
use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::mock::host::MockHost;
use crate::store::MemoryStore;
use crate::{Address, Height};

/// A context implementing the dependencies necessary for testing any IBC module.
pub type MockContext = IbcContext<MemoryStore, MockHost>;

/// Implementation of internal interface for use in testing. The methods in this interface should
/// _not_ be accessible to any ICS handler.
impl IbcContext<MemoryStore, MockHost> {
    pub fn with_config(self, config: IbcConfig) -> Self {
        let (words, host) = self.into_parts();
        IbcContext::new(words, host, config)
    }

    /// Registers a Tendermint client whose latest height is `height`, with
    /// the consensus state of the dummy header at that height. Calling it
    /// again for the same client replaces its latest state.
    pub fn with_client(self, client_id: &ClientId, height: Height) -> Self {
        let consensus_state = ConsensusState::from(get_dummy_tendermint_header(height, height));
        self.with_client_consensus_state(client_id, height, consensus_state)
    }

    /// Like [`with_client`](Self::with_client), but proofs are checked
    /// against `root` at `height`.
    pub fn with_client_root(self, client_id: &ClientId, height: Height, root: Vec<u8>) -> Self {
        let mut consensus_state =
            ConsensusState::from(get_dummy_tendermint_header(height, height));
        consensus_state.root = CommitmentRoot::from(root);
        self.with_client_consensus_state(client_id, height, consensus_state)
    }

    fn with_client_consensus_state(
        mut self,
        client_id: &ClientId,
        height: Height,
        consensus_state: ConsensusState,
    ) -> Self {
        let (host_height, host_timestamp) = (self.host_height(), self.host_timestamp());

        if self.client_type(client_id).is_err() {
            self.store_client_type(client_id.clone(), ClientType::Tendermint).unwrap();
            self.increase_client_counter().unwrap();
        }

        self.store_client_state(client_id.clone(), get_dummy_tendermint_client_state(height))
            .unwrap();
        self.store_consensus_state(client_id.clone(), height, consensus_state.into()).unwrap();
        self.store_update_time(client_id.clone(), height, host_timestamp).unwrap();
        self.store_update_height(client_id.clone(), height, host_height).unwrap();
        self
    }

    pub fn with_connection(
        mut self,
        connection_id: ConnectionId,
        connection_end: ConnectionEnd,
    ) -> Self {
        self.store_connection(connection_id, &connection_end).unwrap();
        self
    }

    pub fn with_channel(
        mut self,
        port_id: PortId,
        channel_id: ChannelId,
        channel_end: ChannelEnd,
    ) -> Self {
        self.store_channel(port_id, channel_id, &channel_end).unwrap();
        self
    }

    pub fn with_send_sequence(
        mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq_number: Sequence,
    ) -> Self {
        self.store_next_sequence_send(port_id, channel_id, seq_number).unwrap();
        self
    }

    pub fn with_recv_sequence(
        mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq_number: Sequence,
    ) -> Self {
        self.store_next_sequence_recv(port_id, channel_id, seq_number).unwrap();
        self
    }

    pub fn with_ack_sequence(
        mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq_number: Sequence,
    ) -> Self {
        self.store_next_sequence_ack(port_id, channel_id, seq_number).unwrap();
        self
    }

    pub fn with_packet_commitment(
        mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        data: PacketCommitment,
    ) -> Self {
        self.store_packet_commitment(port_id, channel_id, seq, data).unwrap();
        self
    }

    pub fn with_packet_receipt(
        mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Self {
        self.store_packet_receipt(port_id, channel_id, seq, Receipt::Ok).unwrap();
        self
    }

    pub fn with_capability(mut self, port_id: PortId, channel_id: ChannelId) -> Self {
        self.store_capability(port_id, channel_id).unwrap();
        self
    }

    pub fn with_port_owner(mut self, port_id: PortId, owner: Address) -> Self {
        self.store_port_owner(port_id, owner).unwrap();
        self
    }

    /// Moves the host chain `blocks` blocks and `elapsed` time forward.
    pub fn advance_host(&mut self, blocks: u64, elapsed: Duration) {
        self.host_mut().advance(blocks, elapsed);
    }

    /// Events the routing layer handed to the host so far.
    pub fn host_events(&self) -> &[IbcEvent] {
        self.host().events()
    }
}
