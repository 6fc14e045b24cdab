//! The store-backed IBC context.
//!
//! [`IbcContext`] implements every reader and keeper trait of the ICS
//! modules on top of an [`IbcStore`]. It is handed an explicit word store, a
//! host and a configuration; nothing is read from globals.

use core::str::FromStr;
use core::time::Duration;

use crate::config::IbcConfig;
use crate::events::IbcEvent;
use crate::host::{Host, HostBlock};
use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::context::{ClientKeeper, ClientReader};
use crate::ics02_client::error::Error as ClientError;
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics03_connection::context::{ConnectionKeeper, ConnectionReader};
use crate::ics03_connection::error::Error as ConnectionError;
use crate::ics03_connection::version::Version;
use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::commitment::{AcknowledgementCommitment, PacketCommitment};
use crate::ics04_channel::context::{ChannelKeeper, ChannelReader};
use crate::ics04_channel::error::Error as ChannelError;
use crate::ics04_channel::packet::{Receipt, Sequence};
use crate::ics05_port::context::{PortKeeper, PortReader};
use crate::ics05_port::error::Error as PortError;
use crate::ics23_commitment::commitment::CommitmentPrefix;
use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::ics24_host::path::Path;
use crate::ics26_routing::context::Ics26Context;
use crate::store::{Error as StoreError, IbcStore, WordStore};
use crate::timestamp::Timestamp;
use crate::{Address, Height};

#[derive(Clone, Debug, Default)]
pub struct IbcContext<S, H> {
    store: IbcStore<S>,
    host: H,
    config: IbcConfig,
}

impl<S, H> IbcContext<S, H> {
    pub fn new(words: S, host: H, config: IbcConfig) -> Self {
        Self {
            store: IbcStore::new(words),
            host,
            config,
        }
    }

    pub fn store(&self) -> &IbcStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut IbcStore<S> {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &IbcConfig {
        &self.config
    }

    pub fn into_parts(self) -> (S, H) {
        (self.store.into_words(), self.host)
    }
}

impl<S: WordStore, H: Host> IbcContext<S, H> {
    /// Forwards the events of a committed message to the host.
    pub(crate) fn emit_events(&mut self, events: impl IntoIterator<Item = IbcEvent>) {
        for event in events {
            self.host.emit_event(event);
        }
    }
}

/// Read-only queries. An absent object is reported as `EmptyState`.
impl<S: WordStore, H> IbcContext<S, H> {
    pub fn query_client_state(&self, client_id: &ClientId) -> Result<AnyClientState, StoreError> {
        self.store
            .client_state(client_id)?
            .ok_or_else(|| empty(Path::ClientState(client_id.clone())))
    }

    pub fn query_consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<AnyConsensusState, StoreError> {
        self.store.consensus_state(client_id, height)?.ok_or_else(|| {
            empty(Path::ClientConsensusState {
                client_id: client_id.clone(),
                height,
            })
        })
    }

    pub fn query_connection(&self, connection_id: &ConnectionId) -> Result<ConnectionEnd, StoreError> {
        self.store
            .connection(connection_id)?
            .ok_or_else(|| empty(Path::Connections(connection_id.clone())))
    }

    pub fn query_channel(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ChannelEnd, StoreError> {
        self.store
            .channel(port_id, channel_id)?
            .ok_or_else(|| empty(Path::ChannelEnds(port_id.clone(), channel_id.clone())))
    }

    pub fn query_packet_commitment(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<PacketCommitment, StoreError> {
        self.store
            .packet_commitment(port_id, channel_id, sequence)?
            .ok_or_else(|| {
                empty(Path::Commitments {
                    port_id: port_id.clone(),
                    channel_id: channel_id.clone(),
                    sequence,
                })
            })
    }

    pub fn query_packet_acknowledgement(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<AcknowledgementCommitment, StoreError> {
        self.store
            .packet_acknowledgement(port_id, channel_id, sequence)?
            .ok_or_else(|| {
                empty(Path::Acks {
                    port_id: port_id.clone(),
                    channel_id: channel_id.clone(),
                    sequence,
                })
            })
    }

    pub fn query_packet_receipt(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Receipt, StoreError> {
        self.store
            .packet_receipt(port_id, channel_id, sequence)?
            .ok_or_else(|| {
                empty(Path::Receipts {
                    port_id: port_id.clone(),
                    channel_id: channel_id.clone(),
                    sequence,
                })
            })
    }

    pub fn query_next_sequence_send(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, StoreError> {
        self.query_sequence(Path::SeqSends(port_id.clone(), channel_id.clone()))
    }

    pub fn query_next_sequence_recv(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, StoreError> {
        self.query_sequence(Path::SeqRecvs(port_id.clone(), channel_id.clone()))
    }

    pub fn query_next_sequence_ack(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, StoreError> {
        self.query_sequence(Path::SeqAcks(port_id.clone(), channel_id.clone()))
    }

    pub fn query_port_owner(&self, port_id: &PortId) -> Result<Address, StoreError> {
        self.store
            .port_owner(port_id)?
            .ok_or_else(|| empty(Path::Ports(port_id.clone())))
    }

    fn query_sequence(&self, path: Path) -> Result<Sequence, StoreError> {
        self.store.sequence(&path)?.ok_or_else(|| empty(path))
    }
}

fn empty(path: Path) -> StoreError {
    StoreError::empty_state(path.to_string())
}

impl<S: WordStore, H: HostBlock> Ics26Context for IbcContext<S, H> {}

impl<S: WordStore, H: HostBlock> ClientReader for IbcContext<S, H> {
    fn client_type(&self, client_id: &ClientId) -> Result<ClientType, ClientError> {
        let client_type = self
            .store
            .client_type(client_id)
            .map_err(ClientError::store)?
            .ok_or_else(|| ClientError::client_not_found(client_id.clone()))?;
        ClientType::from_str(&client_type)
    }

    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, ClientError> {
        self.store
            .client_state(client_id)
            .map_err(ClientError::store)?
            .ok_or_else(|| ClientError::client_not_found(client_id.clone()))
    }

    fn consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<AnyConsensusState, ClientError> {
        self.maybe_consensus_state(client_id, height)?
            .ok_or_else(|| ClientError::consensus_state_not_found(client_id.clone(), height))
    }

    fn maybe_consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Option<AnyConsensusState>, ClientError> {
        self.store
            .consensus_state(client_id, height)
            .map_err(ClientError::store)
    }

    fn client_update_time(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Timestamp, ClientError> {
        self.store
            .processed_time(client_id, height)
            .map_err(ClientError::store)?
            .ok_or_else(|| ClientError::processed_time_not_found(client_id.clone(), height))
    }

    fn client_update_height(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Height, ClientError> {
        self.store
            .processed_height(client_id, height)
            .map_err(ClientError::store)?
            .ok_or_else(|| ClientError::processed_height_not_found(client_id.clone(), height))
    }

    fn host_height(&self) -> Height {
        self.host.current_height()
    }

    fn host_timestamp(&self) -> Timestamp {
        self.host.current_timestamp()
    }

    fn client_counter(&self) -> Result<u64, ClientError> {
        self.store
            .counter(&Path::NextClientSequence)
            .map_err(ClientError::store)
    }

    fn max_expected_time_per_block(&self) -> Duration {
        self.config.max_expected_time_per_block
    }
}

impl<S: WordStore, H: HostBlock> ClientKeeper for IbcContext<S, H> {
    fn store_client_type(
        &mut self,
        client_id: ClientId,
        client_type: ClientType,
    ) -> Result<(), ClientError> {
        self.store.set_client_type(&client_id, client_type.as_str());
        Ok(())
    }

    fn store_client_state(
        &mut self,
        client_id: ClientId,
        client_state: AnyClientState,
    ) -> Result<(), ClientError> {
        self.store
            .set_client_state(&client_id, client_state)
            .map_err(ClientError::store)
    }

    fn store_consensus_state(
        &mut self,
        client_id: ClientId,
        height: Height,
        consensus_state: AnyConsensusState,
    ) -> Result<(), ClientError> {
        self.store
            .set_consensus_state(&client_id, height, consensus_state)
            .map_err(ClientError::store)
    }

    fn increase_client_counter(&mut self) -> Result<(), ClientError> {
        self.store
            .increase_counter(&Path::NextClientSequence)
            .map_err(ClientError::store)
    }

    fn store_update_time(
        &mut self,
        client_id: ClientId,
        height: Height,
        timestamp: Timestamp,
    ) -> Result<(), ClientError> {
        self.store.set_processed_time(&client_id, height, timestamp);
        Ok(())
    }

    fn store_update_height(
        &mut self,
        client_id: ClientId,
        height: Height,
        host_height: Height,
    ) -> Result<(), ClientError> {
        self.store
            .set_processed_height(&client_id, height, host_height)
            .map_err(ClientError::store)
    }
}

impl<S: WordStore, H: HostBlock> ConnectionReader for IbcContext<S, H> {
    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ConnectionError> {
        self.store
            .connection(conn_id)
            .map_err(ConnectionError::store)?
            .ok_or_else(|| ConnectionError::connection_not_found(conn_id.clone()))
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.config.commitment_prefix()
    }

    fn get_compatible_versions(&self) -> Vec<Version> {
        self.config.compatible_versions.clone()
    }

    fn connection_counter(&self) -> Result<u64, ConnectionError> {
        self.store
            .counter(&Path::NextConnectionSequence)
            .map_err(ConnectionError::store)
    }
}

impl<S: WordStore, H: HostBlock> ConnectionKeeper for IbcContext<S, H> {
    fn store_connection(
        &mut self,
        connection_id: ConnectionId,
        connection_end: &ConnectionEnd,
    ) -> Result<(), ConnectionError> {
        self.store
            .set_connection(&connection_id, connection_end.clone())
            .map_err(ConnectionError::store)
    }

    fn increase_connection_counter(&mut self) -> Result<(), ConnectionError> {
        self.store
            .increase_counter(&Path::NextConnectionSequence)
            .map_err(ConnectionError::store)
    }
}

impl<S: WordStore, H: HostBlock> PortReader for IbcContext<S, H> {
    fn port_owner(&self, port_id: &PortId) -> Result<Option<Address>, PortError> {
        self.store.port_owner(port_id).map_err(PortError::store)
    }

    fn has_capability(&self, port_id: &PortId, channel_id: &ChannelId) -> Result<bool, PortError> {
        Ok(self.store.has_capability(port_id, channel_id))
    }
}

impl<S: WordStore, H: HostBlock> PortKeeper for IbcContext<S, H> {
    fn store_port_owner(&mut self, port_id: PortId, owner: Address) -> Result<(), PortError> {
        self.store.set_port_owner(&port_id, owner);
        Ok(())
    }

    fn store_capability(&mut self, port_id: PortId, channel_id: ChannelId) -> Result<(), PortError> {
        if self.store.has_capability(&port_id, &channel_id) {
            return Err(PortError::capability_already_exists(port_id, channel_id));
        }
        self.store.set_capability(&port_id, &channel_id);
        Ok(())
    }
}

impl<S: WordStore, H: HostBlock> ChannelReader for IbcContext<S, H> {
    fn channel_end(&self, port_id: &PortId, channel_id: &ChannelId) -> Result<ChannelEnd, ChannelError> {
        self.store
            .channel(port_id, channel_id)
            .map_err(ChannelError::store)?
            .ok_or_else(|| ChannelError::channel_not_found(port_id.clone(), channel_id.clone()))
    }

    fn get_next_sequence_send(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, ChannelError> {
        self.store
            .sequence(&Path::SeqSends(port_id.clone(), channel_id.clone()))
            .map_err(ChannelError::store)?
            .ok_or_else(|| ChannelError::missing_next_send_seq(port_id.clone(), channel_id.clone()))
    }

    fn get_next_sequence_recv(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, ChannelError> {
        self.store
            .sequence(&Path::SeqRecvs(port_id.clone(), channel_id.clone()))
            .map_err(ChannelError::store)?
            .ok_or_else(|| ChannelError::missing_next_recv_seq(port_id.clone(), channel_id.clone()))
    }

    fn get_next_sequence_ack(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, ChannelError> {
        self.store
            .sequence(&Path::SeqAcks(port_id.clone(), channel_id.clone()))
            .map_err(ChannelError::store)?
            .ok_or_else(|| ChannelError::missing_next_ack_seq(port_id.clone(), channel_id.clone()))
    }

    fn get_packet_commitment(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<PacketCommitment>, ChannelError> {
        self.store
            .packet_commitment(port_id, channel_id, sequence)
            .map_err(ChannelError::store)
    }

    fn get_packet_receipt(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<Receipt>, ChannelError> {
        self.store
            .packet_receipt(port_id, channel_id, sequence)
            .map_err(ChannelError::store)
    }

    fn get_packet_acknowledgement(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<AcknowledgementCommitment>, ChannelError> {
        self.store
            .packet_acknowledgement(port_id, channel_id, sequence)
            .map_err(ChannelError::store)
    }

    fn channel_counter(&self) -> Result<u64, ChannelError> {
        self.store
            .counter(&Path::NextChannelSequence)
            .map_err(ChannelError::store)
    }
}

impl<S: WordStore, H: HostBlock> ChannelKeeper for IbcContext<S, H> {
    fn store_channel(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        channel_end: &ChannelEnd,
    ) -> Result<(), ChannelError> {
        self.store
            .set_channel(&port_id, &channel_id, channel_end.clone())
            .map_err(ChannelError::store)
    }

    fn store_next_sequence_send(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), ChannelError> {
        self.store.set_sequence(&Path::SeqSends(port_id, channel_id), seq);
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), ChannelError> {
        self.store.set_sequence(&Path::SeqRecvs(port_id, channel_id), seq);
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), ChannelError> {
        self.store.set_sequence(&Path::SeqAcks(port_id, channel_id), seq);
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        commitment: PacketCommitment,
    ) -> Result<(), ChannelError> {
        self.store.set_packet_commitment(&port_id, &channel_id, seq, &commitment);
        Ok(())
    }

    fn delete_packet_commitment(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), ChannelError> {
        self.store.delete_packet_commitment(&port_id, &channel_id, seq);
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        receipt: Receipt,
    ) -> Result<(), ChannelError> {
        self.store.set_packet_receipt(&port_id, &channel_id, seq, receipt);
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ChannelError> {
        self.store
            .set_packet_acknowledgement(&port_id, &channel_id, seq, &ack_commitment);
        Ok(())
    }

    fn increase_channel_counter(&mut self) -> Result<(), ChannelError> {
        self.store
            .increase_counter(&Path::NextChannelSequence)
            .map_err(ChannelError::store)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::mock::context::MockContext;
    use crate::store::error::ErrorDetail;

    #[test]
    fn queries_report_empty_state() {
        let ctx = MockContext::default();

        match ctx.query_connection(&ConnectionId::new(0)) {
            Err(e) => match e.detail() {
                ErrorDetail::EmptyState(s) => assert_eq!(s.path, "connections/connection-0"),
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("query of a missing connection succeeded"),
        }

        assert!(ctx
            .query_next_sequence_send(&PortId::transfer(), &ChannelId::new(0))
            .is_err());
    }

    #[test]
    fn capabilities_are_granted_once() {
        let mut ctx = MockContext::default();
        let (port_id, channel_id) = (PortId::transfer(), ChannelId::new(4));

        ctx.store_capability(port_id.clone(), channel_id.clone()).unwrap();
        assert!(ctx.has_capability(&port_id, &channel_id).unwrap());

        match ctx.store_capability(port_id, channel_id) {
            Err(e) => match e.detail() {
                crate::ics05_port::error::ErrorDetail::CapabilityAlreadyExists(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("capability granted twice"),
        }
    }

    #[test]
    fn missing_channel_reports_not_found() {
        let ctx = MockContext::default();

        match ctx.channel_end(&PortId::transfer(), &ChannelId::new(0)) {
            Err(e) => match e.detail() {
                crate::ics04_channel::error::ErrorDetail::ChannelNotFound(d) => {
                    assert_eq!(d.channel_id, ChannelId::new(0))
                }
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("missing channel was found"),
        }
    }
}
