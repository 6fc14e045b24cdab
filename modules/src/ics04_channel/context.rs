//! ICS4 (channel) context. The two traits `ChannelReader` and `ChannelKeeper` define
//! the interface that any host chain must implement to be able to process any `ChannelMsg`
//! or `PacketMsg`.

use crate::ics03_connection::context::ConnectionReader;
use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::commitment::{AcknowledgementCommitment, PacketCommitment};
use crate::ics04_channel::error::Error;
use crate::ics04_channel::handler::{ChannelIdState, ChannelResult};
use crate::ics04_channel::packet::{PacketResult, Receipt, Sequence};
use crate::ics05_port::context::{PortKeeper, PortReader};
use crate::ics24_host::identifier::{ChannelId, PortId};

/// A context supplying all the necessary read-only dependencies for processing any channel or
/// packet message.
pub trait ChannelReader: ConnectionReader + PortReader {
    /// Returns the ChannelEnd for the given `port_id` and `channel_id`.
    fn channel_end(&self, port_id: &PortId, channel_id: &ChannelId) -> Result<ChannelEnd, Error>;

    fn get_next_sequence_send(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, Error>;

    fn get_next_sequence_recv(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, Error>;

    fn get_next_sequence_ack(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Sequence, Error>;

    /// Returns the commitment of a sent packet, or `None` once it was
    /// acknowledged or timed out.
    fn get_packet_commitment(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<PacketCommitment>, Error>;

    fn get_packet_receipt(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<Receipt>, Error>;

    fn get_packet_acknowledgement(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Result<Option<AcknowledgementCommitment>, Error>;

    /// Returns a counter on the number of channel ids have been created thus far.
    /// The value of this counter should increase only via method
    /// `ChannelKeeper::increase_channel_counter`.
    fn channel_counter(&self) -> Result<u64, Error>;
}

/// A context supplying all the necessary write-only dependencies (i.e., storage writing facility)
/// for processing any channel or packet message.
pub trait ChannelKeeper: PortKeeper {
    fn store_channel_result(&mut self, result: ChannelResult) -> Result<(), Error> {
        // The handler processed this channel & some modifications occurred, store the new end.
        self.store_channel(
            result.port_id.clone(),
            result.channel_id.clone(),
            &result.channel_end,
        )?;

        // The channel identifier was freshly brewed.
        // Increase counter, grant the capability & initialize seq. nrs.
        if matches!(result.channel_id_state, ChannelIdState::Generated) {
            self.increase_channel_counter()?;

            self.store_capability(result.port_id.clone(), result.channel_id.clone())
                .map_err(Error::ics05_port)?;

            let (port_id, channel_id) = (result.port_id, result.channel_id);
            self.store_next_sequence_send(port_id.clone(), channel_id.clone(), 1.into())?;
            self.store_next_sequence_recv(port_id.clone(), channel_id.clone(), 1.into())?;
            self.store_next_sequence_ack(port_id, channel_id, 1.into())?;
        }

        Ok(())
    }

    fn store_packet_result(&mut self, general_result: PacketResult) -> Result<(), Error> {
        match general_result {
            PacketResult::Send(res) => {
                self.store_next_sequence_send(
                    res.port_id.clone(),
                    res.channel_id.clone(),
                    res.seq_number,
                )?;

                self.store_packet_commitment(res.port_id, res.channel_id, res.seq, res.commitment)?;
            }
            PacketResult::Recv(res) => match res.receipt {
                // Ordered channel
                None => {
                    self.store_next_sequence_recv(res.port_id, res.channel_id, res.seq_number)?
                }
                // Unordered channel
                Some(r) => self.store_packet_receipt(res.port_id, res.channel_id, res.seq, r)?,
            },
            PacketResult::WriteAck(res) => {
                self.store_packet_acknowledgement(
                    res.port_id,
                    res.channel_id,
                    res.seq,
                    res.ack_commitment,
                )?;
            }
            PacketResult::Ack(res) => {
                self.delete_packet_commitment(res.port_id.clone(), res.channel_id.clone(), res.seq)?;

                // Ordered channel
                if let Some(s) = res.seq_number {
                    self.store_next_sequence_ack(res.port_id, res.channel_id, s)?;
                }
            }
            PacketResult::Timeout(res) => {
                self.delete_packet_commitment(res.port_id.clone(), res.channel_id.clone(), res.seq)?;

                // Ordered channel: the channel end is closed.
                if let Some(c) = res.channel {
                    self.store_channel(res.port_id, res.channel_id, &c)?;
                }
            }
        }
        Ok(())
    }

    fn store_channel(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        channel_end: &ChannelEnd,
    ) -> Result<(), Error>;

    fn store_next_sequence_send(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), Error>;

    fn store_next_sequence_recv(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), Error>;

    fn store_next_sequence_ack(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), Error>;

    fn store_packet_commitment(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        commitment: PacketCommitment,
    ) -> Result<(), Error>;

    fn delete_packet_commitment(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
    ) -> Result<(), Error>;

    fn store_packet_receipt(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        receipt: Receipt,
    ) -> Result<(), Error>;

    fn store_packet_acknowledgement(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        seq: Sequence,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), Error>;

    /// Called upon channel identifier creation (Init or Try message processing).
    /// Increases the counter which keeps track of how many channels have been created.
    fn increase_channel_counter(&mut self) -> Result<(), Error>;
}
