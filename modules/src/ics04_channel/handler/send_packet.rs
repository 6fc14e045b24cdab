//! Protocol logic for committing an outgoing packet on the source chain.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::commitment::{packet_commitment, PacketCommitment};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::SendPacket;
use crate::ics04_channel::handler::{authenticate_capability, channel_connection};
use crate::ics04_channel::msgs::send_packet::MsgSendPacket;
use crate::ics04_channel::packet::{Packet, PacketResult, Sequence};
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Address;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendPacketResult {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub seq: Sequence,
    pub seq_number: Sequence,
    pub commitment: PacketCommitment,
}

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgSendPacket,
) -> HandlerResult<PacketResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    let source_channel_end = ctx.channel_end(&msg.source_port, &msg.source_channel)?;

    if !source_channel_end.is_open() {
        return Err(Error::invalid_channel_state(
            msg.source_channel,
            *source_channel_end.state(),
        ));
    }

    authenticate_capability(ctx, &caller, &msg.source_port, &msg.source_channel)?;

    let counterparty = source_channel_end.counterparty();
    let destination_channel = counterparty
        .channel_id()
        .cloned()
        .ok_or_else(Error::invalid_counterparty_channel_id)?;

    let (_, connection_end) = channel_connection(ctx, &source_channel_end)?;

    if msg.data.is_empty() {
        return Err(Error::zero_packet_data());
    }
    if msg.timeout_height.is_zero() && !msg.timeout_timestamp.is_set() {
        return Err(Error::zero_packet_timeout());
    }

    let client_id = connection_end.client_id();
    let client_state = ctx.client_state(client_id).map_err(Error::ics02_client)?;
    let latest_height = client_state.latest_height();

    let sequence = ctx.get_next_sequence_send(&msg.source_port, &msg.source_channel)?;

    let packet = Packet {
        sequence,
        source_port: msg.source_port.clone(),
        source_channel: msg.source_channel.clone(),
        destination_port: counterparty.port_id().clone(),
        destination_channel,
        data: msg.data,
        timeout_height: msg.timeout_height,
        timeout_timestamp: msg.timeout_timestamp,
    };

    // The packet must not already be timed out on the destination chain, as
    // far as this chain's client of it knows.
    if packet.height_timed_out(latest_height) {
        return Err(Error::low_packet_height(
            latest_height,
            packet.timeout_height,
        ));
    }

    let consensus_state = ctx
        .consensus_state(client_id, latest_height)
        .map_err(Error::ics02_client)?;
    let latest_timestamp = consensus_state.timestamp();
    if packet.timestamp_timed_out(&latest_timestamp) {
        return Err(Error::low_packet_timestamp(
            latest_timestamp,
            packet.timeout_timestamp,
        ));
    }

    let result = PacketResult::Send(SendPacketResult {
        port_id: msg.source_port,
        channel_id: msg.source_channel,
        seq: sequence,
        seq_number: sequence.increment(),
        commitment: packet_commitment(&packet),
    });

    output.log("success: packet send ");
    info!(packet = %packet, "packet committed");

    output.emit(IbcEvent::SendPacket(SendPacket {
        height: ctx.host_height(),
        packet,
    }));

    Ok(output.with_result(result))
}
