//! Protocol logic for timing out, on the source chain, a packet the
//! destination never received.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics04_channel::channel::{ChannelEnd, Counterparty, Order, State};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::TimeoutPacket;
use crate::ics04_channel::handler::acknowledgement::check_packet_commitment;
use crate::ics04_channel::handler::verify::{
    verify_next_sequence_recv, verify_packet_receipt_absence,
};
use crate::ics04_channel::handler::{authenticate_capability, channel_connection};
use crate::ics04_channel::msgs::timeout::MsgTimeout;
use crate::ics04_channel::packet::{Packet, PacketResult, Sequence};
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::{Address, Height};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeoutPacketResult {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub seq: Sequence,
    /// The closed channel end, for ordered channels only.
    pub channel: Option<ChannelEnd>,
}

/// Proves that the destination did not receive `packet` and builds the
/// result of timing it out. Ordered channels are closed in the process.
pub(crate) fn prove_unreceived<Ctx>(
    ctx: &Ctx,
    channel_end: ChannelEnd,
    connection_end: &ConnectionEnd,
    packet: &Packet,
    next_sequence_recv: Sequence,
    proof_height: Height,
    proof_unreceived: &CommitmentProofBytes,
) -> Result<TimeoutPacketResult, Error>
where
    Ctx: ChannelReader,
{
    let channel = if channel_end.order_matches(&Order::Ordered) {
        if packet.sequence < next_sequence_recv {
            return Err(Error::invalid_packet_sequence(
                packet.sequence,
                next_sequence_recv,
            ));
        }

        verify_next_sequence_recv(
            ctx,
            connection_end,
            packet,
            next_sequence_recv,
            proof_height,
            proof_unreceived,
        )?;

        let mut closed = channel_end;
        closed.set_state(State::Closed);
        Some(closed)
    } else {
        verify_packet_receipt_absence(
            ctx,
            connection_end,
            packet,
            proof_height,
            proof_unreceived,
        )?;
        None
    };

    Ok(TimeoutPacketResult {
        port_id: packet.source_port.clone(),
        channel_id: packet.source_channel.clone(),
        seq: packet.sequence,
        channel,
    })
}

/// Checks that the destination of `packet` is the counterparty of `channel_end`.
pub(crate) fn check_destination(channel_end: &ChannelEnd, packet: &Packet) -> Result<(), Error> {
    let counterparty = Counterparty::new(
        packet.destination_port.clone(),
        Some(packet.destination_channel.clone()),
    );
    if !channel_end.counterparty_matches(&counterparty) {
        return Err(Error::invalid_packet_counterparty(
            packet.destination_port.clone(),
            packet.destination_channel.clone(),
        ));
    }
    Ok(())
}

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgTimeout,
) -> HandlerResult<PacketResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    let packet = &msg.packet;

    let source_channel_end = ctx.channel_end(&packet.source_port, &packet.source_channel)?;

    if !source_channel_end.is_open() {
        return Err(Error::invalid_channel_state(
            packet.source_channel.clone(),
            *source_channel_end.state(),
        ));
    }

    authenticate_capability(ctx, &caller, &packet.source_port, &packet.source_channel)?;

    check_destination(&source_channel_end, packet)?;

    let (_, connection_end) = channel_connection(ctx, &source_channel_end)?;

    // The destination must have reached the timeout as of the proof height.
    let consensus_state = ctx
        .consensus_state(connection_end.client_id(), msg.proof_height)
        .map_err(Error::ics02_client)?;
    let proof_timestamp = consensus_state.timestamp();

    if !packet.timed_out(&proof_timestamp, msg.proof_height) {
        return Err(Error::packet_timeout_not_reached(
            packet.timeout_height,
            msg.proof_height,
            packet.timeout_timestamp,
            proof_timestamp,
        ));
    }

    check_packet_commitment(ctx, packet)?;

    let result = prove_unreceived(
        ctx,
        source_channel_end,
        &connection_end,
        packet,
        msg.next_sequence_recv,
        msg.proof_height,
        &msg.proof_unreceived,
    )?;

    output.log("success: packet timeout");
    info!(packet = %packet, closed = result.channel.is_some(), "packet timed out");

    output.emit(IbcEvent::TimeoutPacket(TimeoutPacket {
        height: ctx.host_height(),
        packet: msg.packet,
    }));

    Ok(output.with_result(PacketResult::Timeout(result)))
}
