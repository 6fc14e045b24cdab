//! Protocol logic for processing, on the source chain, the acknowledgement of
//! a packet written by the destination.

use tracing::{info, warn};

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::{Counterparty, Order};
use crate::ics04_channel::commitment::packet_commitment;
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::AcknowledgePacket;
use crate::ics04_channel::handler::verify::verify_packet_acknowledgement_proofs;
use crate::ics04_channel::handler::{authenticate_capability, open_channel_connection};
use crate::ics04_channel::msgs::acknowledgement::MsgAcknowledgement;
use crate::ics04_channel::packet::{Packet, PacketResult, Sequence};
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Address;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AckPacketResult {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub seq: Sequence,
    /// The next sequence to acknowledge, for ordered channels only.
    pub seq_number: Option<Sequence>,
}

/// Checks that `packet` is the one this chain committed to. A commitment
/// that is gone means the packet was already acknowledged or timed out.
pub(crate) fn check_packet_commitment<Ctx>(ctx: &Ctx, packet: &Packet) -> Result<(), Error>
where
    Ctx: ChannelReader,
{
    let commitment =
        ctx.get_packet_commitment(&packet.source_port, &packet.source_channel, packet.sequence)?;

    match commitment {
        None => {
            warn!(packet = %packet, "packet commitment already cleared");
            Err(Error::no_op_msg(format!(
                "no commitment for packet {}",
                packet.sequence
            )))
        }
        Some(commitment) if commitment != packet_commitment(packet) => {
            Err(Error::incorrect_packet_commitment(packet.sequence))
        }
        Some(_) => Ok(()),
    }
}

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgAcknowledgement,
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

    let counterparty = Counterparty::new(
        packet.destination_port.clone(),
        Some(packet.destination_channel.clone()),
    );
    if !source_channel_end.counterparty_matches(&counterparty) {
        return Err(Error::invalid_packet_counterparty(
            packet.destination_port.clone(),
            packet.destination_channel.clone(),
        ));
    }

    let (_, connection_end) = open_channel_connection(ctx, &source_channel_end)?;

    check_packet_commitment(ctx, packet)?;

    let seq_number = if source_channel_end.order_matches(&Order::Ordered) {
        let next_seq_ack =
            ctx.get_next_sequence_ack(&packet.source_port, &packet.source_channel)?;

        if packet.sequence != next_seq_ack {
            return Err(Error::invalid_packet_sequence(packet.sequence, next_seq_ack));
        }

        Some(next_seq_ack.increment())
    } else {
        None
    };

    verify_packet_acknowledgement_proofs(
        ctx,
        &connection_end,
        packet,
        &msg.acknowledgement,
        msg.proof_height,
        &msg.proof_acked,
    )?;

    let result = PacketResult::Ack(AckPacketResult {
        port_id: packet.source_port.clone(),
        channel_id: packet.source_channel.clone(),
        seq: packet.sequence,
        seq_number,
    });

    output.log("success: packet ack");
    info!(packet = %packet, "packet acknowledged");

    output.emit(IbcEvent::AcknowledgePacket(AcknowledgePacket {
        height: ctx.host_height(),
        packet: msg.packet,
    }));

    Ok(output.with_result(result))
}
