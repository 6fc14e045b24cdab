//! Protocol logic for recording the acknowledgement of a received packet.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::commitment::{compute_ack_commitment, AcknowledgementCommitment};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::WriteAcknowledgement;
use crate::ics04_channel::handler::authenticate_capability;
use crate::ics04_channel::msgs::write_acknowledgement::MsgWriteAcknowledgement;
use crate::ics04_channel::packet::{PacketResult, Sequence};
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Address;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAckPacketResult {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub seq: Sequence,
    pub ack_commitment: AcknowledgementCommitment,
}

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgWriteAcknowledgement,
) -> HandlerResult<PacketResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    let MsgWriteAcknowledgement { packet, ack } = msg;

    let dest_channel_end =
        ctx.channel_end(&packet.destination_port, &packet.destination_channel)?;

    if !dest_channel_end.is_open() {
        return Err(Error::invalid_channel_state(
            packet.destination_channel.clone(),
            *dest_channel_end.state(),
        ));
    }

    authenticate_capability(
        ctx,
        &caller,
        &packet.destination_port,
        &packet.destination_channel,
    )?;

    if ack.is_empty() {
        return Err(Error::invalid_acknowledgement());
    }

    // An acknowledgement is written at most once.
    if ctx
        .get_packet_acknowledgement(
            &packet.destination_port,
            &packet.destination_channel,
            packet.sequence,
        )?
        .is_some()
    {
        return Err(Error::acknowledgement_exists(packet.sequence));
    }

    let result = PacketResult::WriteAck(WriteAckPacketResult {
        port_id: packet.destination_port.clone(),
        channel_id: packet.destination_channel.clone(),
        seq: packet.sequence,
        ack_commitment: compute_ack_commitment(&ack),
    });

    output.log("success: packet write acknowledgement");
    info!(packet = %packet, "packet acknowledgement written");

    output.emit(IbcEvent::WriteAcknowledgement(WriteAcknowledgement {
        height: ctx.host_height(),
        packet,
        ack,
    }));

    Ok(output.with_result(result))
}
