//! Protocol logic for timing out a packet whose destination channel end was
//! closed before receiving it.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::TimeoutOnClosePacket;
use crate::ics04_channel::handler::acknowledgement::check_packet_commitment;
use crate::ics04_channel::handler::timeout::{check_destination, prove_unreceived};
use crate::ics04_channel::handler::verify::verify_channel_proofs;
use crate::ics04_channel::handler::{
    authenticate_capability, channel_connection, counterparty_connection_id,
};
use crate::ics04_channel::msgs::timeout_on_close::MsgTimeoutOnClose;
use crate::ics04_channel::packet::PacketResult;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgTimeoutOnClose,
) -> HandlerResult<PacketResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    let packet = &msg.packet;

    let source_channel_end = ctx.channel_end(&packet.source_port, &packet.source_channel)?;

    authenticate_capability(ctx, &caller, &packet.source_port, &packet.source_channel)?;

    check_destination(&source_channel_end, packet)?;

    let (_, connection_end) = channel_connection(ctx, &source_channel_end)?;

    check_packet_commitment(ctx, packet)?;

    let expected_channel_end = ChannelEnd::new(
        State::Closed,
        *source_channel_end.ordering(),
        Counterparty::new(
            packet.source_port.clone(),
            Some(packet.source_channel.clone()),
        ),
        vec![counterparty_connection_id(&connection_end)?],
        source_channel_end.version().clone(),
    );

    verify_channel_proofs(
        ctx,
        &source_channel_end,
        &connection_end,
        &expected_channel_end,
        msg.proof_height,
        &msg.proof_close,
    )?;

    let result = prove_unreceived(
        ctx,
        source_channel_end,
        &connection_end,
        packet,
        msg.next_sequence_recv,
        msg.proof_height,
        &msg.proof_unreceived,
    )?;

    output.log("success: packet timeout on close");
    info!(packet = %packet, "packet timed out on closed channel");

    output.emit(IbcEvent::TimeoutOnClosePacket(TimeoutOnClosePacket {
        height: ctx.host_height(),
        packet: msg.packet,
    }));

    Ok(output.with_result(PacketResult::Timeout(result)))
}
