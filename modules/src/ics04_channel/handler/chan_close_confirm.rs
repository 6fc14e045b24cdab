//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseConfirm`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::Attributes;
use crate::ics04_channel::handler::verify::verify_channel_proofs;
use crate::ics04_channel::handler::{
    authenticate_capability, counterparty_connection_id, open_channel_connection,
    ChannelIdState, ChannelResult,
};
use crate::ics04_channel::msgs::chan_close_confirm::MsgChannelCloseConfirm;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgChannelCloseConfirm,
) -> HandlerResult<ChannelResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    // Retrieve the old channel end and validate it against the message.
    let mut channel_end = ctx.channel_end(&msg.port_id, &msg.channel_id)?;

    // Validate that the channel end is in a state where it can be closed.
    if channel_end.state_matches(&State::Closed) {
        return Err(Error::invalid_channel_state(
            msg.channel_id,
            *channel_end.state(),
        ));
    }

    authenticate_capability(ctx, &caller, &msg.port_id, &msg.channel_id)?;

    let (connection_id, connection_end) = open_channel_connection(ctx, &channel_end)?;

    // The counterparty must have closed its end first.
    let expected_channel_end = ChannelEnd::new(
        State::Closed,
        *channel_end.ordering(),
        Counterparty::new(msg.port_id.clone(), Some(msg.channel_id.clone())),
        vec![counterparty_connection_id(&connection_end)?],
        channel_end.version().clone(),
    );

    verify_channel_proofs(
        ctx,
        &channel_end,
        &connection_end,
        &expected_channel_end,
        msg.proof_height,
        &msg.proof_init,
    )?;

    channel_end.set_state(State::Closed);

    output.log("success: channel close confirm");
    info!(port = %msg.port_id, channel = %msg.channel_id, "channel closed");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        port_id: msg.port_id.clone(),
        channel_id: msg.channel_id.clone(),
        connection_id,
        counterparty_port_id: channel_end.counterparty().port_id().clone(),
        counterparty_channel_id: channel_end.counterparty().channel_id().cloned(),
    };
    output.emit(IbcEvent::CloseConfirmChannel(event_attributes.into()));

    let result = ChannelResult {
        port_id: msg.port_id,
        channel_id: msg.channel_id,
        channel_id_state: ChannelIdState::Reused,
        channel_end,
    };

    Ok(output.with_result(result))
}
