//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseInit`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::State;
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::Attributes;
use crate::ics04_channel::handler::{
    authenticate_capability, open_channel_connection, ChannelIdState, ChannelResult,
};
use crate::ics04_channel::msgs::chan_close_init::MsgChannelCloseInit;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgChannelCloseInit,
) -> HandlerResult<ChannelResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    // Unwrap the old channel end and validate it against the message.
    let mut channel_end = ctx.channel_end(&msg.port_id, &msg.channel_id)?;

    // Validate that the channel end is in a state where it can be closed.
    if channel_end.state_matches(&State::Closed) {
        return Err(Error::invalid_channel_state(
            msg.channel_id,
            *channel_end.state(),
        ));
    }

    authenticate_capability(ctx, &caller, &msg.port_id, &msg.channel_id)?;

    let (connection_id, _) = open_channel_connection(ctx, &channel_end)?;

    channel_end.set_state(State::Closed);

    output.log("success: channel close init");
    info!(port = %msg.port_id, channel = %msg.channel_id, "channel closing");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        port_id: msg.port_id.clone(),
        channel_id: msg.channel_id.clone(),
        connection_id,
        counterparty_port_id: channel_end.counterparty().port_id().clone(),
        counterparty_channel_id: channel_end.counterparty().channel_id().cloned(),
    };
    output.emit(IbcEvent::CloseInitChannel(event_attributes.into()));

    let result = ChannelResult {
        port_id: msg.port_id,
        channel_id: msg.channel_id,
        channel_id_state: ChannelIdState::Reused,
        channel_end,
    };

    Ok(output.with_result(result))
}
