//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenInit`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::Attributes;
use crate::ics04_channel::handler::{channel_connection, ChannelIdState, ChannelResult};
use crate::ics04_channel::msgs::chan_open_init::MsgChannelOpenInit;
use crate::ics05_port::capabilities::{authenticate_port, ensure_capability_unclaimed};
use crate::ics24_host::identifier::ChannelId;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgChannelOpenInit,
) -> HandlerResult<ChannelResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    // An IBC connection running on the local (host) chain should exist.
    let (connection_id, connection_end) = channel_connection(ctx, &msg.channel)?;

    let version = match connection_end.versions() {
        [version] => version,
        _ => return Err(Error::invalid_version_length_connection()),
    };

    let channel_feature = msg.channel.ordering;
    if !version.supports_ordering(channel_feature) {
        return Err(Error::channel_feature_not_supported_by_connection());
    }

    authenticate_port(ctx, &caller, &msg.port_id).map_err(Error::ics05_port)?;

    let chan_id = ChannelId::new(ctx.channel_counter()?);
    ensure_capability_unclaimed(ctx, &msg.port_id, &chan_id).map_err(Error::ics05_port)?;

    let new_channel_end = ChannelEnd::new(
        State::Init,
        msg.channel.ordering,
        Counterparty::new(msg.channel.counterparty().port_id().clone(), None),
        msg.channel.connection_hops().clone(),
        msg.channel.version().clone(),
    );

    output.log(format!(
        "success: channel open init with channel identifier: {}",
        chan_id
    ));
    info!(port = %msg.port_id, channel = %chan_id, connection = %connection_id, "channel initialized");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        port_id: msg.port_id.clone(),
        channel_id: chan_id.clone(),
        connection_id,
        counterparty_port_id: new_channel_end.counterparty().port_id().clone(),
        counterparty_channel_id: None,
    };
    output.emit(IbcEvent::OpenInitChannel(event_attributes.into()));

    let result = ChannelResult {
        port_id: msg.port_id,
        channel_id: chan_id,
        channel_id_state: ChannelIdState::Generated,
        channel_end: new_channel_end,
    };

    Ok(output.with_result(result))
}
