//! This module implements the processing logic for ICS4 (channel) messages.

use crate::handler::HandlerOutput;
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::msgs::{ChannelMsg, PacketMsg};
use crate::ics04_channel::packet::PacketResult;
use crate::ics05_port::capabilities::owns_capability;
use crate::ics24_host::identifier::{ChannelId, ConnectionId, PortId};
use crate::Address;

pub mod acknowledgement;
pub mod chan_close_confirm;
pub mod chan_close_init;
pub mod chan_open_ack;
pub mod chan_open_confirm;
pub mod chan_open_init;
pub mod chan_open_try;
pub mod recv_packet;
pub mod send_packet;
pub mod timeout;
pub mod timeout_on_close;
pub mod verify;
pub mod write_acknowledgement;

/// Defines the possible states of a channel identifier in a `ChannelResult`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelIdState {
    /// Specifies that the channel handshake handler allocated a new channel identifier. This
    /// happens during the processing of either the `MsgChannelOpenInit` or `MsgChannelOpenTry`.
    Generated,

    /// Specifies that the handler reused a previously-allocated channel identifier.
    Reused,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelResult {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub channel_id_state: ChannelIdState,
    pub channel_end: ChannelEnd,
}

/// Fails unless `caller` may operate the channel end `(port_id, channel_id)`.
pub(crate) fn authenticate_capability<Ctx>(
    ctx: &Ctx,
    caller: &Address,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(), Error>
where
    Ctx: ChannelReader,
{
    if !owns_capability(ctx, caller, port_id, channel_id).map_err(Error::ics05_port)? {
        return Err(Error::capability_missing(port_id.clone(), channel_id.clone()));
    }
    Ok(())
}

/// Loads the connection a channel end rides on.
pub(crate) fn channel_connection<Ctx>(
    ctx: &Ctx,
    channel_end: &ChannelEnd,
) -> Result<(ConnectionId, ConnectionEnd), Error>
where
    Ctx: ChannelReader,
{
    let connection_id = channel_end.validate_connection_hops()?.clone();
    let connection_end = ctx
        .connection_end(&connection_id)
        .map_err(Error::ics03_connection)?;
    Ok((connection_id, connection_end))
}

/// Like [`channel_connection`], but the connection must be open.
pub(crate) fn open_channel_connection<Ctx>(
    ctx: &Ctx,
    channel_end: &ChannelEnd,
) -> Result<(ConnectionId, ConnectionEnd), Error>
where
    Ctx: ChannelReader,
{
    let (connection_id, connection_end) = channel_connection(ctx, channel_end)?;
    if !connection_end.is_open() {
        return Err(Error::connection_not_open(connection_id));
    }
    Ok((connection_id, connection_end))
}

/// The connection id the counterparty chain uses for `connection_end`.
pub(crate) fn counterparty_connection_id(
    connection_end: &ConnectionEnd,
) -> Result<ConnectionId, Error> {
    connection_end
        .counterparty()
        .connection_id()
        .cloned()
        .ok_or_else(Error::missing_counterparty_connection_id)
}

/// General entry point for processing any type of message related to the ICS4 channel open and
/// channel close handshake protocols.
pub fn channel_dispatch<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: ChannelMsg,
) -> Result<HandlerOutput<ChannelResult>, Error>
where
    Ctx: ChannelReader,
{
    match msg {
        ChannelMsg::ChannelOpenInit(msg) => chan_open_init::process(ctx, caller, msg),
        ChannelMsg::ChannelOpenTry(msg) => chan_open_try::process(ctx, caller, msg),
        ChannelMsg::ChannelOpenAck(msg) => chan_open_ack::process(ctx, caller, msg),
        ChannelMsg::ChannelOpenConfirm(msg) => chan_open_confirm::process(ctx, caller, msg),
        ChannelMsg::ChannelCloseInit(msg) => chan_close_init::process(ctx, caller, msg),
        ChannelMsg::ChannelCloseConfirm(msg) => chan_close_confirm::process(ctx, caller, msg),
    }
}

/// Dispatcher for processing any type of message related to the ICS4 packet protocols.
pub fn packet_dispatch<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: PacketMsg,
) -> Result<HandlerOutput<PacketResult>, Error>
where
    Ctx: ChannelReader,
{
    match msg {
        PacketMsg::SendPacket(msg) => send_packet::process(ctx, caller, msg),
        PacketMsg::RecvPacket(msg) => recv_packet::process(ctx, caller, msg),
        PacketMsg::WriteAcknowledgement(msg) => write_acknowledgement::process(ctx, caller, msg),
        PacketMsg::AckPacket(msg) => acknowledgement::process(ctx, caller, msg),
        PacketMsg::ToPacket(msg) => timeout::process(ctx, caller, msg),
        PacketMsg::ToClosePacket(msg) => timeout_on_close::process(ctx, caller, msg),
    }
}
