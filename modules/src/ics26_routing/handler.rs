use tracing::{debug, warn};

use crate::context::IbcContext;
use crate::events::IbcEvent;
use crate::handler::HandlerOutput;
use crate::host::{BlockSnapshot, Host};
use crate::ics02_client::handler::{dispatch as ics2_msg_dispatcher, ClientResult};
use crate::ics03_connection::handler::{dispatch as ics3_msg_dispatcher, ConnectionIdState};
use crate::ics04_channel::handler::{
    channel_dispatch as ics4_msg_dispatcher, packet_dispatch as ics4_packet_msg_dispatcher,
    ChannelIdState,
};
use crate::ics05_port::handler::dispatch as ics5_msg_dispatcher;
use crate::ics26_routing::context::Ics26Context;
use crate::ics26_routing::error::Error;
use crate::ics26_routing::msgs::Ics26Envelope::{self, *};
use crate::store::{Buffer, WordStore};
use crate::Address;

/// Outcome of a routed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgReceipt {
    /// The identifier a message allocated, if any (client, connection or channel).
    pub identifier: Option<String>,
    pub events: Vec<IbcEvent>,
    pub log: Vec<String>,
    /// Set when the message was already processed and nothing changed.
    pub no_op: bool,
}

/// Processes one message on behalf of `caller`.
///
/// The message runs against a write buffer over the context's store and a
/// snapshot of the host block. The buffered writes reach the store only if
/// the message succeeds; its events are handed to the host after that. A
/// message that was already processed succeeds with an empty receipt.
pub fn deliver<S, H>(
    ctx: &mut IbcContext<S, H>,
    caller: Address,
    message: Ics26Envelope,
) -> Result<MsgReceipt, Error>
where
    S: WordStore,
    H: Host,
{
    debug!(module = message.module(), ?caller, "delivering message");

    let block = BlockSnapshot::of(ctx.host());
    let config = ctx.config().clone();
    let mut buffered = IbcContext::new(Buffer::new(ctx.store_mut().words_mut()), block, config);

    let output = match dispatch(&mut buffered, caller, message) {
        Ok(output) => output,
        Err(e) if e.is_no_op() => {
            warn!("{}", e);
            return Ok(MsgReceipt {
                identifier: None,
                events: vec![],
                log: vec![e.to_string()],
                no_op: true,
            });
        }
        Err(e) => return Err(e),
    };

    let (buffer, _) = buffered.into_parts();
    debug!(words = buffer.pending_len(), "message succeeded");
    buffer.consume();

    ctx.emit_events(output.events.iter().cloned());

    Ok(MsgReceipt {
        identifier: output.result,
        events: output.events,
        log: output.log,
        no_op: false,
    })
}

/// Top-level ICS dispatch function. Routes incoming IBC messages to their corresponding module
/// and applies the module's result to the context. The output carries the log and events
/// produced while processing `msg`, and the identifier it allocated, if any.
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    caller: Address,
    msg: Ics26Envelope,
) -> Result<HandlerOutput<Option<String>>, Error>
where
    Ctx: Ics26Context,
{
    let output = match msg {
        Ics2Msg(msg) => {
            let handler_output = ics2_msg_dispatcher(ctx, msg).map_err(Error::ics02_client)?;

            let identifier = matches!(handler_output.result, ClientResult::Create(_))
                .then(|| handler_output.result.client_id().to_string());

            // Apply the result to the context (host chain store).
            ctx.store_client_result(handler_output.result)
                .map_err(Error::ics02_client)?;

            HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events)
                .with_result(identifier)
        }

        Ics3Msg(msg) => {
            let handler_output = ics3_msg_dispatcher(ctx, msg).map_err(Error::ics03_connection)?;

            let identifier = matches!(
                handler_output.result.connection_id_state,
                ConnectionIdState::Generated
            )
            .then(|| handler_output.result.connection_id.to_string());

            // Apply any results to the host chain store.
            ctx.store_connection_result(handler_output.result)
                .map_err(Error::ics03_connection)?;

            HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events)
                .with_result(identifier)
        }

        Ics4ChannelMsg(msg) => {
            let handler_output =
                ics4_msg_dispatcher(ctx, caller, msg).map_err(Error::ics04_channel)?;

            let identifier = matches!(
                handler_output.result.channel_id_state,
                ChannelIdState::Generated
            )
            .then(|| handler_output.result.channel_id.to_string());

            ctx.store_channel_result(handler_output.result)
                .map_err(Error::ics04_channel)?;

            HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events)
                .with_result(identifier)
        }

        Ics4PacketMsg(msg) => {
            let handler_output =
                ics4_packet_msg_dispatcher(ctx, caller, msg).map_err(Error::ics04_channel)?;

            ctx.store_packet_result(handler_output.result)
                .map_err(Error::ics04_channel)?;

            HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events)
                .with_result(None)
        }

        Ics5Msg(msg) => {
            let handler_output = ics5_msg_dispatcher(ctx, caller, msg).map_err(Error::ics05_port)?;

            ctx.store_port_result(handler_output.result)
                .map_err(Error::ics05_port)?;

            HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events)
                .with_result(None)
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;
    use test_log::test;

    use super::*;
    use crate::ics02_client::client_consensus::AnyConsensusState;
    use crate::ics02_client::msgs::create_client::MsgCreateAnyClient;
    use crate::ics02_client::msgs::ClientMsg;
    use crate::ics03_connection::connection::test_util::get_dummy_connection_end;
    use crate::ics03_connection::connection::State as ConnectionState;
    use crate::ics03_connection::msgs::conn_open_init::test_util::get_dummy_msg_conn_open_init;
    use crate::ics03_connection::msgs::ConnectionMsg;
    use crate::ics04_channel::channel::test_util::get_dummy_channel_end;
    use crate::ics04_channel::channel::{Order, State};
    use crate::ics04_channel::context::ChannelReader;
    use crate::ics04_channel::msgs::acknowledgement::MsgAcknowledgement;
    use crate::ics04_channel::msgs::PacketMsg;
    use crate::ics04_channel::packet::{Packet, Sequence};
    use crate::ics05_port::context::PortReader;
    use crate::ics05_port::msgs::bind_port::MsgBindPort;
    use crate::ics05_port::msgs::PortMsg;
    use crate::ics07_tendermint::client_state::test_util::get_dummy_tendermint_client_state;
    use crate::ics07_tendermint::consensus_state::ConsensusState;
    use crate::ics07_tendermint::header::test_util::get_dummy_tendermint_header;
    use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
    use crate::ics26_routing::error::ErrorDetail;
    use crate::mock::context::MockContext;
    use crate::test_utils::get_dummy_address;
    use crate::timestamp::Timestamp;
    use crate::Height;

    fn create_client_msg(height: Height) -> Ics26Envelope {
        let consensus_state = ConsensusState::from(get_dummy_tendermint_header(height, height));
        Ics2Msg(ClientMsg::CreateClient(MsgCreateAnyClient::new(
            "tendermint",
            get_dummy_tendermint_client_state(height),
            AnyConsensusState::from(consensus_state),
        )))
    }

    #[test]
    fn routing_module_and_keepers() {
        let mut ctx = MockContext::default();
        let caller = get_dummy_address();

        let receipt = deliver(&mut ctx, caller, create_client_msg(Height::new(0, 5))).unwrap();
        assert_eq!(receipt.identifier.as_deref(), Some("07-tendermint-0"));
        assert!(!receipt.no_op);

        let conn_init = Ics3Msg(ConnectionMsg::ConnectionOpenInit(
            get_dummy_msg_conn_open_init(0, 1),
        ));
        let receipt = deliver(&mut ctx, caller, conn_init).unwrap();
        assert_eq!(receipt.identifier.as_deref(), Some("connection-0"));

        let receipt = deliver(
            &mut ctx,
            caller,
            Ics5Msg(PortMsg::BindPort(MsgBindPort::new(PortId::transfer()))),
        )
        .unwrap();
        assert_eq!(receipt.identifier, None);
        assert_eq!(ctx.port_owner(&PortId::transfer()).unwrap(), Some(caller));

        // every event reached the host, in order
        assert_eq!(ctx.host_events().len(), 3);
        assert!(matches!(ctx.host_events()[0], IbcEvent::CreateClient(_)));
        assert!(matches!(ctx.host_events()[2], IbcEvent::BindPort(_)));
    }

    #[test]
    fn failed_message_leaves_no_trace() {
        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let mut ctx = MockContext::default().with_client(&client_id, Height::new(0, 5));
        let words_before = ctx.store().words().clone();

        // no client 07-tendermint-4
        let conn_init = Ics3Msg(ConnectionMsg::ConnectionOpenInit(
            get_dummy_msg_conn_open_init(4, 1),
        ));
        match deliver(&mut ctx, get_dummy_address(), conn_init) {
            Err(e) => match e.detail() {
                ErrorDetail::Ics03Connection(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("connection opened on a missing client"),
        }

        assert_eq!(ctx.store().words(), &words_before);
        assert!(ctx.host_events().is_empty());
    }

    #[test]
    fn already_acknowledged_packet_is_a_no_op() {
        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let mut ctx = MockContext::default()
            .with_client(&client_id, Height::new(0, 20))
            .with_connection(
                ConnectionId::new(0),
                get_dummy_connection_end(ConnectionState::Open),
            )
            .with_channel(
                PortId::transfer(),
                ChannelId::new(0),
                get_dummy_channel_end(State::Open, Order::Unordered),
            )
            .with_capability(PortId::transfer(), ChannelId::new(0));
        let words_before = ctx.store().words().clone();

        let packet = Packet {
            sequence: Sequence::from(1),
            source_port: PortId::transfer(),
            source_channel: ChannelId::new(0),
            destination_port: PortId::transfer(),
            destination_channel: ChannelId::new(1),
            data: vec![7],
            timeout_height: Height::new(0, 200),
            timeout_timestamp: Timestamp::none(),
        };
        let msg = MsgAcknowledgement {
            packet,
            acknowledgement: vec![1],
            proof_acked: vec![0].into(),
            proof_height: Height::new(0, 20),
        };

        let receipt = deliver(
            &mut ctx,
            get_dummy_address(),
            Ics4PacketMsg(PacketMsg::AckPacket(msg)),
        )
        .unwrap();

        assert!(receipt.no_op);
        assert!(receipt.events.is_empty());
        assert_eq!(receipt.log.len(), 1);
        assert_eq!(ctx.store().words(), &words_before);
        assert!(ctx.host_events().is_empty());
        assert!(ctx
            .get_packet_commitment(&PortId::transfer(), &ChannelId::new(0), Sequence::from(1))
            .unwrap()
            .is_none());
    }
}
