//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenAck`.

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
use crate::ics04_channel::msgs::chan_open_ack::MsgChannelOpenAck;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgChannelOpenAck,
) -> HandlerResult<ChannelResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    // Unwrap the old channel end and validate it against the message.
    let mut channel_end = ctx.channel_end(&msg.port_id, &msg.channel_id)?;

    // Validate that the channel end is in a state where it can be ack.
    if !channel_end.state_matches(&State::Init) {
        return Err(Error::invalid_channel_state(
            msg.channel_id,
            *channel_end.state(),
        ));
    }

    authenticate_capability(ctx, &caller, &msg.port_id, &msg.channel_id)?;

    let (connection_id, connection_end) = open_channel_connection(ctx, &channel_end)?;

    // Record the counterparty channel id before checking the proof against it.
    channel_end.set_counterparty_channel_id(msg.counterparty_channel_id.clone());

    let expected_channel_end = ChannelEnd::new(
        State::TryOpen,
        *channel_end.ordering(),
        Counterparty::new(msg.port_id.clone(), Some(msg.channel_id.clone())),
        vec![counterparty_connection_id(&connection_end)?],
        msg.counterparty_version.clone(),
    );

    verify_channel_proofs(
        ctx,
        &channel_end,
        &connection_end,
        &expected_channel_end,
        msg.proof_height,
        &msg.proof_try,
    )?;

    channel_end.set_state(State::Open);
    channel_end.set_version(msg.counterparty_version.clone());

    output.log("success: channel open ack");
    info!(port = %msg.port_id, channel = %msg.channel_id, "channel opened");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        port_id: msg.port_id.clone(),
        channel_id: msg.channel_id.clone(),
        connection_id,
        counterparty_port_id: channel_end.counterparty().port_id().clone(),
        counterparty_channel_id: Some(msg.counterparty_channel_id),
    };
    output.emit(IbcEvent::OpenAckChannel(event_attributes.into()));

    let result = ChannelResult {
        port_id: msg.port_id,
        channel_id: msg.channel_id,
        channel_id_state: ChannelIdState::Reused,
        channel_end,
    };

    Ok(output.with_result(result))
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use crate::events::IbcEvent;
    use crate::ics03_connection::connection::test_util::get_dummy_connection_end;
    use crate::ics03_connection::connection::State as ConnectionState;
    use crate::ics04_channel::channel::test_util::get_dummy_channel_end;
    use crate::ics04_channel::channel::{ChannelEnd, Counterparty, Order, State};
    use crate::ics04_channel::context::{ChannelKeeper, ChannelReader};
    use crate::ics04_channel::error::ErrorDetail;
    use crate::ics04_channel::handler::{channel_dispatch, ChannelIdState};
    use crate::ics04_channel::msgs::chan_open_ack::MsgChannelOpenAck;
    use crate::ics04_channel::msgs::ChannelMsg;
    use crate::ics04_channel::Version;
    use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
    use crate::ics24_host::path::Path;
    use crate::mock::context::MockContext;
    use crate::test_utils::{get_dummy_address, CommitmentTree};
    use crate::{Address, Height};

    struct Fixture {
        ctx: MockContext,
        msg: MsgChannelOpenAck,
    }

    /// `transfer/channel-0` is in INIT locally; the counterparty answered with
    /// `transfer/channel-1` in TRYOPEN.
    fn fixture() -> Fixture {
        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let proof_height = Height::new(0, 20);

        let cp_channel_end = ChannelEnd::new(
            State::TryOpen,
            Order::Unordered,
            Counterparty::new(PortId::transfer(), Some(ChannelId::new(0))),
            vec![ConnectionId::new(7)],
            Version::new("ics20-1"),
        );
        let cp_path = Path::ChannelEnds(PortId::transfer(), ChannelId::new(1));
        let tree =
            CommitmentTree::new("ibc").with(cp_path.clone(), cp_channel_end.encode_vec().unwrap());

        let mut channel_end = get_dummy_channel_end(State::Init, Order::Unordered);
        channel_end.remote.channel_id = None;

        let ctx = MockContext::default()
            .with_client_root(&client_id, proof_height, tree.root())
            .with_connection(
                ConnectionId::new(0),
                get_dummy_connection_end(ConnectionState::Open),
            )
            .with_channel(PortId::transfer(), ChannelId::new(0), channel_end)
            .with_capability(PortId::transfer(), ChannelId::new(0));

        let msg = MsgChannelOpenAck {
            port_id: PortId::transfer(),
            channel_id: ChannelId::new(0),
            counterparty_channel_id: ChannelId::new(1),
            counterparty_version: Version::new("ics20-1"),
            proof_try: tree.membership_proof(cp_path).into(),
            proof_height,
        };

        Fixture { ctx, msg }
    }

    #[test]
    fn chan_open_ack_msg_processing() {
        struct Test {
            name: String,
            ctx: MockContext,
            msg: ChannelMsg,
            want_pass: bool,
        }

        let Fixture { ctx, msg } = fixture();

        let mut msg_unknown_channel = msg.clone();
        msg_unknown_channel.channel_id = ChannelId::new(5);

        let mut msg_other_cp_channel = msg.clone();
        msg_other_cp_channel.counterparty_channel_id = ChannelId::new(2);

        let mut msg_other_version = msg.clone();
        msg_other_version.counterparty_version = Version::new("ics20-2");

        let tests: Vec<Test> = vec![
            Test {
                name: "Processing fails because the channel does not exist".to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenAck(msg_unknown_channel),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the channel is already open".to_string(),
                ctx: ctx.clone().with_channel(
                    PortId::transfer(),
                    ChannelId::new(0),
                    get_dummy_channel_end(State::Open, Order::Unordered),
                ),
                msg: ChannelMsg::ChannelOpenAck(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the connection is not open".to_string(),
                ctx: ctx.clone().with_connection(
                    ConnectionId::new(0),
                    get_dummy_connection_end(ConnectionState::TryOpen),
                ),
                msg: ChannelMsg::ChannelOpenAck(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the proof names another channel".to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenAck(msg_other_cp_channel),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the counterparty stored another version"
                    .to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenAck(msg_other_version),
                want_pass: false,
            },
            Test {
                name: "Good parameters".to_string(),
                ctx,
                msg: ChannelMsg::ChannelOpenAck(msg),
                want_pass: true,
            },
        ]
        .into_iter()
        .collect();

        for test in tests {
            let res = channel_dispatch(&test.ctx, get_dummy_address(), test.msg.clone());
            // Additionally check the events and the output objects in the result.
            match res {
                Ok(proto_output) => {
                    assert!(
                        test.want_pass,
                        "chan_open_ack: test passed but was supposed to fail for test: {}, \nparams {:?}",
                        test.name,
                        test.msg.clone(),
                    );

                    assert!(!proto_output.events.is_empty()); // Some events must exist.

                    // The object in the output is a ChannelEnd, should have Open state.
                    let res = proto_output.result;
                    assert_eq!(res.channel_end.state().clone(), State::Open);
                    assert_eq!(res.channel_id_state, ChannelIdState::Reused);
                    assert_eq!(
                        res.channel_end.counterparty().channel_id(),
                        Some(&ChannelId::new(1))
                    );

                    for e in proto_output.events.iter() {
                        assert!(matches!(e, &IbcEvent::OpenAckChannel(_)));
                    }
                }
                Err(e) => {
                    assert!(
                        !test.want_pass,
                        "chan_open_ack: did not pass test: {}, \nparams {:?} error: {:?}",
                        test.name,
                        test.msg,
                        e,
                    );
                }
            }
        }
    }

    #[test]
    fn chan_open_ack_requires_capability() {
        let Fixture { ctx, msg } = fixture();
        let ctx = ctx.with_port_owner(PortId::transfer(), Address::repeat_byte(0x77));

        match channel_dispatch(&ctx, get_dummy_address(), ChannelMsg::ChannelOpenAck(msg)) {
            Err(e) => match e.detail() {
                ErrorDetail::CapabilityMissing(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unexpected success (expected error)"),
        }
    }

    #[test]
    fn chan_open_ack_stores_open_channel() {
        let Fixture { mut ctx, msg } = fixture();

        let output =
            channel_dispatch(&ctx, get_dummy_address(), ChannelMsg::ChannelOpenAck(msg)).unwrap();
        ctx.store_channel_result(output.result).unwrap();

        let stored = ctx
            .channel_end(&PortId::transfer(), &ChannelId::new(0))
            .unwrap();
        assert!(stored.is_open());
        assert_eq!(stored.version(), &Version::new("ics20-1"));
    }
}
