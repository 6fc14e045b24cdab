//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenConfirm`.

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
use crate::ics04_channel::msgs::chan_open_confirm::MsgChannelOpenConfirm;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgChannelOpenConfirm,
) -> HandlerResult<ChannelResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    // Unwrap the old channel end and validate it against the message.
    let mut channel_end = ctx.channel_end(&msg.port_id, &msg.channel_id)?;

    // Validate that the channel end is in a state where it can be confirmed.
    if !channel_end.state_matches(&State::TryOpen) {
        return Err(Error::invalid_channel_state(
            msg.channel_id,
            *channel_end.state(),
        ));
    }

    authenticate_capability(ctx, &caller, &msg.port_id, &msg.channel_id)?;

    let (connection_id, connection_end) = open_channel_connection(ctx, &channel_end)?;

    let expected_channel_end = ChannelEnd::new(
        State::Open,
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
        &msg.proof_ack,
    )?;

    channel_end.set_state(State::Open);

    output.log("success: channel open confirm");
    info!(port = %msg.port_id, channel = %msg.channel_id, "channel opened");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        port_id: msg.port_id.clone(),
        channel_id: msg.channel_id.clone(),
        connection_id,
        counterparty_port_id: channel_end.counterparty().port_id().clone(),
        counterparty_channel_id: channel_end.counterparty().channel_id().cloned(),
    };
    output.emit(IbcEvent::OpenConfirmChannel(event_attributes.into()));

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
    use crate::ics04_channel::handler::channel_dispatch;
    use crate::ics04_channel::msgs::chan_open_confirm::MsgChannelOpenConfirm;
    use crate::ics04_channel::msgs::ChannelMsg;
    use crate::ics04_channel::Version;
    use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
    use crate::ics24_host::path::Path;
    use crate::mock::context::MockContext;
    use crate::test_utils::{get_dummy_address, CommitmentTree};
    use crate::Height;

    #[test]
    fn chan_open_confirm_msg_processing() {
        struct Test {
            name: String,
            ctx: MockContext,
            msg: ChannelMsg,
            want_pass: bool,
        }

        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let proof_height = Height::new(0, 20);

        let cp_channel_end = ChannelEnd::new(
            State::Open,
            Order::Ordered,
            Counterparty::new(PortId::transfer(), Some(ChannelId::new(0))),
            vec![ConnectionId::new(7)],
            Version::new("ics20-1"),
        );
        let cp_path = Path::ChannelEnds(PortId::transfer(), ChannelId::new(1));
        let tree =
            CommitmentTree::new("ibc").with(cp_path.clone(), cp_channel_end.encode_vec().unwrap());

        let ctx = MockContext::default()
            .with_client_root(&client_id, proof_height, tree.root())
            .with_connection(
                ConnectionId::new(0),
                get_dummy_connection_end(ConnectionState::Open),
            )
            .with_channel(
                PortId::transfer(),
                ChannelId::new(0),
                get_dummy_channel_end(State::TryOpen, Order::Ordered),
            )
            .with_capability(PortId::transfer(), ChannelId::new(0));

        let msg = MsgChannelOpenConfirm {
            port_id: PortId::transfer(),
            channel_id: ChannelId::new(0),
            proof_ack: tree.membership_proof(cp_path).into(),
            proof_height,
        };

        let mut msg_bad_proof = msg.clone();
        msg_bad_proof.proof_ack = tree
            .non_membership_proof(Path::ChannelEnds(PortId::transfer(), ChannelId::new(2)))
            .into();

        let tests: Vec<Test> = vec![
            Test {
                name: "Processing fails because the channel is still in INIT".to_string(),
                ctx: ctx.clone().with_channel(
                    PortId::transfer(),
                    ChannelId::new(0),
                    get_dummy_channel_end(State::Init, Order::Ordered),
                ),
                msg: ChannelMsg::ChannelOpenConfirm(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the channel ordering differs".to_string(),
                ctx: ctx.clone().with_channel(
                    PortId::transfer(),
                    ChannelId::new(0),
                    get_dummy_channel_end(State::TryOpen, Order::Unordered),
                ),
                msg: ChannelMsg::ChannelOpenConfirm(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails without the channel capability".to_string(),
                ctx: MockContext::default()
                    .with_client_root(&client_id, proof_height, tree.root())
                    .with_connection(
                        ConnectionId::new(0),
                        get_dummy_connection_end(ConnectionState::Open),
                    )
                    .with_channel(
                        PortId::transfer(),
                        ChannelId::new(0),
                        get_dummy_channel_end(State::TryOpen, Order::Ordered),
                    ),
                msg: ChannelMsg::ChannelOpenConfirm(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the proof is not a membership proof".to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenConfirm(msg_bad_proof),
                want_pass: false,
            },
            Test {
                name: "Good parameters".to_string(),
                ctx,
                msg: ChannelMsg::ChannelOpenConfirm(msg),
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
                        "chan_open_confirm: test passed but was supposed to fail for test: {}, \nparams {:?}",
                        test.name,
                        test.msg.clone(),
                    );

                    assert!(!proto_output.events.is_empty()); // Some events must exist.

                    // The object in the output is a ChannelEnd, should have Open state.
                    assert_eq!(proto_output.result.channel_end.state().clone(), State::Open);

                    for e in proto_output.events.iter() {
                        assert!(matches!(e, &IbcEvent::OpenConfirmChannel(_)));
                    }
                }
                Err(e) => {
                    assert!(
                        !test.want_pass,
                        "chan_open_confirm: did not pass test: {}, \nparams {:?} error: {:?}",
                        test.name,
                        test.msg,
                        e,
                    );
                }
            }
        }
    }
}
