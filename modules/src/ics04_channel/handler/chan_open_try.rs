//! Protocol logic specific to ICS4 messages of type `MsgChannelOpenTry`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::{ChannelEnd, Counterparty, State};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::Attributes;
use crate::ics04_channel::handler::verify::verify_channel_proofs;
use crate::ics04_channel::handler::{
    counterparty_connection_id, open_channel_connection, ChannelIdState, ChannelResult,
};
use crate::ics04_channel::msgs::chan_open_try::MsgChannelOpenTry;
use crate::ics05_port::capabilities::{authenticate_port, ensure_capability_unclaimed};
use crate::ics24_host::identifier::ChannelId;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgChannelOpenTry,
) -> HandlerResult<ChannelResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    let (connection_id, connection_end) = open_channel_connection(ctx, &msg.channel)?;

    let version = match connection_end.versions() {
        [version] => version,
        _ => return Err(Error::invalid_version_length_connection()),
    };
    if !version.supports_ordering(msg.channel.ordering) {
        return Err(Error::channel_feature_not_supported_by_connection());
    }

    authenticate_port(ctx, &caller, &msg.port_id).map_err(Error::ics05_port)?;

    if msg.channel.counterparty().channel_id().is_none() {
        return Err(Error::invalid_counterparty_channel_id());
    }

    let chan_id = ChannelId::new(ctx.channel_counter()?);
    ensure_capability_unclaimed(ctx, &msg.port_id, &chan_id).map_err(Error::ics05_port)?;

    let new_channel_end = ChannelEnd::new(
        State::TryOpen,
        msg.channel.ordering,
        msg.channel.counterparty().clone(),
        msg.channel.connection_hops().clone(),
        msg.channel.version().clone(),
    );

    // The channel end the counterparty stored when it ran `ChanOpenInit`.
    let expected_channel_end = ChannelEnd::new(
        State::Init,
        msg.channel.ordering,
        Counterparty::new(msg.port_id.clone(), None),
        vec![counterparty_connection_id(&connection_end)?],
        msg.counterparty_version.clone(),
    );

    verify_channel_proofs(
        ctx,
        &new_channel_end,
        &connection_end,
        &expected_channel_end,
        msg.proof_height,
        &msg.proof_init,
    )?;

    output.log(format!(
        "success: channel open try with channel identifier: {}",
        chan_id
    ));
    info!(port = %msg.port_id, channel = %chan_id, connection = %connection_id, "channel handshake tried");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        port_id: msg.port_id.clone(),
        channel_id: chan_id.clone(),
        connection_id,
        counterparty_port_id: new_channel_end.counterparty().port_id().clone(),
        counterparty_channel_id: new_channel_end.counterparty().channel_id().cloned(),
    };
    output.emit(IbcEvent::OpenTryChannel(event_attributes.into()));

    let result = ChannelResult {
        port_id: msg.port_id,
        channel_id: chan_id,
        channel_id_state: ChannelIdState::Generated,
        channel_end: new_channel_end,
    };

    Ok(output.with_result(result))
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use crate::events::IbcEvent;
    use crate::ics02_client::error::ErrorDetail as ClientErrorDetail;
    use crate::ics03_connection::connection::test_util::get_dummy_connection_end;
    use crate::ics03_connection::connection::State as ConnectionState;
    use crate::ics04_channel::channel::test_util::get_dummy_channel_end;
    use crate::ics04_channel::channel::{ChannelEnd, Counterparty, Order, State};
    use crate::ics04_channel::error::ErrorDetail;
    use crate::ics04_channel::handler::{channel_dispatch, ChannelIdState};
    use crate::ics04_channel::msgs::chan_open_try::MsgChannelOpenTry;
    use crate::ics04_channel::msgs::ChannelMsg;
    use crate::ics04_channel::Version;
    use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
    use crate::ics24_host::path::Path;
    use crate::mock::context::MockContext;
    use crate::test_utils::{get_dummy_address, CommitmentTree};
    use crate::Height;

    struct Fixture {
        ctx: MockContext,
        msg: MsgChannelOpenTry,
    }

    /// The counterparty ran `ChanOpenInit` for `transfer/channel-1` over
    /// `connection-7`; the local chain answers over its `connection-0`.
    fn fixture(connection_state: ConnectionState) -> Fixture {
        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let proof_height = Height::new(0, 20);

        let cp_channel_end = ChannelEnd::new(
            State::Init,
            Order::Unordered,
            Counterparty::new(PortId::transfer(), None),
            vec![ConnectionId::new(7)],
            Version::new("ics20-1"),
        );
        let cp_path = Path::ChannelEnds(PortId::transfer(), ChannelId::new(1));
        let tree =
            CommitmentTree::new("ibc").with(cp_path.clone(), cp_channel_end.encode_vec().unwrap());

        let ctx = MockContext::default()
            .with_client_root(&client_id, proof_height, tree.root())
            .with_connection(ConnectionId::new(0), get_dummy_connection_end(connection_state));

        let msg = MsgChannelOpenTry {
            port_id: PortId::transfer(),
            channel: get_dummy_channel_end(State::TryOpen, Order::Unordered),
            counterparty_version: Version::new("ics20-1"),
            proof_init: tree.membership_proof(cp_path).into(),
            proof_height,
        };

        Fixture { ctx, msg }
    }

    #[test]
    fn chan_open_try_msg_processing() {
        struct Test {
            name: String,
            ctx: MockContext,
            msg: ChannelMsg,
            want_pass: bool,
        }

        let Fixture { ctx, msg } = fixture(ConnectionState::Open);
        let Fixture { ctx: ctx_conn_init, .. } = fixture(ConnectionState::Init);

        let mut msg_other_version = msg.clone();
        msg_other_version.counterparty_version = Version::new("ics20-2");

        let mut msg_ordered = msg.clone();
        msg_ordered.channel.ordering = Order::Ordered;

        let mut msg_no_cp_channel = msg.clone();
        msg_no_cp_channel.channel.remote.channel_id = None;

        let mut msg_proof_too_high = msg.clone();
        msg_proof_too_high.proof_height = Height::new(0, 21);

        let tests: Vec<Test> = vec![
            Test {
                name: "Processing fails because no connection exists in the context".to_string(),
                ctx: MockContext::default(),
                msg: ChannelMsg::ChannelOpenTry(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the connection is not open".to_string(),
                ctx: ctx_conn_init,
                msg: ChannelMsg::ChannelOpenTry(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the counterparty stored another version"
                    .to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenTry(msg_other_version),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the counterparty stored another ordering"
                    .to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenTry(msg_ordered),
                want_pass: false,
            },
            Test {
                name: "Processing fails without a counterparty channel id".to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenTry(msg_no_cp_channel),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the proof height is above the client".to_string(),
                ctx: ctx.clone(),
                msg: ChannelMsg::ChannelOpenTry(msg_proof_too_high),
                want_pass: false,
            },
            Test {
                name: "Good parameters".to_string(),
                ctx,
                msg: ChannelMsg::ChannelOpenTry(msg),
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
                        "chan_open_try: test passed but was supposed to fail for test: {}, \nparams {:?}",
                        test.name,
                        test.msg.clone(),
                    );

                    assert!(!proto_output.events.is_empty()); // Some events must exist.

                    // The object in the output is a ChannelEnd, should have TryOpen state.
                    assert_eq!(proto_output.result.channel_end.state().clone(), State::TryOpen);
                    assert_eq!(
                        proto_output.result.channel_id_state,
                        ChannelIdState::Generated
                    );
                    assert_eq!(proto_output.result.channel_id, ChannelId::new(0));

                    for e in proto_output.events.iter() {
                        assert!(matches!(e, &IbcEvent::OpenTryChannel(_)));
                    }
                }
                Err(e) => {
                    assert!(
                        !test.want_pass,
                        "chan_open_try: did not pass test: {}, \nparams {:?} error: {:?}",
                        test.name,
                        test.msg,
                        e,
                    );
                }
            }
        }
    }

    #[test]
    fn chan_open_try_reports_failed_proof() {
        let Fixture { ctx, mut msg } = fixture(ConnectionState::Open);
        msg.counterparty_version = Version::new("ics20-2");

        match channel_dispatch(&ctx, get_dummy_address(), ChannelMsg::ChannelOpenTry(msg)) {
            Err(e) => match e.detail() {
                ErrorDetail::VerifyChannelFailed(e) => {
                    assert!(matches!(
                        e.source,
                        ClientErrorDetail::ProofVerificationFailed(_)
                    ))
                }
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unexpected success (expected error)"),
        }
    }
}
