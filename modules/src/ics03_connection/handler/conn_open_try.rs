//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenTry`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::ics03_connection::context::ConnectionReader;
use crate::ics03_connection::error::Error;
use crate::ics03_connection::events::Attributes;
use crate::ics03_connection::handler::verify::{verify_client_proof, verify_connection_proof};
use crate::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
use crate::ics24_host::identifier::ConnectionId;

pub fn process<Ctx>(ctx: &Ctx, msg: MsgConnectionOpenTry) -> HandlerResult<ConnectionResult, Error>
where
    Ctx: ConnectionReader,
{
    let mut output = HandlerOutput::builder();

    ctx.client_state(&msg.client_id)
        .map_err(Error::ics02_client)?;

    if msg.counterparty.connection_id().is_none() {
        return Err(Error::invalid_counterparty());
    }

    // Build a new connection end as well as an identifier.
    let mut new_connection_end = ConnectionEnd::new(
        State::Init,
        msg.client_id.clone(),
        msg.counterparty.clone(),
        msg.counterparty_versions.clone(),
        msg.delay_period,
    );
    let id_counter = ctx.connection_counter()?;
    let conn_id = ConnectionId::new(id_counter);

    // Proof verification in two steps:
    // 1. Setup: build the ConnectionEnd as we expect to find it on the other party.
    let expected_conn = ConnectionEnd::new(
        State::Init,
        msg.counterparty.client_id().clone(),
        Counterparty::new(msg.client_id.clone(), None, ctx.commitment_prefix()),
        msg.counterparty_versions.clone(),
        msg.delay_period,
    );

    // 2. Pass the details to the verification functions.
    verify_connection_proof(
        ctx,
        &new_connection_end,
        &expected_conn,
        msg.proof_height,
        &msg.proof_init,
    )?;
    verify_client_proof(
        ctx,
        &new_connection_end,
        &msg.client_state,
        msg.proof_height,
        &msg.proof_client,
    )?;

    // Transition the connection end to the new state & pick a version.
    new_connection_end.set_state(State::TryOpen);
    new_connection_end.set_version(
        ctx.pick_version(&ctx.get_compatible_versions(), &msg.counterparty_versions)?,
    );

    output.log(format!(
        "success: connection verification passed, generated identifier {}",
        conn_id
    ));
    info!(connection = %conn_id, client = %msg.client_id, "connection handshake tried");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        connection_id: conn_id.clone(),
        client_id: new_connection_end.client_id().clone(),
        counterparty_connection_id: new_connection_end.counterparty().connection_id().cloned(),
        counterparty_client_id: new_connection_end.counterparty().client_id().clone(),
    };
    output.emit(IbcEvent::OpenTryConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: conn_id,
        connection_id_state: ConnectionIdState::Generated,
        connection_end: new_connection_end,
    };

    Ok(output.with_result(result))
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;
    use core::time::Duration;

    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use crate::events::IbcEvent;
    use crate::ics02_client::error::ErrorDetail as ClientErrorDetail;
    use crate::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
    use crate::ics03_connection::error::ErrorDetail;
    use crate::ics03_connection::handler::{dispatch, ConnectionResult};
    use crate::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
    use crate::ics03_connection::msgs::ConnectionMsg;
    use crate::ics03_connection::version::{get_compatible_versions, Version};
    use crate::ics07_tendermint::client_state::test_util::get_dummy_tendermint_client_state;
    use crate::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::ics24_host::path::Path;
    use crate::mock::context::MockContext;
    use crate::test_utils::CommitmentTree;
    use crate::Height;

    struct Fixture {
        ctx: MockContext,
        msg: MsgConnectionOpenTry,
    }

    /// Chain B (local) runs client `07-tendermint-0` of chain A, which stored
    /// `connection-7` in INIT with its client `07-tendermint-3` of chain B.
    fn fixture(counterparty_versions: Vec<Version>) -> Fixture {
        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let cp_client_id = ClientId::from_str("07-tendermint-3").unwrap();
        let cp_conn_id = ConnectionId::new(7);
        let proof_height = Height::new(0, 20);

        let cp_conn_end = ConnectionEnd::new(
            State::Init,
            cp_client_id.clone(),
            Counterparty::new(client_id.clone(), None, b"ibc".to_vec().into()),
            counterparty_versions.clone(),
            Duration::from_secs(0),
        );
        let client_state = get_dummy_tendermint_client_state(Height::new(0, 90));

        let tree = CommitmentTree::new("ibc")
            .with(
                Path::Connections(cp_conn_id.clone()),
                cp_conn_end.encode_vec().unwrap(),
            )
            .with(
                Path::ClientState(cp_client_id.clone()),
                client_state.encode_vec().unwrap(),
            );

        let ctx = MockContext::default().with_client_root(&client_id, proof_height, tree.root());

        let msg = MsgConnectionOpenTry {
            client_id,
            client_state,
            counterparty: Counterparty::new(
                cp_client_id.clone(),
                Some(cp_conn_id.clone()),
                b"ibc".to_vec().into(),
            ),
            counterparty_versions,
            proof_init: tree
                .membership_proof(Path::Connections(cp_conn_id))
                .into(),
            proof_client: tree
                .membership_proof(Path::ClientState(cp_client_id))
                .into(),
            proof_height,
            delay_period: Duration::from_secs(0),
        };

        Fixture { ctx, msg }
    }

    #[test]
    fn conn_open_try_msg_processing() {
        struct Test {
            name: String,
            ctx: MockContext,
            msg: ConnectionMsg,
            want_pass: bool,
        }

        let Fixture { ctx, msg } = fixture(get_compatible_versions());

        let mut msg_height_advanced = msg.clone();
        msg_height_advanced.proof_height = Height::new(0, 21);

        let mut msg_swapped_proofs = msg.clone();
        msg_swapped_proofs.proof_init = msg.proof_client.clone();

        let mut msg_other_delay = msg.clone();
        msg_other_delay.delay_period = Duration::from_secs(10);

        let mut msg_no_cp_connection = msg.clone();
        msg_no_cp_connection.counterparty.connection_id = None;

        let mut msg_other_client_state = msg.clone();
        msg_other_client_state.client_state =
            get_dummy_tendermint_client_state(Height::new(0, 91));

        let tests: Vec<Test> = vec![
            Test {
                name: "Processing fails because no client exists in the context".to_string(),
                ctx: MockContext::default(),
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg.clone())),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the proof height is above the client".to_string(),
                ctx: ctx.clone(),
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg_height_advanced)),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the proofs are swapped".to_string(),
                ctx: ctx.clone(),
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg_swapped_proofs)),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the counterparty used another delay".to_string(),
                ctx: ctx.clone(),
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg_other_delay)),
                want_pass: false,
            },
            Test {
                name: "Processing fails without a counterparty connection id".to_string(),
                ctx: ctx.clone(),
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg_no_cp_connection)),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the client state does not match".to_string(),
                ctx: ctx.clone(),
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg_other_client_state)),
                want_pass: false,
            },
            Test {
                name: "Good parameters".to_string(),
                ctx,
                msg: ConnectionMsg::ConnectionOpenTry(Box::new(msg)),
                want_pass: true,
            },
        ]
        .into_iter()
        .collect();

        for test in tests {
            let res = dispatch(&test.ctx, test.msg.clone());
            // Additionally check the events and the output objects in the result.
            match res {
                Ok(proto_output) => {
                    assert!(
                        test.want_pass,
                        "conn_open_try: test passed but was supposed to fail for test: {}, \nparams {:?}",
                        test.name,
                        test.msg.clone(),
                    );

                    assert!(!proto_output.events.is_empty()); // Some events must exist.

                    // The object in the output is a ConnectionEnd, should have TryOpen state.
                    let res: ConnectionResult = proto_output.result;
                    assert_eq!(res.connection_end.state().clone(), State::TryOpen);
                    assert_eq!(res.connection_end.versions().len(), 1);

                    for e in proto_output.events.iter() {
                        assert!(matches!(e, &IbcEvent::OpenTryConnection(_)));
                    }
                }
                Err(e) => {
                    assert!(
                        !test.want_pass,
                        "conn_open_try: failed for test: {}, \nparams {:?} error: {:?}",
                        test.name,
                        test.msg,
                        e,
                    );
                }
            }
        }
    }

    #[test]
    fn conn_open_try_reports_stale_client() {
        let Fixture { ctx, mut msg } = fixture(get_compatible_versions());
        msg.proof_height = Height::new(0, 25);

        match dispatch(&ctx, ConnectionMsg::ConnectionOpenTry(Box::new(msg))) {
            Err(e) => match e.detail() {
                ErrorDetail::VerifyConnectionState(e) => {
                    assert!(matches!(e.source, ClientErrorDetail::ProofHeightTooHigh(_)))
                }
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unexpected success (expected error)"),
        }
    }

    #[test]
    fn conn_open_try_no_common_version() {
        let Fixture { ctx, msg } = fixture(vec![Version::new("2", vec![
            "ORDER_ORDERED".to_string(),
        ])]);

        match dispatch(&ctx, ConnectionMsg::ConnectionOpenTry(Box::new(msg))) {
            Err(e) => match e.detail() {
                ErrorDetail::NoCommonVersion(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unexpected success (expected error)"),
        }
    }
}
