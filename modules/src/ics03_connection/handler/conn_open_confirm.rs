//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenConfirm`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::ics03_connection::context::ConnectionReader;
use crate::ics03_connection::error::Error;
use crate::ics03_connection::events::Attributes;
use crate::ics03_connection::handler::verify::verify_connection_proof;
use crate::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;

pub fn process<Ctx>(
    ctx: &Ctx,
    msg: MsgConnectionOpenConfirm,
) -> HandlerResult<ConnectionResult, Error>
where
    Ctx: ConnectionReader,
{
    let mut output = HandlerOutput::builder();

    // Validate the message, especially the connection ID.
    let mut conn_end = ctx.connection_end(&msg.connection_id)?;
    if !conn_end.state_matches(&State::TryOpen) {
        return Err(Error::invalid_connection_state(
            msg.connection_id,
            *conn_end.state(),
            State::TryOpen,
        ));
    }

    // Verify proofs. Assemble the connection end as we expect to find it on the counterparty.
    let expected_conn = ConnectionEnd::new(
        State::Open,
        conn_end.counterparty().client_id().clone(),
        Counterparty::new(
            conn_end.client_id().clone(),
            Some(msg.connection_id.clone()),
            ctx.commitment_prefix(),
        ),
        conn_end.versions().to_vec(),
        conn_end.delay_period(),
    );

    verify_connection_proof(
        ctx,
        &conn_end,
        &expected_conn,
        msg.proof_height,
        &msg.proof_ack,
    )?;

    // Transition our own end of the connection to state OPEN.
    conn_end.set_state(State::Open);

    output.log("success: connection verification passed");
    info!(connection = %msg.connection_id, "connection opened");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        connection_id: msg.connection_id.clone(),
        client_id: conn_end.client_id().clone(),
        counterparty_connection_id: conn_end.counterparty().connection_id().cloned(),
        counterparty_client_id: conn_end.counterparty().client_id().clone(),
    };
    output.emit(IbcEvent::OpenConfirmConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: msg.connection_id,
        connection_id_state: ConnectionIdState::Reused,
        connection_end: conn_end,
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
    use crate::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
    use crate::ics03_connection::context::{ConnectionKeeper, ConnectionReader};
    use crate::ics03_connection::handler::{dispatch, ConnectionResult};
    use crate::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;
    use crate::ics03_connection::msgs::ConnectionMsg;
    use crate::ics03_connection::version::Version;
    use crate::ics24_host::identifier::{ClientId, ConnectionId};
    use crate::ics24_host::path::Path;
    use crate::mock::context::MockContext;
    use crate::test_utils::CommitmentTree;
    use crate::Height;

    #[test]
    fn conn_open_confirm_msg_processing() {
        struct Test {
            name: String,
            ctx: MockContext,
            msg: ConnectionMsg,
            want_pass: bool,
        }

        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let cp_client_id = ClientId::from_str("07-tendermint-3").unwrap();
        let conn_id = ConnectionId::new(2);
        let cp_conn_id = ConnectionId::new(7);
        let proof_height = Height::new(0, 20);

        let local_end = ConnectionEnd::new(
            State::TryOpen,
            client_id.clone(),
            Counterparty::new(
                cp_client_id.clone(),
                Some(cp_conn_id.clone()),
                b"ibc".to_vec().into(),
            ),
            vec![Version::default()],
            Duration::from_secs(0),
        );

        let cp_open_end = ConnectionEnd::new(
            State::Open,
            cp_client_id,
            Counterparty::new(client_id.clone(), Some(conn_id.clone()), b"ibc".to_vec().into()),
            vec![Version::default()],
            Duration::from_secs(0),
        );
        let mut cp_init_end = cp_open_end.clone();
        cp_init_end.set_state(State::Init);

        let open_tree = CommitmentTree::new("ibc").with(
            Path::Connections(cp_conn_id.clone()),
            cp_open_end.encode_vec().unwrap(),
        );
        let init_tree = CommitmentTree::new("ibc").with(
            Path::Connections(cp_conn_id.clone()),
            cp_init_end.encode_vec().unwrap(),
        );

        let msg = MsgConnectionOpenConfirm {
            connection_id: conn_id.clone(),
            proof_ack: open_tree
                .membership_proof(Path::Connections(cp_conn_id.clone()))
                .into(),
            proof_height,
        };
        let msg_init_proof = MsgConnectionOpenConfirm {
            proof_ack: init_tree
                .membership_proof(Path::Connections(cp_conn_id))
                .into(),
            ..msg.clone()
        };

        let mut incorrect_end = local_end.clone();
        incorrect_end.set_state(State::Open);

        let context = MockContext::default()
            .with_client_root(&client_id, proof_height, open_tree.root());

        let tests: Vec<Test> = vec![
            Test {
                name: "Processing fails due to missing connection in context".to_string(),
                ctx: context.clone(),
                msg: ConnectionMsg::ConnectionOpenConfirm(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails due to connections mismatch (incorrect state)".to_string(),
                ctx: context
                    .clone()
                    .with_connection(conn_id.clone(), incorrect_end),
                msg: ConnectionMsg::ConnectionOpenConfirm(msg.clone()),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the counterparty is not open".to_string(),
                ctx: context
                    .clone()
                    .with_connection(conn_id.clone(), local_end.clone()),
                msg: ConnectionMsg::ConnectionOpenConfirm(msg_init_proof),
                want_pass: false,
            },
            Test {
                name: "Processing successful".to_string(),
                ctx: context.with_connection(conn_id.clone(), local_end),
                msg: ConnectionMsg::ConnectionOpenConfirm(msg),
                want_pass: true,
            },
        ]
        .into_iter()
        .collect();

        for mut test in tests {
            let res = dispatch(&test.ctx, test.msg.clone());
            // Additionally check the events and the output objects in the result.
            match res {
                Ok(proto_output) => {
                    assert!(
                        test.want_pass,
                        "conn_open_confirm: test passed but was supposed to fail for: {}, \nparams {:?}",
                        test.name,
                        test.msg.clone(),
                    );

                    assert!(!proto_output.events.is_empty()); // Some events must exist.

                    // The object in the output is a ConnectionEnd, should have Open state.
                    let res: ConnectionResult = proto_output.result;
                    assert_eq!(res.connection_end.state().clone(), State::Open);

                    for e in proto_output.events.iter() {
                        assert!(matches!(e, &IbcEvent::OpenConfirmConnection(_)));
                    }

                    test.ctx.store_connection_result(res).unwrap();
                    assert!(test.ctx.connection_end(&conn_id).unwrap().is_open());
                }
                Err(e) => {
                    assert!(
                        !test.want_pass,
                        "conn_open_confirm: failed for test: {}, \nparams {:?} error: {:?}",
                        test.name,
                        test.msg,
                        e,
                    );
                }
            }
        }
    }
}
