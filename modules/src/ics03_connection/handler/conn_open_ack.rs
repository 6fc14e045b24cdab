//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenAck`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::ics03_connection::context::ConnectionReader;
use crate::ics03_connection::error::Error;
use crate::ics03_connection::events::Attributes;
use crate::ics03_connection::handler::verify::{verify_client_proof, verify_connection_proof};
use crate::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
use crate::ics03_connection::version::is_supported_version;

pub fn process<Ctx>(ctx: &Ctx, msg: MsgConnectionOpenAck) -> HandlerResult<ConnectionResult, Error>
where
    Ctx: ConnectionReader,
{
    let mut output = HandlerOutput::builder();

    let mut conn_end = ctx.connection_end(&msg.connection_id)?;

    if !conn_end.state_matches(&State::Init) {
        return Err(Error::invalid_connection_state(
            msg.connection_id,
            *conn_end.state(),
            State::Init,
        ));
    }

    // The version picked by the counterparty must be one we proposed.
    if !is_supported_version(conn_end.versions(), &msg.version) {
        return Err(Error::invalid_version(msg.version));
    }

    // Pin the counterparty identifier so the verification looks in the right place.
    conn_end.set_counterparty(Counterparty::new(
        conn_end.counterparty().client_id().clone(),
        Some(msg.counterparty_connection_id.clone()),
        conn_end.counterparty().prefix().clone(),
    ));

    // The counterparty should be in TryOpen, pointing back at this connection.
    let expected_conn = ConnectionEnd::new(
        State::TryOpen,
        conn_end.counterparty().client_id().clone(),
        Counterparty::new(
            conn_end.client_id().clone(),
            Some(msg.connection_id.clone()),
            ctx.commitment_prefix(),
        ),
        vec![msg.version.clone()],
        conn_end.delay_period(),
    );

    verify_connection_proof(
        ctx,
        &conn_end,
        &expected_conn,
        msg.proof_height,
        &msg.proof_try,
    )?;
    verify_client_proof(
        ctx,
        &conn_end,
        &msg.client_state,
        msg.proof_height,
        &msg.proof_client,
    )?;

    conn_end.set_state(State::Open);
    conn_end.set_version(msg.version);

    output.log("success: connection verification passed");
    info!(connection = %msg.connection_id, counterparty = %msg.counterparty_connection_id, "connection opened");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        connection_id: msg.connection_id.clone(),
        client_id: conn_end.client_id().clone(),
        counterparty_connection_id: conn_end.counterparty().connection_id().cloned(),
        counterparty_client_id: conn_end.counterparty().client_id().clone(),
    };
    output.emit(IbcEvent::OpenAckConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: msg.connection_id,
        connection_id_state: ConnectionIdState::Reused,
        connection_end: conn_end,
    };

    Ok(output.with_result(result))
}
