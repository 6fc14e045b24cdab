//! Protocol logic specific to processing ICS2 messages of type `MsgSubmitAnyMisbehaviour`.

use tracing::warn;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics02_client::client_def::{AnyClient, ClientDef};
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics02_client::events::Attributes;
use crate::ics02_client::handler::ClientResult;
use crate::ics02_client::msgs::misbehaviour::MsgSubmitAnyMisbehaviour;
use crate::ics24_host::identifier::ClientId;

/// The result of freezing a client. Preferably this data type should be used
/// with a qualified name `misbehaviour::Result` to avoid ambiguity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Result {
    pub client_id: ClientId,
    pub client_state: AnyClientState,
}

pub fn process<Ctx>(ctx: &Ctx, msg: MsgSubmitAnyMisbehaviour) -> HandlerResult<ClientResult, Error>
where
    Ctx: ClientReader,
{
    let mut output = HandlerOutput::builder();

    let MsgSubmitAnyMisbehaviour {
        client_id,
        misbehaviour,
    } = msg;

    // Read client state from the host chain store.
    let client_state = ctx.client_state(&client_id)?;
    let client_type = client_state.client_type();

    let client_def = AnyClient::from_client_type(client_type);

    let status = client_def.status(ctx, &client_id, &client_state)?;
    if !status.is_active() {
        return Err(Error::client_not_active(client_id, status));
    }

    let misbehaviour_height = misbehaviour.height();
    let client_state = client_def.check_misbehaviour_and_update_state(
        ctx,
        client_id.clone(),
        client_state,
        misbehaviour,
    )?;

    output.log("success: misbehaviour detected, client frozen");
    warn!(client = %client_id, height = %misbehaviour_height, "misbehaviour detected, freezing client");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        client_id: client_id.clone(),
        client_type,
        consensus_height: misbehaviour_height,
    };
    output.emit(IbcEvent::ClientMisbehaviour(event_attributes.into()));

    let result = ClientResult::Freeze(Result {
        client_id,
        client_state,
    });

    Ok(output.with_result(result))
}
