//! Protocol logic specific to processing ICS2 messages of type `MsgUpgradeAnyClient`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_def::{AnyClient, ClientDef};
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics02_client::events::Attributes;
use crate::ics02_client::handler::ClientResult;
use crate::ics02_client::msgs::upgrade_client::MsgUpgradeAnyClient;
use crate::ics24_host::identifier::ClientId;
use crate::timestamp::Timestamp;
use crate::Height;

/// The result following the successful processing of a `MsgUpgradeAnyClient` message.
/// This data type should be used with a qualified name `upgrade_client::Result` to avoid ambiguity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Result {
    pub client_id: ClientId,
    pub client_state: AnyClientState,
    pub consensus_state: AnyConsensusState,
    pub processed_time: Timestamp,
    pub processed_height: Height,
}

pub fn process<Ctx>(ctx: &Ctx, msg: MsgUpgradeAnyClient) -> HandlerResult<ClientResult, Error>
where
    Ctx: ClientReader,
{
    let mut output = HandlerOutput::builder();
    let MsgUpgradeAnyClient {
        client_id,
        client_state: upgraded_client_state,
        consensus_state: upgraded_consensus_state,
        proof_upgrade_client,
        proof_upgrade_consensus_state,
    } = msg;

    // Read client state from the host chain store.
    let client_state = ctx.client_state(&client_id)?;
    let client_type = client_state.client_type();

    if upgraded_client_state.client_type() != client_type {
        return Err(Error::wrong_client_type(
            upgraded_client_state.client_type().as_str().to_string(),
        ));
    }

    let client_def = AnyClient::from_client_type(client_type);

    let status = client_def.status(ctx, &client_id, &client_state)?;
    if !status.is_active() {
        return Err(Error::client_not_active(client_id, status));
    }

    if client_state.upgrade_path().is_empty() {
        return Err(Error::invalid_upgrade_path(client_id));
    }

    // The upgraded states are committed under the root of the last consensus
    // state of the old chain.
    let consensus_state = ctx.consensus_state(&client_id, client_state.latest_height())?;

    let (new_client_state, new_consensus_state) = client_def.verify_upgrade_and_update_state(
        &client_id,
        &client_state,
        &consensus_state,
        upgraded_client_state,
        upgraded_consensus_state,
        &proof_upgrade_client,
        &proof_upgrade_consensus_state,
    )?;

    let new_height = new_client_state.latest_height();
    output.log(format!("success: client upgraded to height {}", new_height));
    info!(client = %client_id, from = %client_state.latest_height(), to = %new_height, "client upgraded");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        client_id: client_id.clone(),
        client_type,
        consensus_height: new_height,
    };
    output.emit(IbcEvent::UpgradeClient(event_attributes.into()));

    let result = ClientResult::Upgrade(Result {
        client_id,
        client_state: new_client_state,
        consensus_state: new_consensus_state,
        processed_time: ctx.host_timestamp(),
        processed_height: ctx.host_height(),
    });

    Ok(output.with_result(result))
}
