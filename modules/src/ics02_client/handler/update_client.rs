//! Protocol logic specific to processing ICS2 messages of type `MsgUpdateAnyClient`.

use tracing::{info, warn};

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_def::{AnyClient, ClientDef, UpdatedState};
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics02_client::events::Attributes;
use crate::ics02_client::handler::{misbehaviour, ClientResult};
use crate::ics02_client::msgs::update_client::MsgUpdateAnyClient;
use crate::ics24_host::identifier::ClientId;
use crate::timestamp::Timestamp;
use crate::Height;

/// The result following the successful processing of a `MsgUpdateAnyClient` message. Preferably
/// this data type should be used with a qualified name `update_client::Result` to avoid ambiguity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Result {
    pub client_id: ClientId,
    pub client_state: AnyClientState,
    pub consensus_state: AnyConsensusState,
    /// Height at which the new consensus state is stored, i.e. the header height.
    pub consensus_height: Height,
    pub processed_time: Timestamp,
    pub processed_height: Height,
}

pub fn process<Ctx>(ctx: &Ctx, msg: MsgUpdateAnyClient) -> HandlerResult<ClientResult, Error>
where
    Ctx: ClientReader,
{
    let mut output = HandlerOutput::builder();

    let MsgUpdateAnyClient { client_id, header } = msg;

    // Read client state from the host chain store.
    let client_state = ctx.client_state(&client_id)?;
    let client_type = client_state.client_type();

    if header.client_type() != client_type {
        return Err(Error::wrong_client_type(header.client_type().as_str().to_string()));
    }

    let client_def = AnyClient::from_client_type(client_type);

    let status = client_def.status(ctx, &client_id, &client_state)?;
    if !status.is_active() {
        return Err(Error::client_not_active(client_id, status));
    }

    let header_height = header.height();

    // Use client_state to validate the new header against the trusted consensus state.
    // This function will return the new client_state (its latest_height changed) and a
    // consensus_state obtained from header. These will be later persisted by the keeper.
    let updated = client_def.check_header_and_update_state(
        ctx,
        client_id.clone(),
        client_state,
        header,
    )?;

    let event_attributes = Attributes {
        height: ctx.host_height(),
        client_id: client_id.clone(),
        client_type,
        consensus_height: header_height,
    };

    let result = match updated {
        UpdatedState::Updated {
            client_state,
            consensus_state,
        } => {
            output.log("success: client updated");
            info!(client = %client_id, height = %header_height, "client updated");
            output.emit(IbcEvent::UpdateClient(event_attributes.into()));

            ClientResult::Update(Result {
                client_id,
                client_state,
                consensus_state,
                consensus_height: header_height,
                processed_time: ctx.host_timestamp(),
                processed_height: ctx.host_height(),
            })
        }
        UpdatedState::Duplicate => {
            output.log("success: header already applied");
            ClientResult::Unchanged(client_id)
        }
        UpdatedState::Frozen { client_state } => {
            output.log("success: conflicting header, client frozen");
            warn!(client = %client_id, height = %header_height, "conflicting header, freezing client");
            output.emit(IbcEvent::ClientMisbehaviour(event_attributes.into()));

            ClientResult::Freeze(misbehaviour::Result {
                client_id,
                client_state,
            })
        }
    };

    Ok(output.with_result(result))
}
