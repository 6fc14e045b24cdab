//! This module implements the processing logic for ICS2 (client abstractions and functions) msgs.

use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics02_client::msgs::ClientMsg;
use crate::ics24_host::identifier::ClientId;
use crate::handler::HandlerOutput;

pub mod create_client;
pub mod misbehaviour;
pub mod update_client;
pub mod upgrade_client;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientResult {
    Create(create_client::Result),
    Update(update_client::Result),
    Upgrade(upgrade_client::Result),
    /// The client state was frozen, either by submitted misbehaviour or by a
    /// header conflicting with a stored consensus state.
    Freeze(misbehaviour::Result),
    /// The message was valid but changes nothing.
    Unchanged(ClientId),
}

impl ClientResult {
    pub fn client_id(&self) -> &ClientId {
        match self {
            ClientResult::Create(res) => &res.client_id,
            ClientResult::Update(res) => &res.client_id,
            ClientResult::Upgrade(res) => &res.client_id,
            ClientResult::Freeze(res) => &res.client_id,
            ClientResult::Unchanged(client_id) => client_id,
        }
    }
}

/// General entry point for processing any message related to ICS2 (client functions) protocols.
pub fn dispatch<Ctx>(ctx: &Ctx, msg: ClientMsg) -> Result<HandlerOutput<ClientResult>, Error>
where
    Ctx: ClientReader,
{
    match msg {
        ClientMsg::CreateClient(msg) => create_client::process(ctx, msg),
        ClientMsg::UpdateClient(msg) => update_client::process(ctx, msg),
        ClientMsg::UpgradeClient(msg) => upgrade_client::process(ctx, msg),
        ClientMsg::SubmitMisbehaviour(msg) => misbehaviour::process(ctx, msg),
    }
}
