use core::time::Duration;

use crate::ics02_client::client_state::AnyClientState;
use crate::ics03_connection::connection::Counterparty;
use crate::ics03_connection::version::Version;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::identifier::ClientId;
use crate::Height;

/// Per our convention, this message is sent to chain B.
/// The handler will check proofs of chain A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    pub client_id: ClientId,
    /// The state of the client chain A keeps for this chain.
    pub client_state: AnyClientState,
    pub counterparty: Counterparty,
    pub counterparty_versions: Vec<Version>,
    /// Proof that chain A stored its connection end in state INIT.
    pub proof_init: CommitmentProofBytes,
    /// Proof that chain A stored `client_state`.
    pub proof_client: CommitmentProofBytes,
    pub proof_height: Height,
    pub delay_period: Duration,
}
