//! ICS3 verification functions, common across the handshake handlers that consume proofs.

use ibc_precompile_proto::protobuf::Protobuf;

use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::verifier::{verify_membership, DelayPeriod};
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics03_connection::error::Error;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::path::Path;
use crate::Height;

/// Verifies the authenticity and semantic correctness of a commitment `proof`. The commitment
/// claims to prove that an object of type connection exists on the source chain (i.e., the chain
/// which created this proof). This object must match the state of `expected_conn`.
///
/// `connection_end` is the local end, whose client checks the proof and whose counterparty names
/// where the object lives.
pub fn verify_connection_proof(
    ctx: &dyn ClientReader,
    connection_end: &ConnectionEnd,
    expected_conn: &ConnectionEnd,
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let counterparty = connection_end.counterparty();
    let connection_id = counterparty
        .connection_id()
        .ok_or_else(Error::invalid_counterparty)?;

    let value = expected_conn
        .encode_vec()
        .map_err(Error::encode_connection_end)?;

    verify_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        DelayPeriod::none(),
        counterparty.prefix(),
        proof,
        Path::Connections(connection_id.clone()),
        value,
    )
    .map_err(Error::verify_connection_state)
}

/// Verifies the client `proof` from a connection handshake message, typically from a
/// `MsgConnectionOpenTry` or a `MsgConnectionOpenAck`. The `expected_client_state` argument is a
/// representation for a client of the current chain (the chain handling the current message), which
/// is running on the counterparty chain (the chain which sent this message).
pub fn verify_client_proof(
    ctx: &dyn ClientReader,
    connection_end: &ConnectionEnd,
    expected_client_state: &AnyClientState,
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let counterparty = connection_end.counterparty();

    let value = expected_client_state
        .encode_vec()
        .map_err(Error::encode_client_state)?;

    verify_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        DelayPeriod::none(),
        counterparty.prefix(),
        proof,
        Path::ClientState(counterparty.client_id().clone()),
        value,
    )
    .map_err(|e| Error::verify_client_state(counterparty.client_id().clone(), e))
}
