//! Verification of counterparty state against a client.
//!
//! Every proof a handshake or packet handler checks goes through
//! [`verify_membership`] or [`verify_non_membership`]. Before the proof
//! itself is looked at, the client must be active, must have reached the
//! proof height, and the connection delay period must have elapsed since the
//! consensus state at that height was stored.

use core::time::Duration;

use tracing::debug;

use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_def::{AnyClient, ClientDef};
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics23_commitment::commitment::{CommitmentPrefix, CommitmentProofBytes};
use crate::ics23_commitment::merkle::apply_prefix;
use crate::ics24_host::identifier::ClientId;
use crate::ics24_host::path::Path;
use crate::timestamp::ZERO_DURATION;
use crate::Height;

/// The time and number of blocks that must separate the storing of a
/// consensus state and its use for proof verification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DelayPeriod {
    pub time: Duration,
    pub blocks: u64,
}

impl DelayPeriod {
    pub fn none() -> Self {
        Self::default()
    }

    /// Derives the block delay from the time delay of a connection.
    pub fn new(time: Duration, max_expected_time_per_block: Duration) -> Self {
        Self {
            time,
            blocks: block_delay(time, max_expected_time_per_block),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.time == ZERO_DURATION && self.blocks == 0
    }
}

/// Number of blocks a time delay spans, rounding up. A zero block time means
/// no block delay.
pub fn block_delay(delay_period: Duration, max_expected_time_per_block: Duration) -> u64 {
    if max_expected_time_per_block == ZERO_DURATION {
        return 0;
    }

    let delay = delay_period.as_nanos();
    let block_time = max_expected_time_per_block.as_nanos();
    let blocks = (delay + block_time - 1) / block_time;

    u64::try_from(blocks).unwrap_or(u64::MAX)
}

/// Verify that `value` is stored at `path` on the counterparty, as of
/// `proof_height`.
#[allow(clippy::too_many_arguments)]
pub fn verify_membership(
    ctx: &dyn ClientReader,
    client_id: &ClientId,
    proof_height: Height,
    delay: DelayPeriod,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    path: Path,
    value: Vec<u8>,
) -> Result<(), Error> {
    let (client_def, client_state, consensus_state) =
        proof_context(ctx, client_id, proof_height, delay)?;

    debug!(client = %client_id, height = %proof_height, path = %path, "verifying membership");

    let merkle_path = apply_prefix(prefix, vec![path.to_string()]);
    client_def.verify_membership(&client_state, &consensus_state, merkle_path, proof, value)
}

/// Verify that nothing is stored at `path` on the counterparty, as of
/// `proof_height`.
pub fn verify_non_membership(
    ctx: &dyn ClientReader,
    client_id: &ClientId,
    proof_height: Height,
    delay: DelayPeriod,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    path: Path,
) -> Result<(), Error> {
    let (client_def, client_state, consensus_state) =
        proof_context(ctx, client_id, proof_height, delay)?;

    debug!(client = %client_id, height = %proof_height, path = %path, "verifying non-membership");

    let merkle_path = apply_prefix(prefix, vec![path.to_string()]);
    client_def.verify_non_membership(&client_state, &consensus_state, merkle_path, proof)
}

/// Checks that a client can verify proofs at `proof_height`, returning what
/// the verification needs.
fn proof_context(
    ctx: &dyn ClientReader,
    client_id: &ClientId,
    proof_height: Height,
    delay: DelayPeriod,
) -> Result<(AnyClient, AnyClientState, AnyConsensusState), Error> {
    let client_state = ctx.client_state(client_id)?;
    let client_def = AnyClient::from_client_type(client_state.client_type());

    let status = client_def.status(ctx, client_id, &client_state)?;
    if !status.is_active() {
        return Err(Error::client_not_active(client_id.clone(), status));
    }

    if client_state.latest_height() < proof_height {
        return Err(Error::proof_height_too_high(
            proof_height,
            client_state.latest_height(),
        ));
    }

    verify_delay_passed(ctx, client_id, proof_height, delay)?;

    let consensus_state = ctx.consensus_state(client_id, proof_height)?;

    Ok((client_def, client_state, consensus_state))
}

/// Both the time and the block delay are inclusive: a proof becomes usable
/// exactly at `processed + delay`.
pub fn verify_delay_passed(
    ctx: &dyn ClientReader,
    client_id: &ClientId,
    proof_height: Height,
    delay: DelayPeriod,
) -> Result<(), Error> {
    if delay.is_zero() {
        return Ok(());
    }

    let current_time = ctx.host_timestamp();
    let current_height = ctx.host_height();

    let processed_time = ctx.client_update_time(client_id, proof_height)?;
    let processed_height = ctx.client_update_height(client_id, proof_height)?;

    let earliest_time = (processed_time + delay.time).map_err(Error::timestamp_overflow)?;
    let earliest_height = processed_height.add(delay.blocks);

    if earliest_time.after(&current_time) || earliest_height > current_height {
        return Err(Error::delay_period_not_passed(
            current_time,
            earliest_time,
            current_height,
            earliest_height,
        ));
    }

    Ok(())
}
