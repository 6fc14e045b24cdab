use ibc_precompile_proto::ibc::core::commitment::v1::MerklePath;
use ibc_precompile_proto::Any;
use prost::Message;

use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_def::{ClientDef, UpdatedState};
use crate::ics02_client::client_state::{AnyClientState, Status};
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics07_tendermint::client_state::ClientState;
use crate::ics07_tendermint::consensus_state::ConsensusState;
use crate::ics07_tendermint::header::Header;
use crate::ics07_tendermint::misbehaviour::Misbehaviour;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics23_commitment::merkle::MerkleProof;
use crate::ics24_host::identifier::ClientId;
use crate::ics24_host::path::upgrade_paths;
use crate::Height;

/// Height recorded in a client state frozen because of misbehaviour.
pub const FROZEN_HEIGHT: Height = Height {
    revision_number: 0,
    revision_height: 1,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TendermintClient;

impl TendermintClient {
    fn trusted_consensus_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: &ClientId,
        client_state: &ClientState,
        header: &Header,
    ) -> Result<ConsensusState, Error> {
        let trusted_height = if header.trusted_height.is_zero() {
            client_state.latest_height()
        } else {
            header.trusted_height
        };

        match ctx.consensus_state(client_id, trusted_height)? {
            AnyConsensusState::Tendermint(cs) => Ok(cs),
        }
    }
}

impl ClientDef for TendermintClient {
    type Header = Header;
    type ClientState = ClientState;
    type ConsensusState = ConsensusState;
    type Misbehaviour = Misbehaviour;

    fn status(
        &self,
        ctx: &dyn ClientReader,
        client_id: &ClientId,
        client_state: &ClientState,
    ) -> Result<Status, Error> {
        if client_state.is_frozen() {
            return Ok(Status::Frozen);
        }

        // a client without a consensus state at its latest height cannot be trusted
        let latest_consensus_state =
            match ctx.maybe_consensus_state(client_id, client_state.latest_height())? {
                Some(AnyConsensusState::Tendermint(cs)) => cs,
                None => return Ok(Status::Expired),
            };

        if client_state.expired(latest_consensus_state.timestamp, ctx.host_timestamp()) {
            return Ok(Status::Expired);
        }

        Ok(Status::Active)
    }

    fn check_header_and_update_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: ClientId,
        client_state: ClientState,
        header: Header,
    ) -> Result<UpdatedState<ClientState, ConsensusState>, Error> {
        self.trusted_consensus_state(ctx, &client_id, &client_state, &header)?;

        let header_consensus_state = ConsensusState::from(header.clone());

        if let Some(existing) = ctx.maybe_consensus_state(&client_id, header.height)? {
            let AnyConsensusState::Tendermint(existing) = existing;

            if existing == header_consensus_state {
                return Ok(UpdatedState::Duplicate);
            }

            return Ok(UpdatedState::Frozen {
                client_state: client_state.with_frozen_height(FROZEN_HEIGHT),
            });
        }

        Ok(UpdatedState::Updated {
            client_state: client_state.with_header(&header),
            consensus_state: header_consensus_state,
        })
    }

    fn check_misbehaviour_and_update_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: ClientId,
        client_state: ClientState,
        misbehaviour: Misbehaviour,
    ) -> Result<ClientState, Error> {
        self.trusted_consensus_state(ctx, &client_id, &client_state, &misbehaviour.header1)?;
        self.trusted_consensus_state(ctx, &client_id, &client_state, &misbehaviour.header2)?;

        if !misbehaviour.is_fault() {
            return Err(Error::misbehaviour_not_detected(client_id));
        }

        Ok(client_state.with_frozen_height(FROZEN_HEIGHT))
    }

    fn verify_upgrade_and_update_state(
        &self,
        client_id: &ClientId,
        client_state: &ClientState,
        consensus_state: &ConsensusState,
        upgraded_client_state: ClientState,
        upgraded_consensus_state: ConsensusState,
        proof_upgrade_client: &CommitmentProofBytes,
        proof_upgrade_consensus_state: &CommitmentProofBytes,
    ) -> Result<(ClientState, ConsensusState), Error> {
        let (client_path, consensus_path) =
            upgrade_paths(&client_state.upgrade_path, client_state.latest_height())
                .ok_or_else(|| Error::invalid_upgrade_path(client_id.clone()))?;

        if upgraded_client_state.latest_height() <= client_state.latest_height() {
            return Err(Error::low_upgrade_height(
                upgraded_client_state.latest_height(),
                client_state.latest_height(),
            ));
        }

        // the chain commits the upgraded client with its custom fields zeroed
        let committed_client =
            Any::from(AnyClientState::Tendermint(upgraded_client_state.zero_custom_fields()))
                .encode_to_vec();
        self.verify_membership(
            client_state,
            consensus_state,
            MerklePath {
                key_path: client_path,
            },
            proof_upgrade_client,
            committed_client,
        )?;

        let committed_consensus =
            Any::from(AnyConsensusState::Tendermint(upgraded_consensus_state.clone()))
                .encode_to_vec();
        self.verify_membership(
            client_state,
            consensus_state,
            MerklePath {
                key_path: consensus_path,
            },
            proof_upgrade_consensus_state,
            committed_consensus,
        )?;

        Ok((
            client_state.upgrade(upgraded_client_state),
            ConsensusState::upgraded(&upgraded_consensus_state),
        ))
    }

    fn verify_membership(
        &self,
        client_state: &ClientState,
        consensus_state: &ConsensusState,
        path: MerklePath,
        proof: &CommitmentProofBytes,
        value: Vec<u8>,
    ) -> Result<(), Error> {
        let merkle_proof: MerkleProof =
            MerkleProof::try_from(proof).map_err(Error::proof_verification_failed)?;

        merkle_proof
            .verify_membership(
                &client_state.proof_specs,
                &consensus_state.root,
                &path,
                value,
                0,
            )
            .map_err(Error::proof_verification_failed)
    }

    fn verify_non_membership(
        &self,
        client_state: &ClientState,
        consensus_state: &ConsensusState,
        path: MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(), Error> {
        let merkle_proof: MerkleProof =
            MerkleProof::try_from(proof).map_err(Error::proof_verification_failed)?;

        merkle_proof
            .verify_non_membership(&client_state.proof_specs, &consensus_state.root, &path)
            .map_err(Error::proof_verification_failed)
    }
}
