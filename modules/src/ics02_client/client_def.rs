use ibc_precompile_proto::ibc::core::commitment::v1::MerklePath;

use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_state::{AnyClientState, Status};
use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics02_client::header::AnyHeader;
use crate::ics02_client::misbehaviour::AnyMisbehaviour;
use crate::ics07_tendermint::client_def::TendermintClient;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::identifier::ClientId;

/// Result of checking a header against the stored client state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdatedState<ClientState, ConsensusState> {
    /// The header is valid and yields a new consensus state.
    Updated {
        client_state: ClientState,
        consensus_state: ConsensusState,
    },
    /// The header yields exactly the consensus state already stored at its
    /// height.
    Duplicate,
    /// The header conflicts with the consensus state stored at its height.
    /// The returned client state is frozen.
    Frozen { client_state: ClientState },
}

pub trait ClientDef: Clone {
    type Header: Clone;
    type ClientState: Clone;
    type ConsensusState: Clone;
    type Misbehaviour: Clone;

    fn status(
        &self,
        ctx: &dyn ClientReader,
        client_id: &ClientId,
        client_state: &Self::ClientState,
    ) -> Result<Status, Error>;

    fn check_header_and_update_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: ClientId,
        client_state: Self::ClientState,
        header: Self::Header,
    ) -> Result<UpdatedState<Self::ClientState, Self::ConsensusState>, Error>;

    /// Returns the frozen client state if `misbehaviour` proves a fault.
    fn check_misbehaviour_and_update_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: ClientId,
        client_state: Self::ClientState,
        misbehaviour: Self::Misbehaviour,
    ) -> Result<Self::ClientState, Error>;

    /// Verifies the upgraded states against the consensus state at the
    /// client's latest height, returning the states replacing the current
    /// ones.
    #[allow(clippy::too_many_arguments)]
    fn verify_upgrade_and_update_state(
        &self,
        client_id: &ClientId,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        upgraded_client_state: Self::ClientState,
        upgraded_consensus_state: Self::ConsensusState,
        proof_upgrade_client: &CommitmentProofBytes,
        proof_upgrade_consensus_state: &CommitmentProofBytes,
    ) -> Result<(Self::ClientState, Self::ConsensusState), Error>;

    /// Verify that `value` is committed at `path` under the root of `consensus_state`.
    fn verify_membership(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        path: MerklePath,
        proof: &CommitmentProofBytes,
        value: Vec<u8>,
    ) -> Result<(), Error>;

    /// Verify that nothing is committed at `path` under the root of `consensus_state`.
    fn verify_non_membership(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        path: MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(), Error>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyClient {
    Tendermint(TendermintClient),
}

impl AnyClient {
    pub fn from_client_type(client_type: ClientType) -> AnyClient {
        match client_type {
            ClientType::Tendermint => Self::Tendermint(TendermintClient::default()),
        }
    }
}

// ⚠️  Beware of the awful boilerplate below ⚠️
impl ClientDef for AnyClient {
    type Header = AnyHeader;
    type ClientState = AnyClientState;
    type ConsensusState = AnyConsensusState;
    type Misbehaviour = AnyMisbehaviour;

    fn status(
        &self,
        ctx: &dyn ClientReader,
        client_id: &ClientId,
        client_state: &AnyClientState,
    ) -> Result<Status, Error> {
        match (self, client_state) {
            (Self::Tendermint(client), AnyClientState::Tendermint(client_state)) => {
                client.status(ctx, client_id, client_state)
            }
        }
    }

    fn check_header_and_update_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: ClientId,
        client_state: AnyClientState,
        header: AnyHeader,
    ) -> Result<UpdatedState<AnyClientState, AnyConsensusState>, Error> {
        match (self, client_state, header) {
            (
                Self::Tendermint(client),
                AnyClientState::Tendermint(client_state),
                AnyHeader::Tendermint(header),
            ) => {
                let updated =
                    client.check_header_and_update_state(ctx, client_id, client_state, header)?;

                Ok(match updated {
                    UpdatedState::Updated {
                        client_state,
                        consensus_state,
                    } => UpdatedState::Updated {
                        client_state: client_state.into(),
                        consensus_state: consensus_state.into(),
                    },
                    UpdatedState::Duplicate => UpdatedState::Duplicate,
                    UpdatedState::Frozen { client_state } => UpdatedState::Frozen {
                        client_state: client_state.into(),
                    },
                })
            }
        }
    }

    fn check_misbehaviour_and_update_state(
        &self,
        ctx: &dyn ClientReader,
        client_id: ClientId,
        client_state: AnyClientState,
        misbehaviour: AnyMisbehaviour,
    ) -> Result<AnyClientState, Error> {
        match (self, client_state, misbehaviour) {
            (
                Self::Tendermint(client),
                AnyClientState::Tendermint(client_state),
                AnyMisbehaviour::Tendermint(misbehaviour),
            ) => client
                .check_misbehaviour_and_update_state(ctx, client_id, client_state, misbehaviour)
                .map(AnyClientState::Tendermint),
        }
    }

    fn verify_upgrade_and_update_state(
        &self,
        client_id: &ClientId,
        client_state: &AnyClientState,
        consensus_state: &AnyConsensusState,
        upgraded_client_state: AnyClientState,
        upgraded_consensus_state: AnyConsensusState,
        proof_upgrade_client: &CommitmentProofBytes,
        proof_upgrade_consensus_state: &CommitmentProofBytes,
    ) -> Result<(AnyClientState, AnyConsensusState), Error> {
        match (
            self,
            client_state,
            consensus_state,
            upgraded_client_state,
            upgraded_consensus_state,
        ) {
            (
                Self::Tendermint(client),
                AnyClientState::Tendermint(client_state),
                AnyConsensusState::Tendermint(consensus_state),
                AnyClientState::Tendermint(upgraded_client_state),
                AnyConsensusState::Tendermint(upgraded_consensus_state),
            ) => {
                let (new_client_state, new_consensus_state) = client
                    .verify_upgrade_and_update_state(
                        client_id,
                        client_state,
                        consensus_state,
                        upgraded_client_state,
                        upgraded_consensus_state,
                        proof_upgrade_client,
                        proof_upgrade_consensus_state,
                    )?;

                Ok((new_client_state.into(), new_consensus_state.into()))
            }
        }
    }

    fn verify_membership(
        &self,
        client_state: &AnyClientState,
        consensus_state: &AnyConsensusState,
        path: MerklePath,
        proof: &CommitmentProofBytes,
        value: Vec<u8>,
    ) -> Result<(), Error> {
        match (self, client_state, consensus_state) {
            (
                Self::Tendermint(client),
                AnyClientState::Tendermint(client_state),
                AnyConsensusState::Tendermint(consensus_state),
            ) => client.verify_membership(client_state, consensus_state, path, proof, value),
        }
    }

    fn verify_non_membership(
        &self,
        client_state: &AnyClientState,
        consensus_state: &AnyConsensusState,
        path: MerklePath,
        proof: &CommitmentProofBytes,
    ) -> Result<(), Error> {
        match (self, client_state, consensus_state) {
            (
                Self::Tendermint(client),
                AnyClientState::Tendermint(client_state),
                AnyConsensusState::Tendermint(consensus_state),
            ) => client.verify_non_membership(client_state, consensus_state, path, proof),
        }
    }
}
