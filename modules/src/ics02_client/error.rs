use core::time::Duration;

use flex_error::define_error;
use ibc_precompile_proto::protobuf::Error as ProtoError;

use crate::ics02_client::client_state::Status;
use crate::ics07_tendermint::error::Error as Ics07Error;
use crate::ics23_commitment::error::Error as Ics23Error;
use crate::ics24_host::error::ValidationError;
use crate::ics24_host::identifier::ClientId;
use crate::store::Error as StoreError;
use crate::timestamp::{Timestamp, TimestampOverflowError};
use crate::Height;

define_error! {
    #[derive(Debug)]
    Error {
        UnknownClientType
            { client_type: String }
            | e | { format_args!("unknown client type: {0}", e.client_type) },

        WrongClientType
            { client_type: String }
            | e | {
                format_args!("client type {0} is not supported, only tendermint clients can be created",
                    e.client_type)
            },

        ClientIdentifierConstructor
            { client_type: String, counter: u64 }
            [ ValidationError ]
            | e | {
                format_args!("Client identifier constructor failed for type {0} with counter {1}",
                    e.client_type, e.counter)
            },

        ClientNotFound
            { client_id: ClientId }
            | e | { format_args!("client not found: {0}", e.client_id) },

        ClientNotActive
            { client_id: ClientId, status: Status }
            | e | {
                format_args!("client {0} is not active, status: {1}",
                    e.client_id, e.status)
            },

        ConsensusStateNotFound
            { client_id: ClientId, height: Height }
            | e | {
                format_args!("consensus state not found at: {0} at height {1}",
                    e.client_id, e.height)
            },

        ProcessedTimeNotFound
            { client_id: ClientId, height: Height }
            | e | {
                format_args!("processed time not found for client {0} at height {1}",
                    e.client_id, e.height)
            },

        ProcessedHeightNotFound
            { client_id: ClientId, height: Height }
            | e | {
                format_args!("processed height not found for client {0} at height {1}",
                    e.client_id, e.height)
            },

        InvalidClientState
            { reason: String }
            | e | { format_args!("invalid client state: {0}", e.reason) },

        UnknownClientStateType
            { client_state_type: String }
            | e | { format_args!("unknown client state type: {0}", e.client_state_type) },

        UnknownConsensusStateType
            { consensus_state_type: String }
            | e | {
                format_args!("unknown client consensus state type: {0}",
                    e.consensus_state_type)
            },

        UnknownHeaderType
            { header_type: String }
            | e | { format_args!("unknown header type: {0}", e.header_type) },

        UnknownMisbehaviourType
            { misbehaviour_type: String }
            | e | { format_args!("unknown misbehaviour type: {0}", e.misbehaviour_type) },

        DecodeRawClientState
            [ ProtoError ]
            | _ | { "error decoding raw client state" },

        DecodeRawConsensusState
            [ ProtoError ]
            | _ | { "error decoding raw consensus state" },

        DecodeRawHeader
            [ ProtoError ]
            | _ | { "error decoding raw header" },

        DecodeRawMisbehaviour
            [ ProtoError ]
            | _ | { "error decoding raw misbehaviour" },

        Tendermint
            [ Ics07Error ]
            | _ | { "tendermint error" },

        InvalidHeightResult
            | _ | { "height cannot end up zero or negative" },

        InvalidHeightString
            { height: String }
            | e | { format_args!("cannot convert into a `Height` type from string {0}", e.height) },

        ProofHeightTooHigh
            { proof_height: Height, latest_height: Height }
            | e | {
                format_args!("client state height < proof height ({0} < {1}), please ensure the client has been updated",
                    e.latest_height, e.proof_height)
            },

        DelayPeriodNotPassed
            { current_time: Timestamp, earliest_time: Timestamp, current_height: Height, earliest_height: Height }
            | e | {
                format_args!("delay period has not passed: current time {0} (earliest {1}), current height {2} (earliest {3})",
                    e.current_time, e.earliest_time, e.current_height, e.earliest_height)
            },

        InvalidUpgradePath
            { client_id: ClientId }
            | e | {
                format_args!("client {0} has no upgrade path, cannot be upgraded",
                    e.client_id)
            },

        LowUpgradeHeight
            { upgraded_height: Height, client_height: Height }
            | e | {
                format_args!("upgraded client height {0} must be at greater than current client height {1}",
                    e.upgraded_height, e.client_height)
            },

        MisbehaviourNotDetected
            { client_id: ClientId }
            | e | {
                format_args!("misbehaviour submitted for client {0} does not prove any fault",
                    e.client_id)
            },

        ProofVerificationFailed
            [ Ics23Error ]
            | _ | { "commitment proof verification failed" },

        TimestampOverflow
            [ TimestampOverflowError ]
            | _ | { "timestamp overflow" },

        MaxExpectedTimePerBlockOverflow
            { delay_period: Duration }
            | e | {
                format_args!("cannot compute block delay for delay period {0:?}",
                    e.delay_period)
            },

        Store
            [ StoreError ]
            | _ | { "store error" },
    }
}
