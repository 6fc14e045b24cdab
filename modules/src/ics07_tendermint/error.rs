use flex_error::define_error;

use crate::ics24_host::error::ValidationError;
use crate::timestamp::ParseTimestampError;

define_error! {
    #[derive(Debug)]
    Error {
        InvalidChainId
            | _ | { "chain id cannot be empty" },

        InvalidTrustThreshold
            { numerator: u64, denominator: u64 }
            | e | {
                format_args!("trust threshold {0}/{1} must be within [1/3, 1]",
                    e.numerator, e.denominator)
            },

        InvalidTrustingPeriod
            { reason: String }
            | e | { format_args!("invalid trusting period: {}", e.reason) },

        InvalidUnbondingPeriod
            { reason: String }
            | e | { format_args!("invalid unbonding period: {}", e.reason) },

        NegativeDuration
            { field: String }
            | e | { format_args!("{} must not be negative", e.field) },

        MissingTrustingPeriod
            | _ | { "missing trusting period" },

        MissingUnbondingPeriod
            | _ | { "missing unbonding period" },

        MissingMaxClockDrift
            | _ | { "missing max clock drift" },

        MissingTrustLevel
            | _ | { "missing trust level" },

        MissingLatestHeight
            | _ | { "missing latest height" },

        InvalidLatestHeight
            | _ | { "latest height cannot be zero" },

        FrozenAtCreation
            | _ | { "client cannot be frozen at creation time" },

        EmptyProofSpecs
            | _ | { "proof specs cannot be empty" },

        MissingRawHeader
            | _ | { "missing raw header" },

        MissingHeaderHeight
            | _ | { "missing header height" },

        InvalidHeaderHeight
            | _ | { "header height cannot be zero" },

        MissingTimestamp
            | _ | { "missing timestamp" },

        InvalidTimestamp
            [ ParseTimestampError ]
            | _ | { "invalid timestamp" },

        MissingRoot
            | _ | { "missing commitment root" },

        InvalidRawMisbehaviour
            [ ValidationError ]
            | _ | { "invalid misbehaviour client id" },
    }
}
