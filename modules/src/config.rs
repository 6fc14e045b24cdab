//! Host-side constants of the IBC state machine.

use core::time::Duration;

use serde_derive::{Deserialize, Serialize};

use crate::ics03_connection::version::Version;
use crate::ics23_commitment::commitment::CommitmentPrefix;

/// Default key prefix under which the IBC store is committed.
pub const DEFAULT_COMMITMENT_PREFIX: &str = "ibc";

/// Default upper bound on the block time of this chain, used to turn a
/// connection delay period into a number of blocks.
pub const DEFAULT_MAX_EXPECTED_TIME_PER_BLOCK: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IbcConfig {
    pub commitment_prefix: String,
    #[serde(with = "duration_secs")]
    pub max_expected_time_per_block: Duration,
    pub compatible_versions: Vec<Version>,
}

impl Default for IbcConfig {
    fn default() -> Self {
        Self {
            commitment_prefix: DEFAULT_COMMITMENT_PREFIX.to_string(),
            max_expected_time_per_block: DEFAULT_MAX_EXPECTED_TIME_PER_BLOCK,
            compatible_versions: crate::ics03_connection::version::get_compatible_versions(),
        }
    }
}

impl IbcConfig {
    pub fn commitment_prefix(&self) -> CommitmentPrefix {
        CommitmentPrefix::from(self.commitment_prefix.as_bytes().to_vec())
    }
}

mod duration_secs {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: IbcConfig =
            serde_json::from_str(r#"{ "max_expected_time_per_block": 6 }"#).unwrap();

        assert_eq!(config.commitment_prefix, DEFAULT_COMMITMENT_PREFIX);
        assert_eq!(config.max_expected_time_per_block, Duration::from_secs(6));
        assert_eq!(
            config.compatible_versions,
            IbcConfig::default().compatible_versions
        );
        assert_eq!(config.commitment_prefix().as_bytes(), b"ibc");
    }
}
