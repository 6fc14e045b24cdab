use core::fmt::Display;

use ibc_precompile_proto::ibc::core::connection::v1::Version as RawVersion;
use ibc_precompile_proto::protobuf::Protobuf;
use serde_derive::{Deserialize, Serialize};

use crate::ics03_connection::error::Error;
use crate::ics04_channel::channel::Order;

/// Stores the identifier and the features supported by a version
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// unique version identifier
    identifier: String,
    /// list of features compatible with the specified identifier
    features: Vec<String>,
}

impl Version {
    pub fn new(identifier: impl Into<String>, features: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            features,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Checks whether or not the given feature is supported in this version
    pub fn is_supported_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Whether a channel with the given ordering may be opened over a
    /// connection that negotiated this version.
    pub fn supports_ordering(&self, ordering: Order) -> bool {
        self.is_supported_feature(ordering.as_str())
    }
}

impl Protobuf<RawVersion> for Version {}

impl TryFrom<RawVersion> for Version {
    type Error = Error;
    fn try_from(value: RawVersion) -> Result<Self, Self::Error> {
        if value.identifier.trim().is_empty() {
            return Err(Error::empty_versions());
        }
        for feature in value.features.iter() {
            if feature.trim().is_empty() {
                return Err(Error::empty_features());
            }
        }
        Ok(Version {
            identifier: value.identifier,
            features: value.features,
        })
    }
}

impl From<Version> for RawVersion {
    fn from(value: Version) -> Self {
        Self {
            identifier: value.identifier,
            features: value.features,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version {
            identifier: "1".to_string(),
            features: vec![
                Order::Ordered.as_str().to_owned(),
                Order::Unordered.as_str().to_owned(),
            ],
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Version {{ identifier: {}, features: [{}] }}",
            self.identifier,
            self.features.join(", ")
        )
    }
}

/// Returns the lists of supported versions
pub fn get_compatible_versions() -> Vec<Version> {
    vec![Version::default()]
}

/// Whether `version` is one of `supported_versions`, up to a subset of its
/// features.
pub fn is_supported_version(supported_versions: &[Version], version: &Version) -> bool {
    supported_versions.iter().any(|s| {
        s.identifier == version.identifier
            && version.features.iter().all(|f| s.is_supported_feature(f))
    })
}

/// Selects the first counterparty version that matches a locally supported
/// identifier and shares at least one feature with it. The picked version
/// carries only the shared features, in counterparty order.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, Error> {
    for c in counterparty_versions.iter() {
        let Some(s) = supported_versions
            .iter()
            .find(|s| s.identifier == c.identifier)
        else {
            continue;
        };

        let features: Vec<String> = c
            .features
            .iter()
            .filter(|f| s.is_supported_feature(f))
            .cloned()
            .collect();

        if !features.is_empty() {
            return Ok(Version::new(c.identifier.clone(), features));
        }
    }

    Err(Error::no_common_version())
}
