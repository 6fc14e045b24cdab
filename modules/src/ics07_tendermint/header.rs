use ibc_precompile_proto::ibc::lightclients::tendermint::v1::Header as RawHeader;
use ibc_precompile_proto::protobuf::Protobuf;
use serde_derive::{Deserialize, Serialize};

use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::height::height_or_zero;
use crate::ics07_tendermint::error::Error;
use crate::timestamp::Timestamp;
use crate::Height;

pub const TENDERMINT_HEADER_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Header";

/// The part of a verified Tendermint header the client keeps track of.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub height: Height,
    pub timestamp: Timestamp,
    pub app_hash: Vec<u8>,
    pub next_validators_hash: Vec<u8>,
    pub block_hash: Vec<u8>,
    /// Height of the consensus state the header was verified against. Zero
    /// means the client's latest height.
    pub trusted_height: Height,
}

impl Header {
    pub fn client_type(&self) -> ClientType {
        ClientType::Tendermint
    }

    /// Whether two headers at the same height commit to different blocks.
    pub fn conflicts_with(&self, other: &Header) -> bool {
        self.height == other.height && self.block_hash != other.block_hash
    }

    /// Whether `self` is higher than `other` without being strictly later.
    pub fn breaks_time_monotonicity(&self, other: &Header) -> bool {
        self.height > other.height && !self.timestamp.after(&other.timestamp)
    }
}

impl Protobuf<RawHeader> for Header {}

impl TryFrom<RawHeader> for Header {
    type Error = Error;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        let height = raw
            .height
            .map(|h| Height::new(h.revision_number, h.revision_height))
            .ok_or_else(Error::missing_header_height)?;
        if height.is_zero() {
            return Err(Error::invalid_header_height());
        }

        let timestamp = raw
            .time
            .ok_or_else(Error::missing_timestamp)
            .and_then(|ts| Timestamp::from_proto(&ts).map_err(Error::invalid_timestamp))?;
        if !timestamp.is_set() {
            return Err(Error::missing_timestamp());
        }

        Ok(Self {
            height,
            timestamp,
            app_hash: raw.app_hash,
            next_validators_hash: raw.next_validators_hash,
            block_hash: raw.block_hash,
            trusted_height: height_or_zero(raw.trusted_height),
        })
    }
}

impl From<Header> for RawHeader {
    fn from(value: Header) -> Self {
        RawHeader {
            height: Some(value.height.into()),
            time: value.timestamp.into_proto(),
            app_hash: value.app_hash,
            next_validators_hash: value.next_validators_hash,
            block_hash: value.block_hash,
            trusted_height: Some(value.trusted_height.into()),
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
pub mod test_util {
    use super::Header;
    use crate::timestamp::Timestamp;
    use crate::Height;

    /// Unix time of the first dummy header, in nanoseconds.
    pub const GENESIS_TIME_NANOS: u64 = 1_600_000_000_000_000_000;

    /// A header whose timestamp grows by one second per revision height.
    pub fn get_dummy_tendermint_header(height: Height, trusted_height: Height) -> Header {
        let timestamp =
            Timestamp::from_nanoseconds(GENESIS_TIME_NANOS + height.revision_height * 1_000_000_000)
                .unwrap();

        Header {
            height,
            timestamp,
            app_hash: vec![height.revision_height as u8; 32],
            next_validators_hash: vec![0xAA; 32],
            block_hash: vec![height.revision_height as u8 ^ 0xFF; 32],
            trusted_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use ibc_precompile_proto::ibc::lightclients::tendermint::v1::Header as RawHeader;
    use test_log::test;

    use super::test_util::get_dummy_tendermint_header;
    use super::Header;
    use crate::ics07_tendermint::error::ErrorDetail;
    use crate::Height;

    #[test]
    fn header_requires_height_and_time() {
        let header = get_dummy_tendermint_header(Height::new(0, 5), Height::new(0, 4));
        assert_eq!(Header::try_from(RawHeader::from(header.clone())).unwrap(), header);

        let mut raw = RawHeader::from(header.clone());
        raw.height = None;
        match Header::try_from(raw) {
            Err(e) => match e.detail() {
                ErrorDetail::MissingHeaderHeight(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("header without height was accepted"),
        }

        let mut raw = RawHeader::from(header);
        raw.time = None;
        assert!(Header::try_from(raw).is_err());
    }

    #[test]
    fn conflicting_headers() {
        let h1 = get_dummy_tendermint_header(Height::new(0, 5), Height::new(0, 4));
        let mut h2 = h1.clone();
        assert!(!h1.conflicts_with(&h2));

        h2.block_hash = vec![1; 32];
        assert!(h1.conflicts_with(&h2));

        let later = get_dummy_tendermint_header(Height::new(0, 6), Height::new(0, 4));
        assert!(!later.breaks_time_monotonicity(&h1));

        let stale = Header {
            timestamp: h1.timestamp,
            ..later
        };
        assert!(stale.breaks_time_monotonicity(&h1));
    }
}
