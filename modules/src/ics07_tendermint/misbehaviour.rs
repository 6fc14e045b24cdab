use ibc_precompile_proto::ibc::lightclients::tendermint::v1::Misbehaviour as RawMisbehaviour;
use ibc_precompile_proto::protobuf::Protobuf;
use serde_derive::{Deserialize, Serialize};

use crate::ics07_tendermint::error::Error;
use crate::ics07_tendermint::header::Header;
use crate::ics24_host::identifier::ClientId;
use crate::Height;

pub const TENDERMINT_MISBEHAVIOR_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Misbehaviour";

/// Two headers that cannot both have been produced by an honest chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misbehaviour {
    pub client_id: ClientId,
    pub header1: Header,
    pub header2: Header,
}

impl Misbehaviour {
    pub fn height(&self) -> Height {
        self.header1.height.max(self.header2.height)
    }

    /// Either the headers commit to different blocks at one height, or the
    /// higher one is not strictly later than the lower one.
    pub fn is_fault(&self) -> bool {
        self.header1.conflicts_with(&self.header2)
            || self.header1.breaks_time_monotonicity(&self.header2)
            || self.header2.breaks_time_monotonicity(&self.header1)
    }
}

impl Protobuf<RawMisbehaviour> for Misbehaviour {}

impl TryFrom<RawMisbehaviour> for Misbehaviour {
    type Error = Error;

    fn try_from(raw: RawMisbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id.parse().map_err(Error::invalid_raw_misbehaviour)?,
            header1: raw.header_1.ok_or_else(Error::missing_raw_header)?.try_into()?,
            header2: raw.header_2.ok_or_else(Error::missing_raw_header)?.try_into()?,
        })
    }
}

impl From<Misbehaviour> for RawMisbehaviour {
    fn from(value: Misbehaviour) -> Self {
        RawMisbehaviour {
            client_id: value.client_id.to_string(),
            header_1: Some(value.header1.into()),
            header_2: Some(value.header2.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::Misbehaviour;
    use crate::ics07_tendermint::header::test_util::get_dummy_tendermint_header;
    use crate::ics07_tendermint::header::Header;
    use crate::ics24_host::identifier::ClientId;
    use crate::Height;

    #[test]
    fn detects_faults() {
        let client_id: ClientId = "07-tendermint-0".parse().unwrap();
        let h1 = get_dummy_tendermint_header(Height::new(0, 5), Height::new(0, 4));
        let h2 = get_dummy_tendermint_header(Height::new(0, 6), Height::new(0, 4));

        let honest = Misbehaviour {
            client_id: client_id.clone(),
            header1: h2.clone(),
            header2: h1.clone(),
        };
        assert!(!honest.is_fault());
        assert_eq!(honest.height(), Height::new(0, 6));

        let fork = Misbehaviour {
            client_id: client_id.clone(),
            header1: h1.clone(),
            header2: Header {
                block_hash: vec![0; 32],
                ..h1.clone()
            },
        };
        assert!(fork.is_fault());

        let time_violation = Misbehaviour {
            client_id,
            header1: Header {
                timestamp: h1.timestamp,
                ..h2
            },
            header2: h1,
        };
        assert!(time_violation.is_fault());
    }
}
