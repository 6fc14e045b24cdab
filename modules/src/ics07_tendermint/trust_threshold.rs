//! [`TrustThreshold`] is the fraction of the validator set's voting power a
//! light client must see sign a header before trusting it.

use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_precompile_proto::ibc::lightclients::tendermint::v1::Fraction;
use ibc_precompile_proto::protobuf::Protobuf;
use serde_derive::{Deserialize, Serialize};

use crate::ics07_tendermint::error::Error;

/// A trust threshold expressed as `numerator / denominator`.
///
/// The zero fraction (0/0) is representable: it is what an upgraded client
/// state carries once its chain-chosen fields have been cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustThreshold {
    numerator: u64,
    denominator: u64,
}

impl TrustThreshold {
    pub const ONE_THIRD: Self = Self {
        numerator: 1,
        denominator: 3,
    };

    pub const TWO_THIRDS: Self = Self {
        numerator: 2,
        denominator: 3,
    };

    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 0,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, Error> {
        if numerator > denominator || (denominator == 0 && numerator != 0) {
            return Err(Error::invalid_trust_threshold(numerator, denominator));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Whether the fraction lies within `[1/3, 1]`, the range a live
    /// Tendermint client accepts.
    pub fn is_valid_for_verification(&self) -> bool {
        if self.denominator == 0 {
            return false;
        }
        let num = u128::from(self.numerator);
        let den = u128::from(self.denominator);

        num * 3 >= den && num <= den
    }
}

impl Protobuf<Fraction> for TrustThreshold {}

impl From<TrustThreshold> for Fraction {
    fn from(t: TrustThreshold) -> Self {
        Self {
            numerator: t.numerator,
            denominator: t.denominator,
        }
    }
}

impl TryFrom<Fraction> for TrustThreshold {
    type Error = Error;

    fn try_from(value: Fraction) -> Result<Self, Self::Error> {
        Self::new(value.numerator, value.denominator)
    }
}

impl Default for TrustThreshold {
    fn default() -> Self {
        Self::ONE_THIRD
    }
}

impl Display for TrustThreshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
