use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use super::error::Error;

/// Type of the client, depending on the specific consensus algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientType {
    Tendermint,
}

impl ClientType {
    const TENDERMINT_STR: &'static str = "07-tendermint";

    /// Yields the identifier of this client type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tendermint => Self::TENDERMINT_STR,
        }
    }
}

impl Display for ClientType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "ClientType({})", self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = Error;

    /// Both the ICS name (`07-tendermint`) and the bare consensus name
    /// (`tendermint`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::TENDERMINT_STR | "tendermint" => Ok(Self::Tendermint),
            _ => Err(Error::unknown_client_type(s.to_string())),
        }
    }
}
