use core::fmt;
use core::time::Duration;

use ibc_precompile_proto::ibc::core::commitment::v1::MerklePrefix;
use ibc_precompile_proto::ibc::core::connection::v1::{
    ConnectionEnd as RawConnectionEnd, Counterparty as RawCounterparty, State as RawState,
};
use ibc_precompile_proto::protobuf::Protobuf;
use serde_derive::{Deserialize, Serialize};

use crate::ics03_connection::error::Error;
use crate::ics03_connection::version::Version;
use crate::ics23_commitment::commitment::CommitmentPrefix;
use crate::ics24_host::identifier::{ClientId, ConnectionId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionEnd {
    pub state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
    delay_period: Duration,
}

impl Protobuf<RawConnectionEnd> for ConnectionEnd {}

impl TryFrom<RawConnectionEnd> for ConnectionEnd {
    type Error = Error;

    fn try_from(value: RawConnectionEnd) -> Result<Self, Self::Error> {
        let state = State::from_i32(value.state)?;

        if value.client_id.is_empty() {
            return Err(Error::empty_proto_connection_end());
        }

        Ok(Self::new(
            state,
            value.client_id.parse().map_err(Error::invalid_identifier)?,
            value
                .counterparty
                .ok_or_else(Error::missing_counterparty)?
                .try_into()?,
            value
                .versions
                .into_iter()
                .map(Version::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            Duration::from_nanos(value.delay_period),
        ))
    }
}

impl From<ConnectionEnd> for RawConnectionEnd {
    fn from(value: ConnectionEnd) -> Self {
        RawConnectionEnd {
            client_id: value.client_id.to_string(),
            versions: value.versions.into_iter().map(Into::into).collect(),
            state: value.state as i32,
            counterparty: Some(value.counterparty.into()),
            delay_period: value.delay_period.as_nanos() as u64,
        }
    }
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
        delay_period: Duration,
    ) -> Self {
        Self {
            state,
            client_id,
            counterparty,
            versions,
            delay_period,
        }
    }

    /// Getter for the state of this connection end.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Setter for the `state` field.
    pub fn set_state(&mut self, new_state: State) {
        self.state = new_state;
    }

    /// Setter for the `counterparty` field.
    pub fn set_counterparty(&mut self, new_cparty: Counterparty) {
        self.counterparty = new_cparty;
    }

    /// Setter for the `version` field.
    pub fn set_version(&mut self, new_version: Version) {
        self.versions = vec![new_version];
    }

    /// Helper function to compare the counterparty of this end with another counterparty.
    pub fn counterparty_matches(&self, other: &Counterparty) -> bool {
        self.counterparty.eq(other)
    }

    /// Helper function to compare the client id of this end with another client identifier.
    pub fn client_id_matches(&self, other: &ClientId) -> bool {
        self.client_id.eq(other)
    }

    /// Helper function to determine whether the connection is open.
    pub fn is_open(&self) -> bool {
        self.state_matches(&State::Open)
    }

    /// Helper function to compare the state of this end with another state.
    pub fn state_matches(&self, other: &State) -> bool {
        self.state.eq(other)
    }

    /// Getter for the client id on the local party of this connection end.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Getter for the list of versions in this connection end.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Getter for the counterparty.
    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    /// Getter for the delay_period field. This represents the duration, at minimum,
    /// to delay the sending of a packet after the client update for that packet has been submitted.
    pub fn delay_period(&self) -> Duration {
        self.delay_period
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counterparty {
    client_id: ClientId,
    pub connection_id: Option<ConnectionId>,
    prefix: CommitmentPrefix,
}

impl Protobuf<RawCounterparty> for Counterparty {}

// Converts from the wire format RawCounterparty. Typically used from the relayer side
// during queries for response validation and to extract the Counterparty structure.
impl TryFrom<RawCounterparty> for Counterparty {
    type Error = Error;

    fn try_from(value: RawCounterparty) -> Result<Self, Self::Error> {
        let connection_id = Some(value.connection_id)
            .filter(|x| !x.is_empty())
            .map(|v| v.parse().map_err(Error::invalid_identifier))
            .transpose()?;
        Ok(Counterparty::new(
            value.client_id.parse().map_err(Error::invalid_identifier)?,
            connection_id,
            value
                .prefix
                .ok_or_else(Error::missing_counterparty_prefix)?
                .key_prefix
                .into(),
        ))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(value: Counterparty) -> Self {
        RawCounterparty {
            client_id: value.client_id.as_str().to_string(),
            connection_id: value
                .connection_id
                .map_or_else(|| "".to_string(), |v| v.as_str().to_string()),
            prefix: Some(MerklePrefix {
                key_prefix: value.prefix.into_vec(),
            }),
        }
    }
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    /// Getter for the client id.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Getter for connection id.
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    Uninitialized = 0isize,
    Init = 1isize,
    TryOpen = 2isize,
    Open = 3isize,
}

impl State {
    /// Yields the State as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }

    /// Parses the State out from a i32.
    pub fn from_i32(s: i32) -> Result<Self, Error> {
        match RawState::try_from(s) {
            Ok(RawState::UninitializedUnspecified) => Ok(Self::Uninitialized),
            Ok(RawState::Init) => Ok(Self::Init),
            Ok(RawState::Tryopen) => Ok(Self::TryOpen),
            Ok(RawState::Open) => Ok(Self::Open),
            Err(_) => Err(Error::invalid_state(s)),
        }
    }

    /// Returns whether or not this connection state is `Open`.
    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns whether or not this connection with this state
    /// has progressed less or the same than the argument.
    ///
    /// # Example
    /// ```rust,ignore
    /// assert!(State::Init.less_or_equal_progress(State::Open));
    /// assert!(State::TryOpen.less_or_equal_progress(State::TryOpen));
    /// assert!(!State::Open.less_or_equal_progress(State::Uninitialized));
    /// ```
    pub fn less_or_equal_progress(self, other: Self) -> bool {
        self as u32 <= other as u32
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(any(test, feature = "mocks"))]
pub mod test_util {
    use core::str::FromStr;
    use core::time::Duration;

    use super::{ConnectionEnd, Counterparty, State};
    use crate::ics03_connection::version::get_compatible_versions;
    use crate::ics24_host::identifier::{ClientId, ConnectionId};

    /// A connection end on client `07-tendermint-0` whose counterparty is
    /// `connection-7` on client `07-tendermint-3`, under the `ibc` prefix.
    pub fn get_dummy_connection_end(state: State) -> ConnectionEnd {
        ConnectionEnd::new(
            state,
            ClientId::from_str("07-tendermint-0").unwrap(),
            Counterparty::new(
                ClientId::from_str("07-tendermint-3").unwrap(),
                Some(ConnectionId::new(7)),
                b"ibc".to_vec().into(),
            ),
            get_compatible_versions(),
            Duration::from_secs(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;
    use core::time::Duration;

    use ibc_precompile_proto::ibc::core::connection::v1::ConnectionEnd as RawConnectionEnd;
    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use super::{ConnectionEnd, Counterparty, State};
    use crate::ics03_connection::version::get_compatible_versions;
    use crate::ics24_host::identifier::{ClientId, ConnectionId};

    fn dummy_connection_end() -> ConnectionEnd {
        ConnectionEnd::new(
            State::TryOpen,
            ClientId::from_str("07-tendermint-0").unwrap(),
            Counterparty::new(
                ClientId::from_str("07-tendermint-3").unwrap(),
                Some(ConnectionId::new(7)),
                b"ibc".to_vec().into(),
            ),
            get_compatible_versions(),
            Duration::from_secs(10),
        )
    }

    #[test]
    fn connection_end_round_trips_through_protobuf() {
        let end = dummy_connection_end();
        let bytes = end.encode_vec().unwrap();
        assert_eq!(ConnectionEnd::decode_vec(&bytes).unwrap(), end);
    }

    #[test]
    fn connection_end_rejects_bad_raw_values() {
        struct Test {
            name: String,
            raw: RawConnectionEnd,
            want_pass: bool,
        }

        let default_raw = RawConnectionEnd::from(dummy_connection_end());

        let tests: Vec<Test> = vec![
            Test {
                name: "Good parameters".to_string(),
                raw: default_raw.clone(),
                want_pass: true,
            },
            Test {
                name: "Unknown state".to_string(),
                raw: RawConnectionEnd {
                    state: 9,
                    ..default_raw.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Bad client id".to_string(),
                raw: RawConnectionEnd {
                    client_id: "x".to_string(),
                    ..default_raw.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Missing counterparty".to_string(),
                raw: RawConnectionEnd {
                    counterparty: None,
                    ..default_raw
                },
                want_pass: false,
            },
        ]
        .into_iter()
        .collect();

        for test in tests {
            let p = ConnectionEnd::try_from(test.raw.clone());

            assert_eq!(
                test.want_pass,
                p.is_ok(),
                "ConnectionEnd::try_from() failed for test {}, \nmsg{:?} with error {:?}",
                test.name,
                test.raw,
                p.err(),
            );
        }
    }

    #[test]
    fn state_progress_is_ordered() {
        assert!(State::Init.less_or_equal_progress(State::Open));
        assert!(State::TryOpen.less_or_equal_progress(State::TryOpen));
        assert!(!State::Open.less_or_equal_progress(State::Uninitialized));
        assert_eq!(State::TryOpen.to_string(), "TRYOPEN");
    }
}
