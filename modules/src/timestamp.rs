use core::fmt::Display;
use core::num::ParseIntError;
use core::ops::{Add, Sub};
use core::str::FromStr;
use core::time::Duration;

use chrono::{offset::Utc, DateTime, TimeZone};
use flex_error::{define_error, TraceError};
use serde_derive::{Deserialize, Serialize};

pub const ZERO_DURATION: Duration = Duration::from_secs(0);

/// A newtype wrapper over `Option<DateTime<Utc>>` to keep track of
/// host block times, consensus state times and packet timeouts.
///
/// The host and the wire both represent a timestamp as a `u64` Unix
/// timestamp in nanoseconds, with 0 representing the absence of timestamp.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Default, Deserialize, Serialize, Hash)]
pub struct Timestamp {
    time: Option<DateTime<Utc>>,
}

/// The expiry result when comparing two timestamps.
/// - If either timestamp is invalid (0), the result is `InvalidTimestamp`.
/// - If the left timestamp is strictly after the right timestamp, the result is `Expired`.
/// - Otherwise, the result is `NotExpired`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Deserialize, Serialize, Hash)]
pub enum Expiry {
    Expired,
    NotExpired,
    InvalidTimestamp,
}

impl Timestamp {
    /// A value of 0 indicates that the timestamp is not set.
    pub fn from_nanoseconds(nanoseconds: u64) -> Result<Timestamp, ParseTimestampError> {
        if nanoseconds == 0 {
            return Ok(Timestamp { time: None });
        }

        // `chrono` only builds timestamps from `i64` seconds, so the `u64`
        // nanos are split into seconds + subsecond nanos first.
        let (s, ns) = util::break_in_secs_and_nanos(nanoseconds);

        match Utc.timestamp_opt(s, ns) {
            chrono::LocalResult::None => Err(ParseTimestampError::invalid_timestamp_conversion(s, ns)),
            chrono::LocalResult::Single(ts) => Ok(Timestamp { time: Some(ts) }),
            chrono::LocalResult::Ambiguous(_, _) => {
                Err(ParseTimestampError::ambiguous_timestamp_conversion(s, ns))
            }
        }
    }

    /// Builds a timestamp from the `(seconds, nanos)` pair carried by
    /// `google.protobuf.Timestamp`.
    pub fn from_proto(ts: &prost_types::Timestamp) -> Result<Timestamp, ParseTimestampError> {
        if ts.seconds < 0 || ts.nanos < 0 {
            return Err(ParseTimestampError::invalid_timestamp_conversion(
                ts.seconds,
                ts.nanos.unsigned_abs(),
            ));
        }
        let nanos = (ts.seconds as u64)
            .checked_mul(util::NANOS_PER_SEC)
            .and_then(|ns| ns.checked_add(ts.nanos as u64))
            .ok_or_else(|| {
                ParseTimestampError::invalid_timestamp_conversion(ts.seconds, ts.nanos as u32)
            })?;

        Timestamp::from_nanoseconds(nanos)
    }

    /// Returns a `Timestamp` representation of a timestamp not being set.
    pub fn none() -> Self {
        Timestamp { time: None }
    }

    pub fn is_set(&self) -> bool {
        self.time.is_some()
    }

    /// Computes the duration difference of another `Timestamp` from the current one.
    /// Returns `None` if the other `Timestamp` is more advanced
    /// than the current or if either of the `Timestamp`s is not set.
    pub fn duration_since(&self, other: &Timestamp) -> Option<Duration> {
        match (self.time, other.time) {
            (Some(time1), Some(time2)) => time1.signed_duration_since(time2).to_std().ok(),
            _ => None,
        }
    }

    pub fn from_datetime(time: DateTime<Utc>) -> Timestamp {
        Timestamp { time: Some(time) }
    }

    /// Convert a `Timestamp` to `u64` value in nanoseconds. If no timestamp
    /// is set, the result is 0.
    pub fn nanoseconds(&self) -> u64 {
        self.time.map_or(0, |time| {
            let s = u64::try_from(time.timestamp()).unwrap_or_default();
            util::assemble_in_nanos(s, time.timestamp_subsec_nanos())
        })
    }

    pub fn into_proto(self) -> Option<prost_types::Timestamp> {
        self.time.map(|time| prost_types::Timestamp {
            seconds: time.timestamp(),
            nanos: time.timestamp_subsec_nanos() as i32,
        })
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Checks whether the timestamp has expired when compared to the
    /// `other` timestamp. Returns an [`Expiry`] result.
    pub fn check_expiry(&self, other: &Timestamp) -> Expiry {
        match (self.time, other.time) {
            (Some(time1), Some(time2)) => {
                if time1 > time2 {
                    Expiry::Expired
                } else {
                    Expiry::NotExpired
                }
            }
            _ => Expiry::InvalidTimestamp,
        }
    }

    /// Checks whether the current timestamp is strictly more advanced
    /// than the `other` timestamp. Return true if so, and false
    /// otherwise.
    pub fn after(&self, other: &Timestamp) -> bool {
        match (self.time, other.time) {
            (Some(time1), Some(time2)) => time1 > time2,
            _ => false,
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Timestamp({})",
            self.time
                .map_or("NoTimestamp".to_string(), |time| time.to_rfc3339())
        )
    }
}

define_error! {
    TimestampOverflowError {
        TimestampOverflow
            |_| { "Timestamp overflow when modifying with duration" }
    }
}

impl Add<Duration> for Timestamp {
    type Output = Result<Timestamp, TimestampOverflowError>;

    fn add(self, duration: Duration) -> Result<Timestamp, TimestampOverflowError> {
        match self.as_datetime() {
            Some(datetime) => {
                let duration2 = chrono::Duration::from_std(duration)
                    .map_err(|_| TimestampOverflowError::timestamp_overflow())?;
                datetime
                    .checked_add_signed(duration2)
                    .map(Self::from_datetime)
                    .ok_or_else(TimestampOverflowError::timestamp_overflow)
            }
            None => Ok(self),
        }
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Result<Timestamp, TimestampOverflowError>;

    fn sub(self, duration: Duration) -> Result<Timestamp, TimestampOverflowError> {
        match self.as_datetime() {
            Some(datetime) => {
                let duration2 = chrono::Duration::from_std(duration)
                    .map_err(|_| TimestampOverflowError::timestamp_overflow())?;
                datetime
                    .checked_sub_signed(duration2)
                    .map(Self::from_datetime)
                    .ok_or_else(TimestampOverflowError::timestamp_overflow)
            }
            None => Ok(self),
        }
    }
}

define_error! {
    ParseTimestampError {
        ParseInt
            [ TraceError<ParseIntError> ]
            | _ | { "error parsing u64 integer from string"},

        InvalidTimestampConversion
            {
                secs: i64,
                nanos: u32,
            }
            | _ | { "error converting into Timestamp from seconds + nanoseconds" },

        AmbiguousTimestampConversion
            {
                secs: i64,
                nanos: u32,
            }
            | _ | { "ambigous conversion into Timestamp from seconds + nanoseconds" },
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nanoseconds = u64::from_str(s).map_err(ParseTimestampError::parse_int)?;

        Timestamp::from_nanoseconds(nanoseconds)
    }
}

pub mod util {
    pub(super) const NANOS_PER_SEC: u64 = 1_000_000_000;

    /// Converts `u64` nanoseconds into its constituent seconds (as `i64`)
    /// plus the remaining nanoseconds (as `u32`).
    pub(super) fn break_in_secs_and_nanos(nanoseconds: u64) -> (i64, u32) {
        // u64::MAX / NANOS_PER_SEC always fits into an i64
        let out_secs = (nanoseconds / NANOS_PER_SEC) as i64;
        let out_nanos = (nanoseconds % NANOS_PER_SEC) as u32;

        (out_secs, out_nanos)
    }

    pub(super) fn assemble_in_nanos(s: u64, subsec_ns: u32) -> u64 {
        s.saturating_mul(NANOS_PER_SEC)
            .saturating_add(subsec_ns as u64)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use test_log::test;

    use super::{Expiry, Timestamp, ZERO_DURATION};

    #[test]
    fn test_timestamp_comparisons() {
        let nil_timestamp = Timestamp::from_nanoseconds(0).unwrap();
        assert_eq!(nil_timestamp.time, None);
        assert_eq!(nil_timestamp.nanoseconds(), 0);

        let timestamp1 = Timestamp::from_nanoseconds(1).unwrap();
        assert_eq!(timestamp1.time.unwrap().timestamp(), 0);
        assert_eq!(timestamp1.nanoseconds(), 1);

        let timestamp2 = Timestamp::from_nanoseconds(1_000_000_000).unwrap();
        assert_eq!(timestamp2.time.unwrap().timestamp(), 1);
        assert_eq!(timestamp2.nanoseconds(), 1_000_000_000);

        assert!(Timestamp::from_nanoseconds(u64::MAX).is_ok());

        assert_eq!(timestamp1.check_expiry(&timestamp2), Expiry::NotExpired);
        assert_eq!(timestamp1.check_expiry(&timestamp1), Expiry::NotExpired);
        assert_eq!(timestamp2.check_expiry(&timestamp1), Expiry::Expired);
        assert_eq!(
            timestamp1.check_expiry(&nil_timestamp),
            Expiry::InvalidTimestamp
        );
        assert_eq!(
            nil_timestamp.check_expiry(&nil_timestamp),
            Expiry::InvalidTimestamp
        );
    }

    #[test]
    fn test_timestamp_arithmetic() {
        let time0 = Timestamp::none();
        let time1 = Timestamp::from_nanoseconds(100).unwrap();
        let time2 = Timestamp::from_nanoseconds(150).unwrap();
        let time3 = Timestamp::from_nanoseconds(50).unwrap();
        let duration = Duration::from_nanos(50);

        assert_eq!(time1, (time1 + ZERO_DURATION).unwrap());
        assert_eq!(time2, (time1 + duration).unwrap());
        assert_eq!(time3, (time1 - duration).unwrap());
        assert_eq!(time0, (time0 + duration).unwrap());
        assert_eq!(time0, (time0 - duration).unwrap());
    }

    #[test]
    fn proto_timestamps_round_trip_through_nanoseconds() {
        let proto = prost_types::Timestamp {
            seconds: 1_700_000_000,
            nanos: 42,
        };
        let ts = Timestamp::from_proto(&proto).unwrap();
        assert_eq!(ts.nanoseconds(), 1_700_000_000_000_000_042);
        assert_eq!(ts.into_proto(), Some(proto));

        let negative = prost_types::Timestamp {
            seconds: -1,
            nanos: 0,
        };
        assert!(Timestamp::from_proto(&negative).is_err());
    }
}
