use core::time::Duration;

use ibc_precompile_proto::ibc::lightclients::tendermint::v1::ClientState as RawClientState;
use ibc_precompile_proto::protobuf::Protobuf;

use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::height::height_or_zero;
use crate::ics07_tendermint::error::Error;
use crate::ics07_tendermint::header::Header;
use crate::ics07_tendermint::trust_threshold::TrustThreshold;
use crate::ics23_commitment::specs::ProofSpecs;
use crate::timestamp::{Timestamp, ZERO_DURATION};
use crate::Height;

pub const TENDERMINT_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.ClientState";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientState {
    pub chain_id: String,
    pub trust_level: TrustThreshold,
    pub trusting_period: Duration,
    pub unbonding_period: Duration,
    pub max_clock_drift: Duration,
    pub latest_height: Height,
    /// Zero while the client is not frozen.
    pub frozen_height: Height,
    pub proof_specs: ProofSpecs,
    pub upgrade_path: Vec<String>,
    pub allow_update_after_expiry: bool,
    pub allow_update_after_misbehaviour: bool,
}

impl ClientState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: String,
        trust_level: TrustThreshold,
        trusting_period: Duration,
        unbonding_period: Duration,
        max_clock_drift: Duration,
        latest_height: Height,
        proof_specs: ProofSpecs,
        upgrade_path: Vec<String>,
    ) -> Result<ClientState, Error> {
        let client_state = Self {
            chain_id,
            trust_level,
            trusting_period,
            unbonding_period,
            max_clock_drift,
            latest_height,
            frozen_height: Height::zero(),
            proof_specs,
            upgrade_path,
            allow_update_after_expiry: false,
            allow_update_after_misbehaviour: false,
        };
        client_state.validate()?;

        Ok(client_state)
    }

    /// Checks the parameters a client must satisfy to be created.
    ///
    /// Decoding is more lenient than this, since the client state committed
    /// for an upgrade has its chain-chosen parameters zeroed.
    pub fn validate(&self) -> Result<(), Error> {
        if self.chain_id.trim().is_empty() {
            return Err(Error::invalid_chain_id());
        }

        if !self.trust_level.is_valid_for_verification() {
            return Err(Error::invalid_trust_threshold(
                self.trust_level.numerator(),
                self.trust_level.denominator(),
            ));
        }

        if self.trusting_period == ZERO_DURATION {
            return Err(Error::invalid_trusting_period(
                "ClientState trusting period must be greater than zero".to_string(),
            ));
        }

        if self.unbonding_period == ZERO_DURATION {
            return Err(Error::invalid_unbonding_period(
                "ClientState unbonding period must be greater than zero".to_string(),
            ));
        }

        if self.trusting_period >= self.unbonding_period {
            return Err(Error::invalid_trusting_period(format!(
                "ClientState trusting period ({:?}) must be smaller than unbonding period ({:?})",
                self.trusting_period, self.unbonding_period,
            )));
        }

        if self.latest_height.is_zero() {
            return Err(Error::invalid_latest_height());
        }

        if !self.frozen_height.is_zero() {
            return Err(Error::frozen_at_creation());
        }

        if self.proof_specs.is_empty() {
            return Err(Error::empty_proof_specs());
        }

        Ok(())
    }

    pub fn client_type(&self) -> ClientType {
        ClientType::Tendermint
    }

    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    pub fn frozen_height(&self) -> Option<Height> {
        if self.frozen_height.is_zero() {
            None
        } else {
            Some(self.frozen_height)
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_height().is_some()
    }

    /// Whether a consensus state recorded at `consensus_time` is outside the
    /// trusting period at `now`.
    pub fn expired(&self, consensus_time: Timestamp, now: Timestamp) -> bool {
        match now.duration_since(&consensus_time) {
            Some(elapsed) => elapsed >= self.trusting_period,
            None => false,
        }
    }

    /// Advances the latest height if the header goes beyond it.
    pub fn with_header(self, header: &Header) -> Self {
        ClientState {
            latest_height: self.latest_height.max(header.height),
            ..self
        }
    }

    pub fn with_frozen_height(self, h: Height) -> Self {
        Self {
            frozen_height: h,
            ..self
        }
    }

    /// Clears every field the counterparty chain may choose freely, keeping
    /// only what the whole network must agree on.
    pub fn zero_custom_fields(&self) -> Self {
        Self {
            chain_id: self.chain_id.clone(),
            trust_level: TrustThreshold::ZERO,
            trusting_period: ZERO_DURATION,
            unbonding_period: self.unbonding_period,
            max_clock_drift: ZERO_DURATION,
            latest_height: self.latest_height,
            frozen_height: Height::zero(),
            proof_specs: self.proof_specs.clone(),
            upgrade_path: self.upgrade_path.clone(),
            allow_update_after_expiry: false,
            allow_update_after_misbehaviour: false,
        }
    }

    /// The client state that replaces `self` after an upgrade: the chain-wide
    /// fields come from `upgraded`, the custom ones are kept from `self`.
    pub fn upgrade(&self, upgraded: ClientState) -> Self {
        Self {
            chain_id: upgraded.chain_id,
            trust_level: self.trust_level,
            trusting_period: self.trusting_period,
            unbonding_period: upgraded.unbonding_period,
            max_clock_drift: self.max_clock_drift,
            latest_height: upgraded.latest_height,
            frozen_height: Height::zero(),
            proof_specs: upgraded.proof_specs,
            upgrade_path: upgraded.upgrade_path,
            allow_update_after_expiry: self.allow_update_after_expiry,
            allow_update_after_misbehaviour: self.allow_update_after_misbehaviour,
        }
    }
}

impl Protobuf<RawClientState> for ClientState {}

impl TryFrom<RawClientState> for ClientState {
    type Error = Error;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        let trust_level = raw.trust_level.ok_or_else(Error::missing_trust_level)?;

        Ok(Self {
            chain_id: raw.chain_id,
            trust_level: TrustThreshold::try_from(trust_level)?,
            trusting_period: raw
                .trusting_period
                .ok_or_else(Error::missing_trusting_period)
                .and_then(|d| duration_from_proto(d, "trusting period"))?,
            unbonding_period: raw
                .unbonding_period
                .ok_or_else(Error::missing_unbonding_period)
                .and_then(|d| duration_from_proto(d, "unbonding period"))?,
            max_clock_drift: raw
                .max_clock_drift
                .ok_or_else(Error::missing_max_clock_drift)
                .and_then(|d| duration_from_proto(d, "max clock drift"))?,
            latest_height: raw
                .latest_height
                .map(|h| Height::new(h.revision_number, h.revision_height))
                .ok_or_else(Error::missing_latest_height)?,
            frozen_height: height_or_zero(raw.frozen_height),
            proof_specs: raw.proof_specs.into(),
            upgrade_path: raw.upgrade_path,
            allow_update_after_expiry: raw.allow_update_after_expiry,
            allow_update_after_misbehaviour: raw.allow_update_after_misbehaviour,
        })
    }
}

impl From<ClientState> for RawClientState {
    fn from(value: ClientState) -> Self {
        RawClientState {
            chain_id: value.chain_id,
            trust_level: Some(value.trust_level.into()),
            trusting_period: Some(duration_into_proto(value.trusting_period)),
            unbonding_period: Some(duration_into_proto(value.unbonding_period)),
            max_clock_drift: Some(duration_into_proto(value.max_clock_drift)),
            frozen_height: Some(value.frozen_height.into()),
            latest_height: Some(value.latest_height.into()),
            proof_specs: value.proof_specs.into(),
            upgrade_path: value.upgrade_path,
            allow_update_after_expiry: value.allow_update_after_expiry,
            allow_update_after_misbehaviour: value.allow_update_after_misbehaviour,
        }
    }
}

fn duration_from_proto(d: prost_types::Duration, field: &str) -> Result<Duration, Error> {
    if d.seconds < 0 || d.nanos < 0 {
        return Err(Error::negative_duration(field.to_string()));
    }

    Ok(Duration::new(d.seconds as u64, d.nanos as u32))
}

fn duration_into_proto(d: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: d.as_secs() as i64,
        nanos: d.subsec_nanos() as i32,
    }
}

#[cfg(any(test, feature = "mocks"))]
pub mod test_util {
    use core::time::Duration;

    use super::ClientState;
    use crate::ics02_client::client_state::AnyClientState;
    use crate::ics07_tendermint::trust_threshold::TrustThreshold;
    use crate::test_utils::proof_specs;
    use crate::Height;

    pub const DEFAULT_TRUSTING_PERIOD: Duration = Duration::from_secs(64000);

    pub fn get_dummy_raw_tm_client_state(latest_height: Height) -> ClientState {
        ClientState {
            chain_id: "ibc-1".to_string(),
            trust_level: TrustThreshold::ONE_THIRD,
            trusting_period: DEFAULT_TRUSTING_PERIOD,
            unbonding_period: Duration::from_secs(128000),
            max_clock_drift: Duration::from_millis(3000),
            latest_height,
            frozen_height: Height::zero(),
            proof_specs: proof_specs(),
            upgrade_path: vec!["upgrade".to_string(), "upgradedIBCState".to_string()],
            allow_update_after_expiry: false,
            allow_update_after_misbehaviour: false,
        }
    }

    pub fn get_dummy_tendermint_client_state(latest_height: Height) -> AnyClientState {
        get_dummy_raw_tm_client_state(latest_height).into()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use ibc_precompile_proto::protobuf::Protobuf;
    use test_log::test;

    use super::test_util::get_dummy_raw_tm_client_state;
    use super::ClientState;
    use crate::ics07_tendermint::error::ErrorDetail;
    use crate::ics07_tendermint::trust_threshold::TrustThreshold;
    use crate::ics23_commitment::specs::ProofSpecs;
    use crate::timestamp::{Timestamp, ZERO_DURATION};
    use crate::Height;

    #[test]
    fn client_state_validation() {
        struct Test {
            name: String,
            params: ClientState,
            want_pass: bool,
        }

        let default = get_dummy_raw_tm_client_state(Height::new(0, 10));

        let tests: Vec<Test> = vec![
            Test {
                name: "Valid parameters".to_string(),
                params: default.clone(),
                want_pass: true,
            },
            Test {
                name: "Invalid (empty) chain id".to_string(),
                params: ClientState {
                    chain_id: " ".to_string(),
                    ..default.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Invalid (too small) trust level".to_string(),
                params: ClientState {
                    trust_level: TrustThreshold::new(1, 4).unwrap(),
                    ..default.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Invalid (zero) trusting period".to_string(),
                params: ClientState {
                    trusting_period: ZERO_DURATION,
                    ..default.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Invalid trusting period (larger than unbonding period)".to_string(),
                params: ClientState {
                    trusting_period: Duration::from_secs(200000),
                    ..default.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Invalid (zero) latest height".to_string(),
                params: ClientState {
                    latest_height: Height::zero(),
                    ..default.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Invalid (frozen) client".to_string(),
                params: ClientState {
                    frozen_height: Height::new(0, 1),
                    ..default.clone()
                },
                want_pass: false,
            },
            Test {
                name: "Invalid (empty) proof specs".to_string(),
                params: ClientState {
                    proof_specs: ProofSpecs::from(vec![]),
                    ..default
                },
                want_pass: false,
            },
        ];

        for test in tests {
            let res = test.params.validate();

            assert_eq!(
                test.want_pass,
                res.is_ok(),
                "ClientState::validate() failed for test {}, \nmsg{:?} with error {:?}",
                test.name,
                test.params,
                res.err(),
            );
        }
    }

    #[test]
    fn zeroed_client_state_still_decodes() {
        let client_state = get_dummy_raw_tm_client_state(Height::new(1, 20));
        let zeroed = client_state.zero_custom_fields();

        let decoded = ClientState::decode_vec(&zeroed.encode_vec().unwrap()).unwrap();
        assert_eq!(decoded, zeroed);
        assert_eq!(decoded.trust_level, TrustThreshold::ZERO);
        assert!(decoded.validate().is_err());
    }

    #[test]
    fn upgrade_keeps_custom_fields() {
        let current = ClientState {
            allow_update_after_expiry: true,
            ..get_dummy_raw_tm_client_state(Height::new(0, 10))
        };
        let upgraded = ClientState {
            chain_id: "ibc-2".to_string(),
            unbonding_period: Duration::from_secs(256000),
            ..get_dummy_raw_tm_client_state(Height::new(1, 1))
        }
        .zero_custom_fields();

        let new_state = current.upgrade(upgraded);
        assert_eq!(new_state.chain_id, "ibc-2");
        assert_eq!(new_state.latest_height, Height::new(1, 1));
        assert_eq!(new_state.unbonding_period, Duration::from_secs(256000));
        assert_eq!(new_state.trusting_period, current.trusting_period);
        assert_eq!(new_state.trust_level, current.trust_level);
        assert!(new_state.allow_update_after_expiry);
        assert!(new_state.validate().is_ok());
    }

    #[test]
    fn expiry_is_relative_to_trusting_period() {
        let client_state = get_dummy_raw_tm_client_state(Height::new(0, 10));
        let consensus_time = Timestamp::from_nanoseconds(1_000_000_000_000).unwrap();

        let within = (consensus_time + Duration::from_secs(100)).unwrap();
        assert!(!client_state.expired(consensus_time, within));

        let beyond = (consensus_time + client_state.trusting_period).unwrap();
        assert!(client_state.expired(consensus_time, beyond));
    }

    #[test]
    fn negative_durations_are_rejected() {
        let mut raw = ibc_precompile_proto::ibc::lightclients::tendermint::v1::ClientState::from(
            get_dummy_raw_tm_client_state(Height::new(0, 10)),
        );
        raw.trusting_period = Some(prost_types::Duration {
            seconds: -1,
            nanos: 0,
        });

        match ClientState::try_from(raw) {
            Err(e) => match e.detail() {
                ErrorDetail::NegativeDuration(e) => assert_eq!(e.field, "trusting period"),
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("negative trusting period was accepted"),
        }
    }
}
