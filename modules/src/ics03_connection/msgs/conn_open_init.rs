use core::time::Duration;

use crate::ics03_connection::connection::Counterparty;
use crate::ics03_connection::version::Version;
use crate::ics24_host::identifier::ClientId;

/// Per our convention, this message is sent to chain A.
/// The handler will check proofs of chain B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenInit {
    pub client_id: ClientId,
    pub counterparty: Counterparty,
    /// A single version to propose. `None` proposes every compatible version.
    pub version: Option<Version>,
    pub delay_period: Duration,
}

#[cfg(any(test, feature = "mocks"))]
pub mod test_util {
    use core::str::FromStr;
    use core::time::Duration;

    use super::MsgConnectionOpenInit;
    use crate::ics03_connection::connection::Counterparty;
    use crate::ics24_host::identifier::ClientId;

    /// Returns a dummy message, for testing only.
    /// Client ids are of the form `07-tendermint-{n}`.
    pub fn get_dummy_msg_conn_open_init(client: u64, counterparty_client: u64) -> MsgConnectionOpenInit {
        MsgConnectionOpenInit {
            client_id: ClientId::from_str(&format!("07-tendermint-{}", client)).unwrap(),
            counterparty: Counterparty::new(
                ClientId::from_str(&format!("07-tendermint-{}", counterparty_client)).unwrap(),
                None,
                b"ibc".to_vec().into(),
            ),
            version: None,
            delay_period: Duration::from_secs(0),
        }
    }
}
