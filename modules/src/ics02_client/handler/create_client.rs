//! Protocol logic specific to processing ICS2 messages of type `MsgCreateAnyClient`.

use core::str::FromStr;

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics02_client::client_consensus::AnyConsensusState;
use crate::ics02_client::client_state::AnyClientState;
use crate::ics02_client::client_type::ClientType;
use crate::ics02_client::context::ClientReader;
use crate::ics02_client::error::Error;
use crate::ics02_client::events::Attributes;
use crate::ics02_client::handler::ClientResult;
use crate::ics02_client::msgs::create_client::MsgCreateAnyClient;
use crate::ics24_host::identifier::ClientId;
use crate::timestamp::Timestamp;
use crate::Height;

/// The result following the successful processing of a `MsgCreateAnyClient` message. Preferably
/// this data type should be used with a qualified name `create_client::Result` to avoid ambiguity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Result {
    pub client_id: ClientId,
    pub client_type: ClientType,
    pub client_state: AnyClientState,
    pub consensus_state: AnyConsensusState,
    pub processed_time: Timestamp,
    pub processed_height: Height,
}

pub fn process<Ctx>(ctx: &Ctx, msg: MsgCreateAnyClient) -> HandlerResult<ClientResult, Error>
where
    Ctx: ClientReader,
{
    let mut output = HandlerOutput::builder();

    let client_type = ClientType::from_str(&msg.client_type)
        .map_err(|_| Error::wrong_client_type(msg.client_type.clone()))?;

    if msg.client_state.client_type() != client_type
        || msg.consensus_state.client_type() != client_type
    {
        return Err(Error::wrong_client_type(msg.client_type));
    }

    msg.client_state.validate()?;

    // Construct this client's identifier
    let id_counter = ctx.client_counter()?;
    let client_id = ClientId::new(client_type, id_counter).map_err(|e| {
        Error::client_identifier_constructor(client_type.as_str().to_string(), id_counter, e)
    })?;

    output.log(format!(
        "success: generated new client identifier: {}",
        client_id
    ));
    info!(client = %client_id, height = %msg.client_state.latest_height(), "client created");

    let event_attributes = Attributes {
        height: ctx.host_height(),
        client_id: client_id.clone(),
        client_type,
        consensus_height: msg.client_state.latest_height(),
    };
    output.emit(IbcEvent::CreateClient(event_attributes.into()));

    let result = ClientResult::Create(Result {
        client_id,
        client_type,
        client_state: msg.client_state,
        consensus_state: msg.consensus_state,
        processed_time: ctx.host_timestamp(),
        processed_height: ctx.host_height(),
    });

    Ok(output.with_result(result))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::events::IbcEvent;
    use crate::handler::HandlerOutput;
    use crate::ics02_client::client_consensus::AnyConsensusState;
    use crate::ics02_client::client_type::ClientType;
    use crate::ics02_client::context::{ClientKeeper, ClientReader};
    use crate::ics02_client::error::ErrorDetail;
    use crate::ics02_client::handler::{dispatch, ClientResult};
    use crate::ics02_client::msgs::create_client::MsgCreateAnyClient;
    use crate::ics02_client::msgs::ClientMsg;
    use crate::ics07_tendermint::client_state::test_util::{
        get_dummy_raw_tm_client_state, get_dummy_tendermint_client_state,
    };
    use crate::ics07_tendermint::consensus_state::ConsensusState;
    use crate::ics07_tendermint::header::test_util::get_dummy_tendermint_header;
    use crate::ics24_host::identifier::ClientId;
    use crate::mock::context::MockContext;
    use crate::Height;

    fn create_msg(client_type: &str, height: Height) -> MsgCreateAnyClient {
        let header = get_dummy_tendermint_header(height, height);
        MsgCreateAnyClient::new(
            client_type,
            get_dummy_tendermint_client_state(height),
            AnyConsensusState::Tendermint(ConsensusState::from(header)),
        )
    }

    #[test]
    fn test_create_client_ok() {
        let ctx = MockContext::default();
        let msg = create_msg("tendermint", Height::new(0, 5));

        let output = dispatch(&ctx, ClientMsg::CreateClient(msg.clone()));

        match output {
            Ok(HandlerOutput {
                result, mut events, ..
            }) => {
                assert_eq!(events.len(), 1);
                let event = events.pop().unwrap();
                let expected_client_id = ClientId::new(ClientType::Tendermint, 0).unwrap();
                assert!(
                    matches!(event, IbcEvent::CreateClient(ref e) if e.client_id() == &expected_client_id)
                );
                match result {
                    ClientResult::Create(create_result) => {
                        assert_eq!(create_result.client_type, ClientType::Tendermint);
                        assert_eq!(create_result.client_id, expected_client_id);
                        assert_eq!(create_result.client_state, msg.client_state);
                        assert_eq!(create_result.consensus_state, msg.consensus_state);
                        assert_eq!(create_result.processed_height, ctx.host_height());
                    }
                    _ => {
                        panic!("unexpected result type: expected ClientResult::Create!");
                    }
                }
            }
            Err(err) => {
                panic!("unexpected error: {}", err);
            }
        }
    }

    #[test]
    fn test_create_client_ok_multiple() {
        let mut ctx = MockContext::default();

        for (expected, height) in [(0, 5), (1, 7), (2, 11)] {
            let msg = create_msg("07-tendermint", Height::new(0, height));
            let output = dispatch(&ctx, ClientMsg::CreateClient(msg)).unwrap();

            assert_eq!(
                output.result.client_id(),
                &ClientId::new(ClientType::Tendermint, expected).unwrap()
            );
            ctx.store_client_result(output.result).unwrap();
        }

        assert_eq!(ctx.client_counter().unwrap(), 3);
    }

    #[test]
    fn test_create_client_rejects_bad_input() {
        struct Test {
            name: String,
            msg: MsgCreateAnyClient,
            want_pass: bool,
        }

        let height = Height::new(0, 5);
        let mut frozen = get_dummy_raw_tm_client_state(height);
        frozen.frozen_height = Height::new(0, 1);
        let mut zero_height = get_dummy_raw_tm_client_state(height);
        zero_height.latest_height = Height::zero();

        let tests: Vec<Test> = vec![
            Test {
                name: "Good parameters".to_string(),
                msg: create_msg("tendermint", height),
                want_pass: true,
            },
            Test {
                name: "Unsupported client type".to_string(),
                msg: create_msg("solomachine", height),
                want_pass: false,
            },
            Test {
                name: "Client created frozen".to_string(),
                msg: MsgCreateAnyClient {
                    client_state: frozen.into(),
                    ..create_msg("tendermint", height)
                },
                want_pass: false,
            },
            Test {
                name: "Client created at height zero".to_string(),
                msg: MsgCreateAnyClient {
                    client_state: zero_height.into(),
                    ..create_msg("tendermint", height)
                },
                want_pass: false,
            },
        ]
        .into_iter()
        .collect();

        for test in tests {
            let ctx = MockContext::default();
            let res = dispatch(&ctx, ClientMsg::CreateClient(test.msg.clone()));

            assert_eq!(
                test.want_pass,
                res.is_ok(),
                "create_client: test failed: {}, \nmsg is {:?}",
                test.name,
                test.msg,
            );
        }
    }

    #[test]
    fn test_create_client_wrong_type() {
        let ctx = MockContext::default();
        let msg = create_msg("solomachine", Height::new(0, 5));

        match dispatch(&ctx, ClientMsg::CreateClient(msg)) {
            Err(e) => match e.detail() {
                ErrorDetail::WrongClientType(d) => assert_eq!(d.client_type, "solomachine"),
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unexpected success (expected error)"),
        }
    }
}
