use flex_error::define_error;
use ibc_precompile_proto::protobuf::Error as ProtoError;

use crate::ics02_client::error as client_error;
use crate::ics03_connection::connection::State;
use crate::ics03_connection::version::Version;
use crate::ics24_host::error::ValidationError;
use crate::ics24_host::identifier::{ClientId, ConnectionId};
use crate::store::Error as StoreError;

define_error! {
    #[derive(Debug)]
    Error {
        Ics02Client
            [ client_error::Error ]
            | _ | { "ics02 client error" },

        InvalidState
            { state: i32 }
            | e | { format_args!("connection state is unknown: {}", e.state) },

        InvalidConnectionState
            {
                connection_id: ConnectionId,
                state: State,
                expected: State,
            }
            | e | {
                format_args!("connection {0} is in state {1}, expected {2}",
                    e.connection_id, e.state, e.expected)
            },

        ConnectionNotFound
            { connection_id: ConnectionId }
            | e | {
                format_args!("no connection was found for the previous connection id provided {0}",
                    e.connection_id)
            },

        ConnectionNotOpen
            { connection_id: ConnectionId }
            | e | {
                format_args!("connection {0} is not open", e.connection_id)
            },

        InvalidIdentifier
            [ ValidationError ]
            | _ | { "identifier error" },

        EmptyProtoConnectionEnd
            | _ | { "ConnectionEnd domain object could not be constructed out of empty proto object" },

        MissingCounterparty
            | _ | { "missing counterparty" },

        MissingCounterpartyPrefix
            | _ | { "missing counterparty prefix" },

        InvalidCounterparty
            | _ | { "invalid counterparty: the counterparty connection id is unknown" },

        EmptyVersions
            | _ | { "empty supported versions" },

        EmptyFeatures
            | _ | { "empty supported features" },

        InvalidVersion
            { version: Version }
            | e | {
                format_args!("version {0} is not supported by this chain", e.version)
            },

        InvalidVersionLength
            { length: usize }
            | e | {
                format_args!("a connection in this state must pin exactly one version, found {0}",
                    e.length)
            },

        NoCommonVersion
            | _ | { "no common version" },

        ClientNotFound
            { client_id: ClientId }
            | e | {
                format_args!("client {0} does not exist", e.client_id)
            },

        ConnectionCounterOverflow
            | _ | { "connection counter overflow" },

        VerifyConnectionState
            [ client_error::Error ]
            | _ | { "error verifying connection state" },

        VerifyClientState
            { client_id: ClientId }
            [ client_error::Error ]
            | e | {
                format_args!("error verifying the counterparty's state of client {0}",
                    e.client_id)
            },

        EncodeClientState
            [ ProtoError ]
            | _ | { "failed to encode the client state" },

        EncodeConnectionEnd
            [ ProtoError ]
            | _ | { "failed to encode the connection end" },

        Store
            [ StoreError ]
            | _ | { "storage error" },
    }
}
