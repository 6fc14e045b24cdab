use flex_error::define_error;

use ibc_precompile_proto::protobuf::Error as ProtoError;

define_error! {
    Error {
        EmptyState
            { path: String }
            | e | { format_args!("no value is stored at path `{0}`", e.path) },

        BadLength
            { length: String }
            | e | { format_args!("stored length header {0} is not a valid slot length", e.length) },

        Decode
            { path: String }
            [ ProtoError ]
            | e | { format_args!("failed to decode the value stored at path `{0}`", e.path) },

        Encode
            { path: String }
            [ ProtoError ]
            | e | { format_args!("failed to encode the value for path `{0}`", e.path) },

        InvalidValue
            { path: String, reason: String }
            | e | { format_args!("value stored at path `{0}` is invalid: {1}", e.path, e.reason) },

        InvalidU64
            { path: String, length: usize }
            | e | {
                format_args!("value stored at path `{0}` is {1} bytes long, expected 8",
                    e.path, e.length)
            },
    }
}
