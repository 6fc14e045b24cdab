use core::any::type_name;
use core::fmt::Display;

use flex_error::{define_error, TraceError};
use prost::{DecodeError, EncodeError};

define_error! {
    Error {
        TryFromProtobuf
            { reason: String }
            | e | {
                format!("error converting message type into domain type: {}",
                    e.reason)
            },

        EncodeMessage
            [ TraceError<EncodeError> ]
            | _ | { "error encoding message into buffer" },

        DecodeMessage
            [ TraceError<DecodeError> ]
            | _ | { "error decoding buffer into message" },
    }
}

impl Error {
    pub fn try_from<Raw, T, E>(e: E) -> Error
    where
        E: Display,
        T: TryFrom<Raw, Error = E>,
    {
        let reason = format!("{} -> {}: {}", type_name::<Raw>(), type_name::<T>(), e);
        Error::try_from_protobuf(reason)
    }
}
