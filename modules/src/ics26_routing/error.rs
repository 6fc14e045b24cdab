use flex_error::define_error;

use crate::ics02_client;
use crate::ics03_connection;
use crate::ics04_channel;
use crate::ics05_port;

define_error! {
    #[derive(Debug)]
    Error {
        Ics02Client
            [ ics02_client::error::Error ]
            | _ | { "ICS02 client error" },

        Ics03Connection
            [ ics03_connection::error::Error ]
            | _ | { "ICS03 connection error" },

        Ics04Channel
            [ ics04_channel::error::Error ]
            | _ | { "ICS04 channel error" },

        Ics05Port
            [ ics05_port::error::Error ]
            | _ | { "ICS05 port error" },
    }
}

impl Error {
    /// Whether the routed message was already processed. Such a message
    /// succeeds without effects.
    pub fn is_no_op(&self) -> bool {
        matches!(
            self.detail(),
            ErrorDetail::Ics04Channel(e)
                if matches!(e.source, ics04_channel::error::ErrorDetail::NoOpMsg(_))
        )
    }
}
