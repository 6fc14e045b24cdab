use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::Version;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::identifier::PortId;
use crate::Height;

///
/// Message definition for the second step in the channel open handshake (`ChanOpenTry` datagram).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenTry {
    pub port_id: PortId,
    /// The channel end to create. Its counterparty names the channel in `Init` on the other chain.
    pub channel: ChannelEnd,
    pub counterparty_version: Version,
    pub proof_init: CommitmentProofBytes,
    pub proof_height: Height,
}
