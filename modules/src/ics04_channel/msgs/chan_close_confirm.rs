use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Height;

///
/// Message definition for the second step in the channel close handshake (`ChanCloseConfirm`
/// datagram).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelCloseConfirm {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub proof_init: CommitmentProofBytes,
    pub proof_height: Height,
}
