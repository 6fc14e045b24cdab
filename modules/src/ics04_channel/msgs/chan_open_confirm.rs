use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Height;

///
/// Message definition for the fourth step in the channel open handshake (`ChanOpenConfirm`
/// datagram).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelOpenConfirm {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub proof_ack: CommitmentProofBytes,
    pub proof_height: Height,
}
