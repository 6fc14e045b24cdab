use crate::ics04_channel::packet::Packet;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::Height;

///
/// Message definition for packet acknowledgements.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Vec<u8>,
    /// Proof of the acknowledgement commitment on the destination chain.
    pub proof_acked: CommitmentProofBytes,
    pub proof_height: Height,
}
