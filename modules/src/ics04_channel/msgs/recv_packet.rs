use crate::ics04_channel::packet::Packet;
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::Height;

///
/// Message definition for the "packet receiving" datagram.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgRecvPacket {
    pub packet: Packet,
    /// Proof of the packet commitment on the source chain.
    pub proof_commitment: CommitmentProofBytes,
    pub proof_height: Height,
}

impl MsgRecvPacket {
    pub fn new(packet: Packet, proof_commitment: CommitmentProofBytes, proof_height: Height) -> Self {
        Self {
            packet,
            proof_commitment,
            proof_height,
        }
    }
}
