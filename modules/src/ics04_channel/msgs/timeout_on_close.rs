use crate::ics04_channel::packet::{Packet, Sequence};
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::Height;

///
/// Message definition for packet timeout on a closed channel.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeoutOnClose {
    pub packet: Packet,
    pub next_sequence_recv: Sequence,
    pub proof_unreceived: CommitmentProofBytes,
    /// Proof that the destination channel end is closed.
    pub proof_close: CommitmentProofBytes,
    pub proof_height: Height,
}
