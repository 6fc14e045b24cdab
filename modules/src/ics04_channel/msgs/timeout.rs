use crate::ics04_channel::packet::{Packet, Sequence};
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::Height;

///
/// Message definition for packet timeout domain type.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeout {
    pub packet: Packet,
    /// Next sequence to receive on the destination, proven for ordered channels.
    pub next_sequence_recv: Sequence,
    /// Receipt absence (unordered) or next receive sequence (ordered) on the destination.
    pub proof_unreceived: CommitmentProofBytes,
    pub proof_height: Height,
}
