//! Commitments a chain stores for the packets it sends and the
//! acknowledgements it writes. Counterparties verify packet relays against
//! these values.

use serde_derive::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ics04_channel::packet::Packet;
use crate::timestamp::Timestamp;
use crate::Height;

/// Packet commitment
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Acknowledgement commitment to be stored
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AcknowledgementCommitment(Vec<u8>);

impl AcknowledgementCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for AcknowledgementCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Commits to the timeout and the data of a packet:
/// `sha256(timestamp || revision_number || revision_height || sha256(data))`,
/// all integers in 8-byte big-endian.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &Height,
    timeout_timestamp: &Timestamp,
) -> PacketCommitment {
    let mut hash_input = timeout_timestamp.nanoseconds().to_be_bytes().to_vec();

    let revision_number = timeout_height.revision_number.to_be_bytes();
    hash_input.append(&mut revision_number.to_vec());

    let revision_height = timeout_height.revision_height.to_be_bytes();
    hash_input.append(&mut revision_height.to_vec());

    let packet_data_hash = Sha256::digest(packet_data);
    hash_input.append(&mut packet_data_hash.to_vec());

    Sha256::digest(&hash_input).to_vec().into()
}

/// Commitment of a packet as sent.
pub fn packet_commitment(packet: &Packet) -> PacketCommitment {
    compute_packet_commitment(
        &packet.data,
        &packet.timeout_height,
        &packet.timeout_timestamp,
    )
}

pub fn compute_ack_commitment(ack: &[u8]) -> AcknowledgementCommitment {
    Sha256::digest(ack).to_vec().into()
}
