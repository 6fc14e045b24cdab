//! ICS4 verification functions: every proof a channel handshake or packet
//! handler consumes goes through one of these.

use ibc_precompile_proto::protobuf::Protobuf;

use crate::ics02_client::context::ClientReader;
use crate::ics02_client::verifier::{verify_membership, verify_non_membership, DelayPeriod};
use crate::ics03_connection::connection::ConnectionEnd;
use crate::ics04_channel::channel::ChannelEnd;
use crate::ics04_channel::commitment::{compute_ack_commitment, packet_commitment};
use crate::ics04_channel::error::Error;
use crate::ics04_channel::packet::{Packet, Sequence};
use crate::ics23_commitment::commitment::CommitmentProofBytes;
use crate::ics24_host::path::Path;
use crate::Height;

/// Verifies that the counterparty of `channel_end` stores `expected_chan`.
/// Handshake proofs are checked without a delay period.
pub fn verify_channel_proofs(
    ctx: &dyn ClientReader,
    channel_end: &ChannelEnd,
    connection_end: &ConnectionEnd,
    expected_chan: &ChannelEnd,
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let counterparty = channel_end.counterparty();
    let channel_id = counterparty
        .channel_id()
        .ok_or_else(Error::invalid_counterparty_channel_id)?;

    let value = expected_chan
        .encode_vec()
        .map_err(Error::encode_channel_end)?;

    verify_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        DelayPeriod::none(),
        connection_end.counterparty().prefix(),
        proof,
        Path::ChannelEnds(counterparty.port_id().clone(), channel_id.clone()),
        value,
    )
    .map_err(Error::verify_channel_failed)
}

/// Packet proofs wait for the delay period of the connection.
fn packet_delay(ctx: &dyn ClientReader, connection_end: &ConnectionEnd) -> DelayPeriod {
    DelayPeriod::new(
        connection_end.delay_period(),
        ctx.max_expected_time_per_block(),
    )
}

/// Verifies that the source chain committed to `packet`.
pub fn verify_packet_recv_proofs(
    ctx: &dyn ClientReader,
    connection_end: &ConnectionEnd,
    packet: &Packet,
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let commitment_path = Path::Commitments {
        port_id: packet.source_port.clone(),
        channel_id: packet.source_channel.clone(),
        sequence: packet.sequence,
    };

    verify_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        packet_delay(ctx, connection_end),
        connection_end.counterparty().prefix(),
        proof,
        commitment_path,
        packet_commitment(packet).into_vec(),
    )
    .map_err(|e| Error::packet_verification_failed(packet.sequence, e))
}

/// Verifies that the destination chain wrote `acknowledgement` for `packet`.
pub fn verify_packet_acknowledgement_proofs(
    ctx: &dyn ClientReader,
    connection_end: &ConnectionEnd,
    packet: &Packet,
    acknowledgement: &[u8],
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let ack_path = Path::Acks {
        port_id: packet.destination_port.clone(),
        channel_id: packet.destination_channel.clone(),
        sequence: packet.sequence,
    };

    verify_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        packet_delay(ctx, connection_end),
        connection_end.counterparty().prefix(),
        proof,
        ack_path,
        compute_ack_commitment(acknowledgement).into_vec(),
    )
    .map_err(|e| Error::packet_verification_failed(packet.sequence, e))
}

/// Verifies the next sequence to receive on the destination of an ordered channel.
pub fn verify_next_sequence_recv(
    ctx: &dyn ClientReader,
    connection_end: &ConnectionEnd,
    packet: &Packet,
    next_sequence_recv: Sequence,
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let seq_path = Path::SeqRecvs(
        packet.destination_port.clone(),
        packet.destination_channel.clone(),
    );

    verify_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        packet_delay(ctx, connection_end),
        connection_end.counterparty().prefix(),
        proof,
        seq_path,
        next_sequence_recv.to_be_bytes().to_vec(),
    )
    .map_err(|e| Error::packet_verification_failed(packet.sequence, e))
}

/// Verifies that the destination of an unordered channel never received `packet`.
pub fn verify_packet_receipt_absence(
    ctx: &dyn ClientReader,
    connection_end: &ConnectionEnd,
    packet: &Packet,
    proof_height: Height,
    proof: &CommitmentProofBytes,
) -> Result<(), Error> {
    let receipt_path = Path::Receipts {
        port_id: packet.destination_port.clone(),
        channel_id: packet.destination_channel.clone(),
        sequence: packet.sequence,
    };

    verify_non_membership(
        ctx,
        connection_end.client_id(),
        proof_height,
        packet_delay(ctx, connection_end),
        connection_end.counterparty().prefix(),
        proof,
        receipt_path,
    )
    .map_err(|e| Error::packet_verification_failed(packet.sequence, e))
}
