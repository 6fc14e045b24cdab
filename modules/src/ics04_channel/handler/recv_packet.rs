//! Protocol logic for receiving a packet on the destination chain.

use tracing::{info, warn};

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics04_channel::channel::{Counterparty, Order};
use crate::ics04_channel::context::ChannelReader;
use crate::ics04_channel::error::Error;
use crate::ics04_channel::events::ReceivePacket;
use crate::ics04_channel::handler::verify::verify_packet_recv_proofs;
use crate::ics04_channel::handler::{authenticate_capability, open_channel_connection};
use crate::ics04_channel::msgs::recv_packet::MsgRecvPacket;
use crate::ics04_channel::packet::{PacketResult, Receipt, Sequence};
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Address;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecvPacketResult {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub seq: Sequence,
    pub seq_number: Sequence,
    pub receipt: Option<Receipt>,
}

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgRecvPacket,
) -> HandlerResult<PacketResult, Error>
where
    Ctx: ChannelReader,
{
    let mut output = HandlerOutput::builder();

    let packet = &msg.packet;

    let dest_channel_end =
        ctx.channel_end(&packet.destination_port, &packet.destination_channel)?;

    if !dest_channel_end.is_open() {
        return Err(Error::invalid_channel_state(
            packet.destination_channel.clone(),
            *dest_channel_end.state(),
        ));
    }

    authenticate_capability(
        ctx,
        &caller,
        &packet.destination_port,
        &packet.destination_channel,
    )?;

    let counterparty = Counterparty::new(
        packet.source_port.clone(),
        Some(packet.source_channel.clone()),
    );
    if !dest_channel_end.counterparty_matches(&counterparty) {
        return Err(Error::invalid_packet_counterparty(
            packet.source_port.clone(),
            packet.source_channel.clone(),
        ));
    }

    let (_, connection_end) = open_channel_connection(ctx, &dest_channel_end)?;

    let host_height = ctx.host_height();
    if packet.height_timed_out(host_height) {
        return Err(Error::low_packet_height(host_height, packet.timeout_height));
    }

    let host_timestamp = ctx.host_timestamp();
    if packet.timestamp_timed_out(&host_timestamp) {
        return Err(Error::low_packet_timestamp(
            host_timestamp,
            packet.timeout_timestamp,
        ));
    }

    let result = if dest_channel_end.order_matches(&Order::Ordered) {
        let next_seq_recv =
            ctx.get_next_sequence_recv(&packet.destination_port, &packet.destination_channel)?;

        if packet.sequence < next_seq_recv {
            warn!(packet = %packet, next = %next_seq_recv, "packet already received");
            return Err(Error::no_op_msg(format!(
                "packet {} was already received",
                packet.sequence
            )));
        }
        if packet.sequence > next_seq_recv {
            return Err(Error::sequence_out_of_order(packet.sequence, next_seq_recv));
        }

        RecvPacketResult {
            port_id: packet.destination_port.clone(),
            channel_id: packet.destination_channel.clone(),
            seq: packet.sequence,
            seq_number: next_seq_recv.increment(),
            receipt: None,
        }
    } else {
        let receipt = ctx.get_packet_receipt(
            &packet.destination_port,
            &packet.destination_channel,
            packet.sequence,
        )?;

        if receipt.is_some() {
            warn!(packet = %packet, "packet already received");
            return Err(Error::no_op_msg(format!(
                "packet {} was already received",
                packet.sequence
            )));
        }

        RecvPacketResult {
            port_id: packet.destination_port.clone(),
            channel_id: packet.destination_channel.clone(),
            seq: packet.sequence,
            seq_number: packet.sequence,
            receipt: Some(Receipt::Ok),
        }
    };

    verify_packet_recv_proofs(
        ctx,
        &connection_end,
        packet,
        msg.proof_height,
        &msg.proof_commitment,
    )?;

    output.log("success: packet receive");
    info!(packet = %packet, "packet received");

    output.emit(IbcEvent::ReceivePacket(ReceivePacket {
        height: host_height,
        packet: msg.packet,
    }));

    Ok(output.with_result(PacketResult::Recv(result)))
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;
    use core::time::Duration;

    use test_log::test;

    use crate::events::IbcEvent;
    use crate::ics03_connection::connection::test_util::get_dummy_connection_end;
    use crate::ics03_connection::connection::{ConnectionEnd, State as ConnectionState};
    use crate::ics04_channel::channel::test_util::get_dummy_channel_end;
    use crate::ics04_channel::channel::{Order, State};
    use crate::ics04_channel::commitment::packet_commitment;
    use crate::ics04_channel::context::{ChannelKeeper, ChannelReader};
    use crate::ics04_channel::error::ErrorDetail;
    use crate::ics04_channel::handler::packet_dispatch;
    use crate::ics04_channel::msgs::recv_packet::MsgRecvPacket;
    use crate::ics04_channel::msgs::PacketMsg;
    use crate::ics04_channel::packet::test_utils::get_dummy_raw_packet;
    use crate::ics04_channel::packet::{Packet, PacketResult, Receipt, Sequence};
    use crate::ics07_tendermint::header::test_util::GENESIS_TIME_NANOS;
    use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
    use crate::ics24_host::path::Path;
    use crate::mock::context::MockContext;
    use crate::test_utils::{get_dummy_address, CommitmentTree};
    use crate::timestamp::Timestamp;
    use crate::Height;

    struct Fixture {
        ctx: MockContext,
        msg: MsgRecvPacket,
        tree: CommitmentTree,
    }

    fn commitment_path(packet: &Packet) -> Path {
        Path::Commitments {
            port_id: packet.source_port.clone(),
            channel_id: packet.source_channel.clone(),
            sequence: packet.sequence,
        }
    }

    /// `transfer/channel-1` on the counterparty committed `packet` at proof
    /// height `0-20`; the local end is `transfer/channel-0`.
    fn fixture(ordering: Order, packet: Packet) -> Fixture {
        let client_id = ClientId::from_str("07-tendermint-0").unwrap();
        let proof_height = Height::new(0, 20);

        let tree = CommitmentTree::new("ibc").with(
            commitment_path(&packet),
            packet_commitment(&packet).into_vec(),
        );

        let ctx = MockContext::default()
            .with_client_root(&client_id, proof_height, tree.root())
            .with_connection(
                ConnectionId::new(0),
                get_dummy_connection_end(ConnectionState::Open),
            )
            .with_channel(
                PortId::transfer(),
                ChannelId::new(0),
                get_dummy_channel_end(State::Open, ordering),
            )
            .with_capability(PortId::transfer(), ChannelId::new(0))
            .with_recv_sequence(PortId::transfer(), ChannelId::new(0), Sequence::from(1));

        let msg = MsgRecvPacket::new(
            packet.clone(),
            tree.membership_proof(commitment_path(&packet)).into(),
            proof_height,
        );

        Fixture { ctx, msg, tree }
    }

    fn dummy_packet() -> Packet {
        get_dummy_raw_packet(200, 0).try_into().unwrap()
    }

    #[test]
    fn recv_packet_processing() {
        struct Test {
            name: String,
            ctx: MockContext,
            msg: MsgRecvPacket,
            want_pass: bool,
        }

        let Fixture { ctx, msg, .. } = fixture(Order::Unordered, dummy_packet());

        // The host is at height `0-100`.
        let expired_packet: Packet = get_dummy_raw_packet(100, 0).try_into().unwrap();
        let Fixture {
            ctx: ctx_expired,
            msg: msg_expired,
            ..
        } = fixture(Order::Unordered, expired_packet);

        let mut stale_packet = dummy_packet();
        stale_packet.timeout_timestamp =
            Timestamp::from_nanoseconds(GENESIS_TIME_NANOS + 100 * 1_000_000_000).unwrap();
        let Fixture {
            ctx: ctx_stale,
            msg: msg_stale,
            ..
        } = fixture(Order::Unordered, stale_packet);

        let mut msg_wrong_source = msg.clone();
        msg_wrong_source.packet.source_channel = ChannelId::new(2);

        let mut msg_altered_data = msg.clone();
        msg_altered_data.packet.data = vec![9];

        let tests: Vec<Test> = vec![
            Test {
                name: "Processing fails because no channel exists in the context".to_string(),
                ctx: MockContext::default(),
                msg: msg.clone(),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the channel is closed".to_string(),
                ctx: ctx.clone().with_channel(
                    PortId::transfer(),
                    ChannelId::new(0),
                    get_dummy_channel_end(State::Closed, Order::Unordered),
                ),
                msg: msg.clone(),
                want_pass: false,
            },
            Test {
                name: "Processing fails because the packet comes from another channel"
                    .to_string(),
                ctx: ctx.clone(),
                msg: msg_wrong_source,
                want_pass: false,
            },
            Test {
                name: "Processing fails because the packet does not match its commitment"
                    .to_string(),
                ctx: ctx.clone(),
                msg: msg_altered_data,
                want_pass: false,
            },
            Test {
                name: "Processing fails because the timeout height was reached".to_string(),
                ctx: ctx_expired,
                msg: msg_expired,
                want_pass: false,
            },
            Test {
                name: "Processing fails because the timeout timestamp was reached".to_string(),
                ctx: ctx_stale,
                msg: msg_stale,
                want_pass: false,
            },
            Test {
                name: "Good parameters".to_string(),
                ctx,
                msg,
                want_pass: true,
            },
        ]
        .into_iter()
        .collect();

        for test in tests {
            let res = packet_dispatch(
                &test.ctx,
                get_dummy_address(),
                PacketMsg::RecvPacket(test.msg.clone()),
            );
            // Additionally check the events and the output objects in the result.
            match res {
                Ok(proto_output) => {
                    assert!(
                        test.want_pass,
                        "recv_packet: test passed but was supposed to fail for test: {}, \nparams {:?}",
                        test.name,
                        test.msg.clone(),
                    );

                    assert!(!proto_output.events.is_empty()); // Some events must exist.

                    for e in proto_output.events.iter() {
                        assert!(matches!(e, &IbcEvent::ReceivePacket(_)));
                    }
                }
                Err(e) => {
                    assert!(
                        !test.want_pass,
                        "recv_packet: did not pass test: {}, \nparams {:?} error: {:?}",
                        test.name,
                        test.msg,
                        e,
                    );
                }
            }
        }
    }

    #[test]
    fn recv_packet_unordered_is_at_most_once() {
        let Fixture { mut ctx, msg, .. } = fixture(Order::Unordered, dummy_packet());

        let output =
            packet_dispatch(&ctx, get_dummy_address(), PacketMsg::RecvPacket(msg.clone())).unwrap();
        match &output.result {
            PacketResult::Recv(res) => assert_eq!(res.receipt, Some(Receipt::Ok)),
            _ => panic!("unexpected result type: expected PacketResult::Recv!"),
        }
        ctx.store_packet_result(output.result).unwrap();
        assert_eq!(
            ctx.get_packet_receipt(&PortId::transfer(), &ChannelId::new(0), Sequence::from(1))
                .unwrap(),
            Some(Receipt::Ok)
        );

        match packet_dispatch(&ctx, get_dummy_address(), PacketMsg::RecvPacket(msg)) {
            Err(e) => assert!(e.is_no_op(), "unexpected error: {}", e),
            Ok(_) => panic!("packet received twice"),
        }
    }

    #[test]
    fn recv_packet_ordered_enforces_sequence() {
        let Fixture { mut ctx, msg, tree } = fixture(Order::Ordered, dummy_packet());

        // A packet ahead of the next sequence to receive.
        let mut ahead = dummy_packet();
        ahead.sequence = Sequence::from(2);
        let tree_ahead = tree.with(commitment_path(&ahead), packet_commitment(&ahead).into_vec());
        let ctx_ahead = ctx.clone().with_client_root(
            &ClientId::from_str("07-tendermint-0").unwrap(),
            Height::new(0, 20),
            tree_ahead.root(),
        );
        let msg_ahead = MsgRecvPacket::new(
            ahead.clone(),
            tree_ahead.membership_proof(commitment_path(&ahead)).into(),
            Height::new(0, 20),
        );
        match packet_dispatch(&ctx_ahead, get_dummy_address(), PacketMsg::RecvPacket(msg_ahead)) {
            Err(e) => match e.detail() {
                ErrorDetail::SequenceOutOfOrder(d) => {
                    assert_eq!(d.given_sequence, Sequence::from(2));
                    assert_eq!(d.next_sequence, Sequence::from(1));
                }
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("unexpected success (expected error)"),
        }

        let output =
            packet_dispatch(&ctx, get_dummy_address(), PacketMsg::RecvPacket(msg.clone())).unwrap();
        ctx.store_packet_result(output.result).unwrap();
        assert_eq!(
            ctx.get_next_sequence_recv(&PortId::transfer(), &ChannelId::new(0))
                .unwrap(),
            Sequence::from(2)
        );

        // Replaying a packet below the next sequence has no effect.
        match packet_dispatch(&ctx, get_dummy_address(), PacketMsg::RecvPacket(msg)) {
            Err(e) => assert!(e.is_no_op(), "unexpected error: {}", e),
            Ok(_) => panic!("packet received twice"),
        }
    }

    #[test]
    fn recv_packet_waits_for_delay_period() {
        // The timeout lies beyond the host height after the delay.
        let packet: Packet = get_dummy_raw_packet(5000, 0).try_into().unwrap();
        let Fixture { ctx, msg, .. } = fixture(Order::Unordered, packet);

        let delayed = get_dummy_connection_end(ConnectionState::Open);
        let delayed = ConnectionEnd::new(
            *delayed.state(),
            delayed.client_id().clone(),
            delayed.counterparty().clone(),
            delayed.versions().to_vec(),
            Duration::from_secs(1000),
        );
        let mut ctx = ctx.with_connection(ConnectionId::new(0), delayed);

        match packet_dispatch(&ctx, get_dummy_address(), PacketMsg::RecvPacket(msg.clone())) {
            Err(e) => match e.detail() {
                ErrorDetail::PacketVerificationFailed(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("proof accepted before the delay period elapsed"),
        }

        // 1000s at 2s per block.
        ctx.advance_host(500, Duration::from_secs(1000));
        assert!(
            packet_dispatch(&ctx, get_dummy_address(), PacketMsg::RecvPacket(msg)).is_ok()
        );
    }
}
