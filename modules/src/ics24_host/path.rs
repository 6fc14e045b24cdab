//! Path-space as listed in ICS-024
//! <https://github.com/cosmos/ibc/tree/main/spec/core/ics-024-host-requirements#path-space>
//!
//! Every object the state machine persists lives under one of these paths;
//! the paths of provable objects are also the keys counterparties prove
//! against.

use core::fmt::{Display, Formatter, Result};

use crate::ics04_channel::packet::Sequence;
use crate::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::Height;

/// The Path enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Path {
    ClientType(ClientId),
    ClientState(ClientId),
    ClientConsensusState {
        client_id: ClientId,
        height: Height,
    },
    ProcessedTime {
        client_id: ClientId,
        height: Height,
    },
    ProcessedHeight {
        client_id: ClientId,
        height: Height,
    },
    Connections(ConnectionId),
    Ports(PortId),
    ChannelEnds(PortId, ChannelId),
    SeqSends(PortId, ChannelId),
    SeqRecvs(PortId, ChannelId),
    SeqAcks(PortId, ChannelId),
    Commitments {
        port_id: PortId,
        channel_id: ChannelId,
        sequence: Sequence,
    },
    Acks {
        port_id: PortId,
        channel_id: ChannelId,
        sequence: Sequence,
    },
    Receipts {
        port_id: PortId,
        channel_id: ChannelId,
        sequence: Sequence,
    },
    Capabilities(PortId, ChannelId),
    NextClientSequence,
    NextConnectionSequence,
    NextChannelSequence,
}

impl Path {
    /// Indication if the path is provable.
    pub fn is_provable(&self) -> bool {
        !matches!(
            &self,
            Path::ClientType(_)
                | Path::ProcessedTime { .. }
                | Path::ProcessedHeight { .. }
                | Path::Ports(_)
                | Path::Capabilities(_, _)
                | Path::NextClientSequence
                | Path::NextConnectionSequence
                | Path::NextChannelSequence
        )
    }

    /// into_bytes implementation
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

/// The Display trait adds the `.to_string()` method to the Path struct.
/// This is where the different path strings are constructed.
impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self {
            Path::ClientType(id) => write!(f, "clients/{}/clientType", id),
            Path::ClientState(id) => write!(f, "clients/{}/clientState", id),
            Path::ClientConsensusState { client_id, height } => write!(
                f,
                "clients/{}/consensusStates/{}-{}",
                client_id, height.revision_number, height.revision_height
            ),
            Path::ProcessedTime { client_id, height } => write!(
                f,
                "clients/{}/consensusStates/{}-{}/processedTime",
                client_id, height.revision_number, height.revision_height
            ),
            Path::ProcessedHeight { client_id, height } => write!(
                f,
                "clients/{}/consensusStates/{}-{}/processedHeight",
                client_id, height.revision_number, height.revision_height
            ),
            Path::Connections(id) => write!(f, "connections/{}", id),
            Path::Ports(id) => write!(f, "ports/{}", id),
            Path::ChannelEnds(port_id, channel_id) => {
                write!(f, "channelEnds/ports/{}/channels/{}", port_id, channel_id)
            }
            Path::SeqSends(port_id, channel_id) => write!(
                f,
                "nextSequenceSend/ports/{}/channels/{}",
                port_id, channel_id
            ),
            Path::SeqRecvs(port_id, channel_id) => write!(
                f,
                "nextSequenceRecv/ports/{}/channels/{}",
                port_id, channel_id
            ),
            Path::SeqAcks(port_id, channel_id) => write!(
                f,
                "nextSequenceAck/ports/{}/channels/{}",
                port_id, channel_id
            ),
            Path::Commitments {
                port_id,
                channel_id,
                sequence,
            } => write!(
                f,
                "commitments/ports/{}/channels/{}/sequences/{}",
                port_id, channel_id, sequence
            ),
            Path::Acks {
                port_id,
                channel_id,
                sequence,
            } => write!(
                f,
                "acks/ports/{}/channels/{}/sequences/{}",
                port_id, channel_id, sequence
            ),
            Path::Receipts {
                port_id,
                channel_id,
                sequence,
            } => write!(
                f,
                "receipts/ports/{}/channels/{}/sequences/{}",
                port_id, channel_id, sequence
            ),
            Path::Capabilities(port_id, channel_id) => write!(
                f,
                "capabilities/ports/{}/channels/{}",
                port_id, channel_id
            ),
            Path::NextClientSequence => write!(f, "nextClientSequence"),
            Path::NextConnectionSequence => write!(f, "nextConnectionSequence"),
            Path::NextChannelSequence => write!(f, "nextChannelSequence"),
        }
    }
}

/// Paths under which a chain commits the client and consensus state a client
/// must be upgraded to, formed by appending `{height}/upgradedClient` and
/// `{height}/upgradedConsState` to the last element of the client's upgrade
/// path.
pub fn upgrade_paths(upgrade_path: &[String], latest_height: Height) -> Option<(Vec<String>, Vec<String>)> {
    let (last, prefix) = upgrade_path.split_last()?;
    let height = latest_height.revision_height;

    let mut client_path = prefix.to_vec();
    client_path.push(format!("{}/{}/upgradedClient", last, height));

    let mut consensus_path = prefix.to_vec();
    consensus_path.push(format!("{}/{}/upgradedConsState", last, height));

    Some((client_path, consensus_path))
}
