//! Ownership checks on ports and channel capabilities.

use crate::ics05_port::context::PortReader;
use crate::ics05_port::error::Error;
use crate::ics24_host::identifier::{ChannelId, PortId};
use crate::Address;

/// Succeeds if `port_id` is unbound or bound to `caller`.
pub fn authenticate_port<Ctx>(ctx: &Ctx, caller: &Address, port_id: &PortId) -> Result<(), Error>
where
    Ctx: PortReader + ?Sized,
{
    match ctx.port_owner(port_id)? {
        Some(owner) if owner != *caller => {
            Err(Error::port_owner_mismatch(port_id.clone(), *caller))
        }
        _ => Ok(()),
    }
}

/// Fails if the capability for `(port_id, channel_id)` was already handed out.
pub fn ensure_capability_unclaimed<Ctx>(
    ctx: &Ctx,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(), Error>
where
    Ctx: PortReader + ?Sized,
{
    if ctx.has_capability(port_id, channel_id)? {
        return Err(Error::capability_already_exists(
            port_id.clone(),
            channel_id.clone(),
        ));
    }
    Ok(())
}

/// Whether `caller` may operate the channel end `(port_id, channel_id)`: the
/// capability must exist and the port, if bound, must belong to the caller.
pub fn owns_capability<Ctx>(
    ctx: &Ctx,
    caller: &Address,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<bool, Error>
where
    Ctx: PortReader + ?Sized,
{
    if !ctx.has_capability(port_id, channel_id)? {
        return Ok(false);
    }
    Ok(ctx
        .port_owner(port_id)?
        .map_or(true, |owner| owner == *caller))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use test_log::test;

    use super::*;
    use crate::ics05_port::error::ErrorDetail;

    #[derive(Default)]
    struct Ports {
        owners: BTreeMap<PortId, Address>,
        capabilities: BTreeSet<(PortId, ChannelId)>,
    }

    impl PortReader for Ports {
        fn port_owner(&self, port_id: &PortId) -> Result<Option<Address>, Error> {
            Ok(self.owners.get(port_id).copied())
        }

        fn has_capability(&self, port_id: &PortId, channel_id: &ChannelId) -> Result<bool, Error> {
            Ok(self
                .capabilities
                .contains(&(port_id.clone(), channel_id.clone())))
        }
    }

    #[test]
    fn capability_requires_grant_and_ownership() {
        let alice = Address::repeat_byte(1);
        let bob = Address::repeat_byte(2);
        let port = PortId::transfer();
        let channel = ChannelId::new(0);

        let mut ports = Ports::default();
        assert!(!owns_capability(&ports, &alice, &port, &channel).unwrap());

        ports.capabilities.insert((port.clone(), channel.clone()));
        assert!(owns_capability(&ports, &alice, &port, &channel).unwrap());
        assert!(owns_capability(&ports, &bob, &port, &channel).unwrap());

        ports.owners.insert(port.clone(), alice);
        assert!(owns_capability(&ports, &alice, &port, &channel).unwrap());
        assert!(!owns_capability(&ports, &bob, &port, &channel).unwrap());

        match authenticate_port(&ports, &bob, &port) {
            Err(e) => match e.detail() {
                ErrorDetail::PortOwnerMismatch(d) => assert_eq!(d.caller, bob),
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("port owned by someone else was authenticated"),
        }

        match ensure_capability_unclaimed(&ports, &port, &channel) {
            Err(e) => match e.detail() {
                ErrorDetail::CapabilityAlreadyExists(_) => {}
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("granted capability reported unclaimed"),
        }
    }
}
