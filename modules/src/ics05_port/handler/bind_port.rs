//! Protocol logic specific to processing ICS5 messages of type `MsgBindPort`.

use tracing::info;

use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};
use crate::ics05_port::context::PortReader;
use crate::ics05_port::error::Error;
use crate::ics05_port::events::BindPort;
use crate::ics05_port::handler::PortResult;
use crate::ics05_port::msgs::bind_port::MsgBindPort;
use crate::Address;

pub fn process<Ctx>(
    ctx: &Ctx,
    caller: Address,
    msg: MsgBindPort,
) -> HandlerResult<PortResult, Error>
where
    Ctx: PortReader,
{
    let mut output = HandlerOutput::builder();

    if let Some(owner) = ctx.port_owner(&msg.port_id)? {
        return Err(Error::port_already_bound(msg.port_id, owner));
    }

    output.log(format!("success: port {} bound", msg.port_id));
    info!(port = %msg.port_id, owner = ?caller, "port bound");

    output.emit(IbcEvent::BindPort(BindPort {
        port_id: msg.port_id.clone(),
        owner: caller,
    }));

    Ok(output.with_result(PortResult {
        port_id: msg.port_id,
        owner: caller,
    }))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::events::IbcEvent;
    use crate::ics05_port::context::{PortKeeper, PortReader};
    use crate::ics05_port::error::ErrorDetail;
    use crate::ics05_port::handler::dispatch;
    use crate::ics05_port::msgs::bind_port::MsgBindPort;
    use crate::ics05_port::msgs::PortMsg;
    use crate::ics24_host::identifier::PortId;
    use crate::mock::context::MockContext;
    use crate::Address;

    #[test]
    fn bind_port_once() {
        let owner = Address::repeat_byte(0xaa);
        let other = Address::repeat_byte(0xbb);
        let port_id = PortId::transfer();
        let mut ctx = MockContext::default();

        let msg = PortMsg::BindPort(MsgBindPort::new(port_id.clone()));
        let output = dispatch(&ctx, owner, msg.clone()).unwrap();
        assert!(matches!(
            &output.events[0],
            IbcEvent::BindPort(e) if e.owner == owner && e.port_id == port_id
        ));

        ctx.store_port_result(output.result).unwrap();
        assert_eq!(ctx.port_owner(&port_id).unwrap(), Some(owner));

        match dispatch(&ctx, other, msg) {
            Err(e) => match e.detail() {
                ErrorDetail::PortAlreadyBound(d) => assert_eq!(d.owner, owner),
                _ => panic!("unexpected error: {}", e),
            },
            Ok(_) => panic!("port was bound twice"),
        }
    }
}
