//! Network helpers.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use tracing::debug;

/// Returns the IPv4 address of the interface used for outbound traffic.
///
/// Connecting a UDP socket only selects a route, no packet leaves the machine. `None`
/// when there is no route or when only a loopback address is available.
pub fn local_ip() -> anyhow::Result<Option<Ipv4Addr>> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    if let Err(e) = socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)) {
        debug!(error = %e, "no outbound route");
        return Ok(None);
    }
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if !ip.is_loopback() && !ip.is_unspecified() => Ok(Some(ip)),
        _ => Ok(None),
    }
}
