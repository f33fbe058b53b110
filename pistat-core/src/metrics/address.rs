//! Outbound address discovery
//!
//! Connecting a UDP socket sends nothing on the wire; it only makes the
//! kernel pick a route and bind the socket to that route's local address.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, UdpSocket};

use super::MetricError;

/// Public address used to select the outbound route
pub const PROBE_TARGET: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 80));

/// Local address the OS would use to reach `target`
pub fn outbound_address(target: SocketAddr) -> Result<IpAddr, MetricError> {
    let bind: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(bind)?;
    socket.set_nonblocking(true)?;
    socket.connect(target)?;

    let local = socket.local_addr()?.ip();
    if local.is_unspecified() {
        return Err(MetricError::NoRoute);
    }
    Ok(local)
}
