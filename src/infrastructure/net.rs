//! Network probing

use std::net::{IpAddr, UdpSocket};

use crate::error::BallastResult;

/// Address of the local interface that routes to `peer`.
///
/// Connecting a UDP socket sends nothing; it only asks the kernel to pick a
/// route, whose source address is the one containers can reach us on.
pub fn local_ip_towards(peer: &str) -> BallastResult<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))?;
    socket.connect((peer, 53))?;
    Ok(socket.local_addr()?.ip())
}
