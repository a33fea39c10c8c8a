use std::io;
use std::net::UdpSocket;

fn is_addr_in_use(error: &io::Error) -> bool {
    // 48: macOS, 98: Linux, 10048: Windows
    error.kind() == io::ErrorKind::AddrInUse
        || matches!(error.raw_os_error(), Some(48) | Some(98) | Some(10048))
}

/// User-facing message for a failed bind on `port`.
pub fn bind_error_message(error: &io::Error, port: u16) -> String {
    if is_addr_in_use(error) {
        let next = port.checked_add(1).unwrap_or(super::DEFAULT_PORT);
        format!(
            "Port {} is already in use. Try a different port:\n    dev-server {}",
            port, next
        )
    } else {
        format!("Failed to start server on port {}: {}", port, error)
    }
}

/// IPv4 address other machines on the LAN can reach us at, or `localhost`.
///
/// Connecting a UDP socket sends nothing; it only selects the outbound
/// interface.
pub fn local_ip() -> String {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "localhost".to_string())
}
