use std::{io, net::IpAddr, net::SocketAddr};

use tokio::net::TcpListener;

/// Binds `host:port`, moving to the next port while the address is in use.
///
/// At most `attempts` ports are tried. Errors other than `AddrInUse` are
/// returned immediately.
pub async fn bind_with_fallback(host: IpAddr, port: u16, attempts: u16) -> io::Result<TcpListener> {
    let mut port = port;
    let mut remaining = attempts.max(1);

    loop {
        match TcpListener::bind(SocketAddr::new(host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && remaining > 1 => {
                let Some(next) = port.checked_add(1) else {
                    return Err(e);
                };
                tracing::warn!(port, next, "port in use, trying next port");
                port = next;
                remaining -= 1;
            }
            Err(e) => return Err(e),
        }
    }
}
