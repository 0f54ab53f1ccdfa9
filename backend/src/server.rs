//! Listener bootstrap with port retry
//!
//! Binds the first free port starting at the configured one. Each port that
//! is already in use moves the attempt to the next port, up to a fixed
//! number of retries.

use std::io;

use thiserror::Error;
use tokio::net::TcpListener;

/// Fatal errors while starting the server
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("No free port between {first} and {last}")]
    PortsExhausted { first: u16, last: u16 },

    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// Bind `host:base_port`, moving to the next port while ports are taken.
///
/// Makes at most `max_retries + 1` attempts. Returns the listener and the
/// port actually bound.
pub async fn bind_with_retry(
    host: &str,
    base_port: u16,
    max_retries: u16,
) -> Result<(TcpListener, u16), StartupError> {
    let mut port = base_port;
    let mut retries_left = max_retries;

    loop {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                let bound = listener.local_addr().map(|a| a.port()).unwrap_or(port);
                return Ok((listener, bound));
            }
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                let next = port.checked_add(1).filter(|_| retries_left > 0).ok_or(
                    StartupError::PortsExhausted {
                        first: base_port,
                        last: port,
                    },
                )?;
                tracing::warn!("Port {} in use, trying {}...", port, next);
                port = next;
                retries_left -= 1;
            }
            Err(source) => return Err(StartupError::Bind { port, source }),
        }
    }
}
