//! OSC UDP server
//!
//! Datagrams are handled one at a time: a message (or every message of a
//! bundle) is fully dispatched, bridge calls included, before the next
//! datagram is read.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use osc2hue_core::CommandError;
use rosc::{OscMessage, OscPacket};
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use super::address::validate_address;
use super::types::osc_args_to_scalars;
use crate::hue::LightBridge;
use crate::router::CommandRouter;
use crate::Result;

/// Pause after a failed receive so a persistent socket error cannot spin
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// UDP listener feeding a [`CommandRouter`]
pub struct OscServer {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl OscServer {
    /// Bind to `host:port` (port 0 picks a free port)
    pub async fn bind(host: &str, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind((host, port)).await?;
        let local_addr = socket.local_addr()?;
        info!("OSC server listening on {}", local_addr);
        Ok(Self { socket, local_addr })
    }

    /// Address the socket is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` resolves
    pub async fn run_until<B, F>(&self, router: &CommandRouter<B>, shutdown: F) -> Result<()>
    where
        B: LightBridge,
        F: Future<Output = ()>,
    {
        let mut buf = vec![0u8; rosc::decoder::MTU];
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping OSC server");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => {
                    match received {
                        Ok((size, peer)) => handle_datagram(router, &buf[..size], peer).await,
                        // e.g. ICMP port unreachable surfacing on some platforms
                        Err(e) => recv_failed(e).await,
                    }
                }
            }
        }
    }
}

async fn recv_failed(error: std::io::Error) {
    warn!("OSC receive error: {}", error);
    tokio::time::sleep(RECV_ERROR_BACKOFF).await;
}

async fn handle_datagram<B: LightBridge>(router: &CommandRouter<B>, data: &[u8], peer: SocketAddr) {
    let packet = match rosc::decoder::decode_udp(data) {
        Ok((_, packet)) => packet,
        Err(e) => {
            warn!("Dropping undecodable OSC packet from {}: {:?}", peer, e);
            return;
        }
    };

    for message in flatten(packet) {
        handle_message(router, message).await;
    }
}

async fn handle_message<B: LightBridge>(router: &CommandRouter<B>, message: OscMessage) {
    if let Err(e) = validate_address(&message.addr) {
        warn!("{}", e);
        return;
    }

    let args = osc_args_to_scalars(&message.args);
    debug!("OSC {} {:?}", message.addr, args);

    // Command failures are logged by the router
    if let Err(CommandError::UnknownAddress(address)) = router.dispatch(&message.addr, &args).await {
        debug!("No handler for OSC address {}", address);
    }
}

/// Messages of a packet in order, bundles expanded depth-first
pub fn flatten(packet: OscPacket) -> Vec<OscMessage> {
    let mut messages = Vec::new();
    let mut stack = vec![packet];

    while let Some(packet) = stack.pop() {
        match packet {
            OscPacket::Message(message) => messages.push(message),
            OscPacket::Bundle(bundle) => stack.extend(bundle.content.into_iter().rev()),
        }
    }
    messages
}
