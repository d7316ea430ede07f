use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{info, warn};

use crate::config::ConnectionConfig;
use crate::downsample;
use crate::net::codec;
use crate::store::SeriesStore;
use crate::types::LinkEvent;

/// Per-read cap, fixed by the gateway protocol.
const READ_BUF_LEN: usize = 1024;
/// First handshake token, sent verbatim.
const HANDSHAKE_TOKEN: &[u8] = b"app";
/// Rejection reply at either handshake step; anything else is an ack.
const HANDSHAKE_REJECT: &[u8] = b"fail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStage {
    App,
    Device,
}

impl fmt::Display for HandshakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeStage::App => write!(f, "app"),
            HandshakeStage::Device => write!(f, "device"),
        }
    }
}

/// 传输客户端错误类型
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to {addr}: {source}")]
    Connection {
        addr: String,
        source: std::io::Error,
    },
    #[error("gateway rejected the {stage} handshake step")]
    HandshakeRejected { stage: HandshakeStage },
    #[error("shutdown requested before the gateway replied")]
    Interrupted,
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
}

/// One blocking read from the sensor link.
#[derive(Debug)]
pub enum Chunk {
    /// Raw bytes of (at most) one frame.
    Payload(Vec<u8>),
    /// Nothing arrived; the caller retries.
    Idle,
}

/// The single blocking-read seam of the ingestion loop. The live socket
/// implements it; tests drive the loop with scripted sources, and a backoff
/// strategy can be swapped in here without touching the protocol contract.
pub trait RawSource {
    fn recv_chunk(&mut self) -> Result<Chunk, ClientError>;
}

/// An established socket to the sensor gateway.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    buf: [u8; READ_BUF_LEN],
}

impl Connection {
    /// Opens the TCP connection. A read timeout keeps subsequent blocking
    /// reads responsive to the shutdown flag; timeouts surface as idle
    /// chunks, so the protocol-visible retry behavior is unchanged.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ClientError> {
        let addr = format!("{}:{}", config.host, config.port);
        let stream = TcpStream::connect(&addr)
            .map_err(|source| ClientError::Connection { addr, source })?;
        stream
            .set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms.max(1))))?;
        Ok(Self {
            stream,
            buf: [0; READ_BUF_LEN],
        })
    }

    /// Fixed two-step identification exchange: the literal `app` token, then
    /// the device id. A `fail` reply at either step closes the socket and
    /// ends the session; any other reply counts as an acknowledgment.
    pub fn handshake(
        &mut self,
        device_id: &str,
        shutdown: &AtomicBool,
    ) -> Result<(), ClientError> {
        self.exchange(HANDSHAKE_TOKEN, HandshakeStage::App, shutdown)?;
        self.exchange(device_id.as_bytes(), HandshakeStage::Device, shutdown)?;
        Ok(())
    }

    fn exchange(
        &mut self,
        token: &[u8],
        stage: HandshakeStage,
        shutdown: &AtomicBool,
    ) -> Result<(), ClientError> {
        self.stream.write_all(token)?;
        let reply = self.read_reply(shutdown)?;
        if reply == HANDSHAKE_REJECT {
            let _ = self.stream.shutdown(Shutdown::Both);
            return Err(ClientError::HandshakeRejected { stage });
        }
        Ok(())
    }

    /// Blocks until the gateway replies; the handshake has no idle notion.
    /// The shutdown flag is rechecked between read timeouts so a gateway
    /// that accepts the connection but never answers cannot pin the
    /// ingestion thread past process exit.
    fn read_reply(&mut self, shutdown: &AtomicBool) -> Result<Vec<u8>, ClientError> {
        loop {
            match self.stream.read(&mut self.buf) {
                Ok(n) => return Ok(self.buf[..n].to_vec()),
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    if shutdown.load(Ordering::Relaxed) {
                        return Err(ClientError::Interrupted);
                    }
                }
                Err(e) => return Err(ClientError::Io(e)),
            }
        }
    }
}

impl RawSource for Connection {
    /// An empty read means "no data yet" and is retried by the caller. The
    /// protocol gives no way to tell an idle link from a closed one, so a
    /// true disconnect after handshake leaves the loop spinning on idle
    /// chunks. Known gap, preserved; see the ingest-loop tests.
    fn recv_chunk(&mut self) -> Result<Chunk, ClientError> {
        match self.stream.read(&mut self.buf) {
            Ok(0) => Ok(Chunk::Idle),
            Ok(n) => Ok(Chunk::Payload(self.buf[..n].to_vec())),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Ok(Chunk::Idle)
            }
            Err(e) => Err(ClientError::Io(e)),
        }
    }
}

/// The continuous ingestion loop: payload → decode → downsample → store.
///
/// A malformed frame is logged and skipped; the loop never dies on one bad
/// message. A terminal socket error is fatal and propagates to the caller.
pub fn ingest_loop<S: RawSource>(
    source: &mut S,
    store: &SeriesStore,
    events: &Sender<LinkEvent>,
    shutdown: &AtomicBool,
) -> Result<(), ClientError> {
    let mut streaming = false;
    while !shutdown.load(Ordering::Relaxed) {
        match source.recv_chunk()? {
            Chunk::Idle => continue,
            Chunk::Payload(raw) => match codec::decode(&raw) {
                Ok(batch) => {
                    let reduced = downsample::reduce(batch);
                    store.append(&reduced);
                    if !streaming {
                        streaming = true;
                        let _ = events.try_send(LinkEvent::Streaming);
                    }
                }
                Err(e) => warn!("Dropping malformed frame: {}", e),
            },
        }
    }
    Ok(())
}

/// Entry point of the ingestion thread: connect, handshake, then ingest
/// until shutdown. No reconnection; any error here is fatal to the actor
/// and the caller reports it to the operator.
pub fn run_sensor_client(
    config: &ConnectionConfig,
    store: SeriesStore,
    events: Sender<LinkEvent>,
    shutdown: Arc<AtomicBool>,
) -> Result<(), ClientError> {
    let _ = events.try_send(LinkEvent::Connecting);
    let mut connection = Connection::connect(config)?;
    info!(
        "Connected to sensor gateway at {}:{}",
        config.host, config.port
    );

    match connection.handshake(&config.device_id, &shutdown) {
        Ok(()) => {}
        Err(ClientError::Interrupted) => {
            info!("Shutdown requested during handshake");
            return Ok(());
        }
        Err(e) => return Err(e),
    }
    info!("Handshake accepted for device {}", config.device_id);
    let _ = events.try_send(LinkEvent::Connected);

    ingest_loop(&mut connection, &store, &events, &shutdown)
}
