//! Printer transport for sending ZPL documents
//!
//! Label printers accept raw ZPL on TCP port 9100. A connection is opened
//! once per batch, written to once per copy and closed at the end. Nothing is
//! read back from the printer: a document counts as sent once it is fully
//! written to the socket.

use std::fmt;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, warn};

use crate::error::{PrintError, PrintResult};
use crate::label::RenderedDocument;

/// Raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Address of a network label printer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrinterEndpoint {
    host: String,
    port: u16,
}

impl PrinterEndpoint {
    /// Create an endpoint on port 9100
    ///
    /// Fails with [`PrintError::InvalidConfig`] when the host is empty.
    pub fn new(host: &str) -> PrintResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Printer address is empty".to_string()));
        }

        Ok(Self {
            host: host.to_string(),
            port: DEFAULT_PORT,
        })
    }

    /// Create from a "host" or "host:port" string
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr = addr.trim();
        match addr.rsplit_once(':') {
            // Bare IPv6 addresses contain colons too
            Some((host, port)) if !host.contains(':') => {
                let port = port
                    .parse()
                    .map_err(|_| PrintError::InvalidAddress(addr.to_string()))?;
                Ok(Self::new(host)?.with_port(port))
            }
            _ => Self::new(addr),
        }
    }

    /// Use a port other than 9100
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for PrinterEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Trait for printer transports
///
/// A transport opens connections; a batch owns the connection it opened.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Connection: Connection;

    /// Open a connection to the printer
    async fn open(&self, endpoint: &PrinterEndpoint) -> PrintResult<Self::Connection>;
}

/// An open printer connection
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Write a whole document, consuming it
    async fn send(&mut self, document: RenderedDocument) -> PrintResult<()>;

    /// Close the connection. Closing twice is a no-op.
    async fn close(&mut self);

    fn is_open(&self) -> bool;
}

/// Network printer transport (TCP port 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    timeout: Duration,
}

impl NetworkPrinter {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for NetworkPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for NetworkPrinter {
    type Connection = NetworkConnection;

    #[instrument(skip(self), fields(addr = %endpoint))]
    async fn open(&self, endpoint: &PrinterEndpoint) -> PrintResult<NetworkConnection> {
        info!("Connecting to printer");

        let connect = TcpStream::connect((endpoint.host(), endpoint.port()));
        let stream = tokio::time::timeout(self.timeout, connect)
            .await
            .map_err(|_| PrintError::Connection(format!("{}: connection timed out", endpoint)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", endpoint, e)))?;

        info!("Connected");

        Ok(NetworkConnection {
            stream: Some(stream),
            endpoint: endpoint.clone(),
        })
    }
}

/// TCP connection to a network printer
#[derive(Debug)]
pub struct NetworkConnection {
    stream: Option<TcpStream>,
    endpoint: PrinterEndpoint,
}

impl Connection for NetworkConnection {
    #[instrument(skip(self, document), fields(addr = %self.endpoint, bytes = document.len()))]
    async fn send(&mut self, document: RenderedDocument) -> PrintResult<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| PrintError::Write(format!("{}: connection is closed", self.endpoint)))?;

        stream
            .write_all(document.as_bytes())
            .await
            .map_err(|e| PrintError::Write(format!("{}: {}", self.endpoint, e)))?;
        stream
            .flush()
            .await
            .map_err(|e| PrintError::Write(format!("{}: {}", self.endpoint, e)))?;

        debug!("Document written");
        Ok(())
    }

    #[instrument(skip(self), fields(addr = %self.endpoint))]
    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                warn!(error = %e, "Shutdown failed, dropping connection");
            }
            info!("Connection closed");
        }
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}
