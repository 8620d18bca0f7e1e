//! One command, one response, one TCP connection.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::GripperConfig;
use crate::error::{Result, RobotiqError};

/// Answers are a handful of bytes, a single read of this size holds any of them.
const READ_BUFFER_SIZE: usize = 1024;

/// A request/response exchange with the controller.
///
/// Implementations perform exactly one exchange per call and never retry.
pub trait Transport {
    /// Send `command` and return the answer without its line terminator.
    fn communicate(&self, command: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Opens a fresh TCP connection for every command.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    host: String,
    port: u16,
    read_timeout: Option<Duration>,
}

impl TcpTransport {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            read_timeout: None,
        }
    }

    pub fn from_config(config: &GripperConfig) -> Self {
        Self::new(config.host.clone(), config.port).read_timeout(config.read_timeout_duration())
    }

    /// Bound the wait for an answer, `None` waits forever.
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn read_chunk(&self, stream: &mut TcpStream, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, stream.read(buf))
                .await
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("no answer within {:?}", timeout),
                    )
                })?,
            None => stream.read(buf).await,
        }
    }
}

impl Transport for TcpTransport {
    async fn communicate(&self, command: &str) -> Result<String> {
        let command = command.trim();
        // the stream is dropped, and the socket closed, on every return path
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        log::debug!("-> {}", command);
        stream.write_all(format!("{}\n", command).as_bytes()).await?;

        let mut buf = [0u8; READ_BUFFER_SIZE];
        let n = self.read_chunk(&mut stream, &mut buf).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("connection closed before answering `{}`", command),
            )
            .into());
        }

        let text = std::str::from_utf8(&buf[..n])
            .map_err(|_| RobotiqError::protocol(command, &String::from_utf8_lossy(&buf[..n])))?;
        let response = text.strip_suffix('\n').unwrap_or(text);
        log::debug!("<- {}", response);
        Ok(response.to_owned())
    }
}
