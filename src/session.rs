//! Sensor read session.
//!
//! [`SensorReader`] owns the lifecycle the core stays out of: a spawned read
//! loop pulls bytes from an async source, runs them through a
//! [`StreamSynchronizer`], and hands every outcome to the caller over a
//! bounded channel. Port discovery, baud configuration, and reconnection stay
//! with the caller; any `AsyncRead` works as the source.
//!
//! # Example
//!
//! ```
//! use rangewire::protocol::encode_distance;
//! use rangewire::session::SensorReader;
//! use rangewire::transport::ScriptedSource;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rangewire::error::Result<()> {
//! let source = ScriptedSource::from_chunks(vec![encode_distance(150).to_vec()]);
//! let mut reader = SensorReader::spawn(source);
//!
//! while let Some(outcome) = reader.next_outcome().await {
//!     println!("{:?}", outcome);
//! }
//! reader.finish().await?;
//! # Ok(())
//! # }
//! ```

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{RangewireError, Result};
use crate::protocol::{DecodeOutcome, StreamSynchronizer};

/// Default read buffer size, sized for slow serial links.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64;

/// Default capacity of the outcome channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 128;

/// Configuration for a [`SensorReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Bytes requested from the source per read.
    pub read_buffer_size: usize,
    /// Bounded capacity of the outcome channel.
    pub channel_capacity: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// A running sensor session.
///
/// Outcomes arrive in the exact order their windows appear in the stream.
/// The session ends when the source reaches end of stream, reports a fault,
/// or the reader is dropped.
pub struct SensorReader {
    /// Outcome receiver; closing it cancels the session.
    outcomes: mpsc::Receiver<DecodeOutcome>,
    /// Read loop task; resolves with the session-level result.
    task: JoinHandle<Result<()>>,
}

impl SensorReader {
    /// Spawn a session over the given byte source with default configuration.
    pub fn spawn<R>(source: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        Self::spawn_with_config(source, ReaderConfig::default())
    }

    /// Spawn a session with explicit configuration.
    pub fn spawn_with_config<R>(source: R, config: ReaderConfig) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(config.channel_capacity);
        let task = tokio::spawn(read_loop(source, tx, config.read_buffer_size));

        Self { outcomes: rx, task }
    }

    /// Receive the next outcome.
    ///
    /// Returns `None` once the session has ended (source end of stream, a
    /// transport fault, or cancellation). Use [`finish`](Self::finish) to
    /// learn which.
    pub async fn next_outcome(&mut self) -> Option<DecodeOutcome> {
        self.outcomes.recv().await
    }

    /// Wait for the read loop to end and surface its transport-level result.
    ///
    /// Closes the outcome channel first, so calling this mid-stream cancels
    /// the session. Per-frame rejections never show up here; they are
    /// delivered as outcomes.
    pub async fn finish(self) -> Result<()> {
        drop(self.outcomes);
        self.task.await?
    }
}

/// Pump bytes from the source through a synchronizer until end of stream,
/// transport fault, or cancellation.
///
/// A fault aborts the loop immediately: buffered trailing bytes are dropped
/// without emitting a partial outcome.
async fn read_loop<R>(
    mut source: R,
    tx: mpsc::Sender<DecodeOutcome>,
    read_buffer_size: usize,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut synchronizer = StreamSynchronizer::new();
    let mut buf = vec![0u8; read_buffer_size];

    loop {
        let n = match source.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!("byte source closed, ending session");
                return Ok(());
            }
            Ok(n) => n,
            Err(e) => {
                tracing::error!("transport fault: {}", e);
                return Err(RangewireError::Io(e));
            }
        };

        for outcome in synchronizer.feed(&buf[..n]) {
            // A closed channel means the caller hung up; not a fault.
            if tx.send(outcome).await.is_err() {
                tracing::debug!("outcome receiver dropped, ending session");
                return Ok(());
            }
        }
    }
}
