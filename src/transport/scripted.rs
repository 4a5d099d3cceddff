//! Scripted in-memory byte source.
//!
//! Plays back a fixed script of chunks and I/O errors, then reports end of
//! stream. Used by tests to exercise sessions without a physical port.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// One step of a scripted read sequence.
pub enum ScriptStep {
    /// Deliver these bytes, split across reads if they exceed the caller's buffer.
    Chunk(Vec<u8>),
    /// Fail the read with this error kind.
    Error(io::ErrorKind),
}

/// An `AsyncRead` that replays a script, then signals end of stream.
pub struct ScriptedSource {
    steps: VecDeque<ScriptStep>,
}

impl ScriptedSource {
    /// Create a source from a full script.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// Create a source that delivers the given chunks and then ends.
    pub fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self::new(chunks.into_iter().map(ScriptStep::Chunk).collect())
    }
}

impl AsyncRead for ScriptedSource {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.steps.pop_front() {
            Some(ScriptStep::Chunk(mut chunk)) => {
                if chunk.len() > buf.remaining() {
                    let rest = chunk.split_off(buf.remaining());
                    self.steps.push_front(ScriptStep::Chunk(rest));
                }
                buf.put_slice(&chunk);
                Poll::Ready(Ok(()))
            }
            Some(ScriptStep::Error(kind)) => Poll::Ready(Err(kind.into())),
            None => Poll::Ready(Ok(())),
        }
    }
}
