//! Byte-source seam.
//!
//! The decoder consumes an already-opened byte source as plain
//! [`AsyncRead`](tokio::io::AsyncRead); how the port is discovered,
//! configured, or reopened stays with the caller. A scripted in-memory source
//! is provided for tests.

mod scripted;

pub use scripted::{ScriptStep, ScriptedSource};
