//! Chunked delivery of rendered output.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::SinkError;

/// Default number of chunks buffered between a search and its reader.
pub const DEFAULT_CHUNK_CAPACITY: usize = 256;

/// One unit of output delivered to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Rendered, HTML-escaped content.
    Content(String),
    /// End of stream; nothing follows.
    Complete,
}

impl Chunk {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Ordered, append-only consumer of rendered chunks.
///
/// Appended chunks are only guaranteed to be delivered after `flush`.
/// `complete` is terminal and idempotent.
#[async_trait]
pub trait ChunkSink: Send {
    /// Queue a chunk for delivery.
    async fn append_chunk(&mut self, chunk: String) -> Result<(), SinkError>;

    /// Deliver every queued chunk.
    async fn flush(&mut self) -> Result<(), SinkError>;

    /// Flush and signal end of stream.
    async fn complete(&mut self) -> Result<(), SinkError>;
}

/// Stream of chunks produced by a [`ChannelSink`].
pub type ChunkStream = ReceiverStream<Chunk>;

/// Sink backed by a bounded channel; the paired [`ChunkStream`] is the
/// reading side handed to the transport.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Chunk>,
    pending: Vec<String>,
    completed: bool,
}

/// Create a connected sink and stream.
#[must_use]
pub fn chunk_channel(capacity: usize) -> (ChannelSink, ChunkStream) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let sink = ChannelSink {
        tx,
        pending: Vec::new(),
        completed: false,
    };
    (sink, ReceiverStream::new(rx))
}

impl ChannelSink {
    async fn send(&self, chunk: Chunk) -> Result<(), SinkError> {
        self.tx.send(chunk).await.map_err(|_| SinkError::Closed)
    }
}

#[async_trait]
impl ChunkSink for ChannelSink {
    async fn append_chunk(&mut self, chunk: String) -> Result<(), SinkError> {
        if self.completed || self.tx.is_closed() {
            return Err(SinkError::Closed);
        }
        self.pending.push(chunk);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        for chunk in std::mem::take(&mut self.pending) {
            self.send(Chunk::Content(chunk)).await?;
        }
        Ok(())
    }

    async fn complete(&mut self) -> Result<(), SinkError> {
        if self.completed {
            return Ok(());
        }
        self.flush().await?;
        self.completed = true;
        self.send(Chunk::Complete).await
    }
}
