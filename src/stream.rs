//! Streaming Responder
//!
//! Writes a sequence of serializable items as one JSON array, chunk by
//! chunk, into a bounded channel that backs the HTTP response body.
//!
//! The channel is the flow-control boundary: `send().await` parks the
//! producer while the body has not drained earlier chunks, and fails once
//! the body has been dropped because the client went away.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::{Body, Bytes};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

use crate::error::StoreError;

/// Chunk carried from the producer to the response body. An `Err` makes the
/// HTTP layer abort the connection.
pub type Chunk = Result<Bytes, io::Error>;

/// Producer half of a streamed body.
pub type ChunkSender = mpsc::Sender<Chunk>;

// == Stream Outcome ==
/// How a streamed response ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The closing bracket was written
    Completed { items: usize },
    /// The consumer went away; nothing further was written
    Disconnected { items: usize },
    /// Producing an item failed after the response had started
    Failed { items: usize },
}

// == Stream Tally ==
/// Running count of finished streams by outcome.
#[derive(Debug, Default)]
pub struct StreamTally {
    completed: AtomicUsize,
    disconnected: AtomicUsize,
    failed: AtomicUsize,
}

impl StreamTally {
    pub fn record(&self, outcome: StreamOutcome) {
        let counter = match outcome {
            StreamOutcome::Completed { .. } => &self.completed,
            StreamOutcome::Disconnected { .. } => &self.disconnected,
            StreamOutcome::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn disconnected(&self) -> usize {
        self.disconnected.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

// == Body Channel ==
/// Creates a body backed by a channel holding at most `buffer` chunks.
pub fn body_channel(buffer: usize) -> (ChunkSender, Body) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (tx, Body::from_stream(ReceiverStream::new(rx)))
}

// == Stream JSON Array ==
/// Streams `items` as `[item0,item1,...]` into `sink`.
///
/// The opening bracket goes out before the first item is pulled. Each item
/// is serialized and sent with its separating comma as a single chunk, and
/// the next item is not produced until that chunk has been accepted. If the
/// sink closes the producer stops quietly. If an item fails, an error chunk
/// is sent so the connection is torn down instead of ending with a
/// truncated but well-formed body.
pub async fn stream_json_array<I, T>(items: I, sink: ChunkSender) -> StreamOutcome
where
    I: IntoIterator<Item = Result<T, StoreError>>,
    T: Serialize,
{
    let mut written = 0;

    if sink.send(Ok(Bytes::from_static(b"["))).await.is_err() {
        debug!("Client disconnected before the stream started");
        return StreamOutcome::Disconnected { items: 0 };
    }

    for item in items {
        if sink.is_closed() {
            debug!(items = written, "Client disconnected mid-stream");
            return StreamOutcome::Disconnected { items: written };
        }

        let chunk = match item
            .map_err(|e| io::Error::other(e.to_string()))
            .and_then(|value| encode_item(&value, written == 0))
        {
            Ok(chunk) => chunk,
            Err(cause) => {
                error!(error = %cause, items = written, "Aborting stream after partial write");
                // Best effort: if the sink is already gone there is nobody to tell.
                let _ = sink.send(Err(cause)).await;
                return StreamOutcome::Failed { items: written };
            }
        };

        if sink.send(Ok(chunk)).await.is_err() {
            debug!(items = written, "Client disconnected mid-stream");
            return StreamOutcome::Disconnected { items: written };
        }
        written += 1;
    }

    if sink.send(Ok(Bytes::from_static(b"]"))).await.is_err() {
        debug!(items = written, "Client disconnected before the closing bracket");
        return StreamOutcome::Disconnected { items: written };
    }

    StreamOutcome::Completed { items: written }
}

fn encode_item<T: Serialize>(value: &T, first: bool) -> Result<Bytes, io::Error> {
    let mut buf = Vec::with_capacity(128);
    if !first {
        buf.push(b',');
    }
    serde_json::to_writer(&mut buf, value)?;
    Ok(Bytes::from(buf))
}
