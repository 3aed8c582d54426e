//! In-process loopback transport.
//!
//! Accepts every stream and keeps what was sent to it. Failures can be queued
//! for the next open, send or drain, which makes it the test double for
//! connection code.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::code::ErrorCode;
use crate::config::Direction;
use crate::format::{BufferAttr, ChannelMap, SampleSpec};

use super::{OpenRequest, Transport, TransportStream};

/// What the transport saw of a single stream.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub id: usize,
    pub server: Option<String>,
    pub client_name: String,
    pub direction: Direction,
    pub device: Option<String>,
    pub description: String,
    pub sample_spec: SampleSpec,
    pub channel_map: Option<ChannelMap>,
    pub buffer_attr: Option<BufferAttr>,
    pub data: Vec<u8>,
    pub drains: usize,
    pub closed: bool,
}

#[derive(Default)]
struct MemoryState {
    sessions: Vec<SessionRecord>,
    fail_open: Option<ErrorCode>,
    fail_send: Option<ErrorCode>,
    fail_drain: Option<ErrorCode>,
    closes: usize,
}

type SharedState = Arc<Mutex<MemoryState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct MemoryTransport {
    state: SharedState,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for inspecting and steering the transport after it has been
    /// moved into a connection.
    pub fn inspector(&self) -> MemoryInspector {
        MemoryInspector {
            state: self.state.clone(),
        }
    }
}

impl Transport for MemoryTransport {
    fn open(&self, request: &OpenRequest<'_>) -> Result<Box<dyn TransportStream>, ErrorCode> {
        let mut state = lock(&self.state);

        if let Some(code) = state.fail_open.take() {
            return Err(code);
        }

        let id = state.sessions.len();
        state.sessions.push(SessionRecord {
            id,
            server: request.server.map(str::to_string),
            client_name: request.client_name.to_string(),
            direction: request.direction,
            device: request.device.map(str::to_string),
            description: request.description.to_string(),
            sample_spec: request.sample_spec,
            channel_map: request.channel_map.cloned(),
            buffer_attr: request.buffer_attr.copied(),
            data: Vec::new(),
            drains: 0,
            closed: false,
        });

        debug!("Opened memory stream {id} for {}", request.client_name);

        Ok(Box::new(MemoryStream {
            id,
            state: self.state.clone(),
        }))
    }
}

struct MemoryStream {
    id: usize,
    state: SharedState,
}

impl TransportStream for MemoryStream {
    fn send(&mut self, bytes: &[u8]) -> Result<usize, ErrorCode> {
        let mut state = lock(&self.state);

        if let Some(code) = state.fail_send.take() {
            return Err(code);
        }

        state.sessions[self.id].data.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn wait_until_rendered(&mut self) -> Result<(), ErrorCode> {
        let mut state = lock(&self.state);

        if let Some(code) = state.fail_drain.take() {
            return Err(code);
        }

        state.sessions[self.id].drains += 1;
        Ok(())
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        state.sessions[self.id].closed = true;
        state.closes += 1;

        debug!("Closed memory stream {}", self.id);
    }
}

#[derive(Clone)]
pub struct MemoryInspector {
    state: SharedState,
}

impl MemoryInspector {
    pub fn sessions(&self) -> Vec<SessionRecord> {
        lock(&self.state).sessions.clone()
    }

    pub fn session(&self, id: usize) -> Option<SessionRecord> {
        lock(&self.state).sessions.get(id).cloned()
    }

    pub fn last_session(&self) -> Option<SessionRecord> {
        lock(&self.state).sessions.last().cloned()
    }

    /// Streams opened and not yet closed.
    pub fn open_streams(&self) -> usize {
        lock(&self.state)
            .sessions
            .iter()
            .filter(|session| !session.closed)
            .count()
    }

    /// Total number of close operations, one per opened stream at most.
    pub fn closes(&self) -> usize {
        lock(&self.state).closes
    }

    pub fn fail_next_open(&self, code: ErrorCode) {
        lock(&self.state).fail_open = Some(code);
    }

    pub fn fail_next_send(&self, code: ErrorCode) {
        lock(&self.state).fail_send = Some(code);
    }

    pub fn fail_next_drain(&self, code: ErrorCode) {
        lock(&self.state).fail_drain = Some(code);
    }
}
