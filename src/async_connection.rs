//! Stream connection for tokio tasks.
//!
//! Every operation runs the blocking call on tokio's blocking pool so the
//! calling task yields while the server works.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;

use crate::connection::StreamConnection;
use crate::error::{Result, StreamError};

#[derive(Clone)]
pub struct AsyncStreamConnection {
    inner: Arc<Mutex<StreamConnection>>,
}

impl AsyncStreamConnection {
    pub fn new(connection: StreamConnection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    async fn run<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut StreamConnection) -> Result<R> + Send + 'static,
    {
        let inner = self.inner.clone();

        tokio::task::spawn_blocking(move || {
            let mut connection = inner.blocking_lock();
            op(&mut connection)
        })
        .await
        .map_err(|e| StreamError::Runtime(e.to_string()))?
    }

    pub async fn connect(&self) -> Result<()> {
        self.run(|connection| connection.connect()).await
    }

    /// Hands `data` over to the blocking pool and writes it.
    pub async fn write(&self, data: Bytes) -> Result<usize> {
        self.run(move |connection| connection.write(&data)).await
    }

    pub async fn drain(&self) -> Result<()> {
        self.run(|connection| connection.drain()).await
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.run(|connection| {
            connection.disconnect();
            Ok(())
        })
        .await
    }

    pub async fn is_connected(&self) -> bool {
        self.inner.lock().await.is_connected()
    }

    /// Direct access to the wrapped connection, e.g. to change its configuration.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, StreamConnection> {
        self.inner.lock().await
    }
}
