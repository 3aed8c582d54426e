use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs::{metadata, read_to_string};

use crate::error::StreamError;
use crate::format::BufferAttr;

/// Whether a stream sends audio to the server or receives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Playback,
    Record,
    Upload,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Playback => "playback",
            Direction::Record => "record",
            Direction::Upload => "upload",
        }
    }

    /// True when audio flows from the client to the server.
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Playback | Direction::Upload)
    }
}

impl FromStr for Direction {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playback" => Ok(Direction::Playback),
            "record" => Ok(Direction::Record),
            "upload" => Ok(Direction::Upload),
            _ => Err(StreamError::InvalidDirection(s.to_string())),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.name().to_string()
    }
}

/// Configuration of a stream connection.
///
/// Every field may be omitted; nothing is validated until the connection is
/// opened.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Server address, default server when absent
    pub server: Option<String>,

    /// Name of the client application
    pub name: Option<String>,

    /// One of "playback", "record" or "upload"
    pub direction: Option<String>,

    /// Sink or source name, default device when absent
    pub device: Option<String>,

    /// Human-readable label of the stream
    pub description: Option<String>,

    pub sample_format: Option<String>,
    pub rate: Option<u32>,
    pub channels: Option<u8>,
    pub channel_map: Option<Vec<String>>,
    pub buffer_attr: Option<BufferAttr>,
}

impl StreamConfig {
    pub fn new(
        name: impl Into<String>,
        direction: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            direction: Some(direction.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

pub async fn load(path: impl AsRef<Path>) -> Result<StreamConfig> {
    let path = path.as_ref();
    let config = read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: StreamConfig =
        toml::from_str(&config).with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(config)
}

/// Like [`load`], but a file that doesn't exist yields the default
/// configuration. Any other failure is returned.
pub async fn load_or_default(path: impl AsRef<Path>) -> Result<StreamConfig> {
    let path = path.as_ref();

    match metadata(path).await {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("{} not found, using default configuration", path.display());
            Ok(StreamConfig::default())
        }
        _ => load(path).await,
    }
}
