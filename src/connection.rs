//! Blocking stream connection to an audio server.
//!
//! A `StreamConnection` is built from a configuration without any I/O, opened
//! with `connect`, fed with `write`, flushed with `drain` and closed with
//! `disconnect` or by dropping it.

use crate::code::ErrorCode;
use crate::config::{Direction, StreamConfig};
use crate::error::{Result, StreamError};
use crate::format::{BufferAttr, ChannelMap, SampleSpec};
use crate::transport::{OpenRequest, Transport, TransportStream};

pub struct StreamConnection {
    config: StreamConfig,
    transport: Box<dyn Transport>,
    /// Present iff connected
    stream: Option<Box<dyn TransportStream>>,
    /// Spec negotiated by the last successful `connect`
    sample_spec: Option<SampleSpec>,
    last_error: Option<ErrorCode>,
}

/// Fields of a configuration after validation.
struct Validated<'a> {
    client_name: &'a str,
    direction: Direction,
    description: &'a str,
    sample_spec: SampleSpec,
    channel_map: Option<ChannelMap>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

impl StreamConnection {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self::with_config(transport, StreamConfig::default())
    }

    /// Stores `config` as is. Nothing is validated until `connect`.
    pub fn with_config<T: Transport + 'static>(transport: T, config: StreamConfig) -> Self {
        Self {
            config,
            transport: Box::new(transport),
            stream: None,
            sample_spec: None,
            last_error: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// The most recent diagnostic code reported by the transport.
    pub fn last_error(&self) -> Option<ErrorCode> {
        self.last_error
    }

    /// Spec of the open stream, `None` while disconnected.
    pub fn sample_spec(&self) -> Option<SampleSpec> {
        self.stream.as_ref().and(self.sample_spec)
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: StreamConfig) -> Result<()> {
        self.update(|current| *current = config)
    }

    fn update(&mut self, apply: impl FnOnce(&mut StreamConfig)) -> Result<()> {
        if self.is_connected() {
            return Err(StreamError::ConfigurationLocked);
        }

        apply(&mut self.config);
        Ok(())
    }

    pub fn server(&self) -> Option<&str> {
        self.config.server.as_deref()
    }

    pub fn set_server(&mut self, server: Option<String>) -> Result<()> {
        self.update(|config| config.server = server)
    }

    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.update(|config| config.name = Some(name))
    }

    pub fn direction(&self) -> Option<&str> {
        self.config.direction.as_deref()
    }

    /// Accepts a `Direction` or its name. Names are checked on `connect`.
    pub fn set_direction(&mut self, direction: impl Into<String>) -> Result<()> {
        let direction = direction.into();
        self.update(|config| config.direction = Some(direction))
    }

    pub fn device(&self) -> Option<&str> {
        self.config.device.as_deref()
    }

    pub fn set_device(&mut self, device: Option<String>) -> Result<()> {
        self.update(|config| config.device = device)
    }

    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        self.update(|config| config.description = Some(description))
    }

    pub fn set_sample_format(&mut self, format: impl Into<String>) -> Result<()> {
        let format = format.into();
        self.update(|config| config.sample_format = Some(format))
    }

    pub fn set_rate(&mut self, rate: u32) -> Result<()> {
        self.update(|config| config.rate = Some(rate))
    }

    pub fn set_channels(&mut self, channels: u8) -> Result<()> {
        self.update(|config| config.channels = Some(channels))
    }

    pub fn set_channel_map(&mut self, channel_map: Option<Vec<String>>) -> Result<()> {
        self.update(|config| config.channel_map = channel_map)
    }

    pub fn set_buffer_attr(&mut self, buffer_attr: Option<BufferAttr>) -> Result<()> {
        self.update(|config| config.buffer_attr = buffer_attr)
    }

    fn validate(&self) -> Result<Validated<'_>> {
        let config = &self.config;

        let client_name = non_empty(&config.name).ok_or(StreamError::MissingName)?;
        let direction: Direction = config
            .direction
            .as_deref()
            .ok_or(StreamError::MissingDirection)?
            .parse()?;
        let description = non_empty(&config.description).ok_or(StreamError::MissingDescription)?;

        let sample_spec = SampleSpec::resolve(
            config.sample_format.as_deref(),
            config.rate,
            config.channels,
        )?;

        let channel_map = config
            .channel_map
            .as_deref()
            .map(|names| ChannelMap::parse(names, sample_spec.channels))
            .transpose()?;

        if let Some(buffer_attr) = &config.buffer_attr {
            buffer_attr.validate()?;
        }

        Ok(Validated {
            client_name,
            direction,
            description,
            sample_spec,
            channel_map,
        })
    }

    /// Opens the stream.
    ///
    /// Fails without touching the transport if already connected or if the
    /// configuration is incomplete; the first failing check is reported.
    pub fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(StreamError::AlreadyConnected);
        }

        let validated = self.validate().inspect_err(|e| {
            debug!("Rejected connect: {e}");
        })?;

        let sample_spec = validated.sample_spec;
        let request = OpenRequest {
            server: non_empty(&self.config.server),
            client_name: validated.client_name,
            direction: validated.direction,
            device: non_empty(&self.config.device),
            description: validated.description,
            sample_spec,
            channel_map: validated.channel_map.as_ref(),
            buffer_attr: self.config.buffer_attr.as_ref(),
        };

        info!(
            "Connecting {} stream {:?} for {} ({})",
            request.direction, request.description, request.client_name, request.sample_spec
        );

        match self.transport.open(&request) {
            Ok(stream) => {
                self.sample_spec = Some(sample_spec);
                self.stream = Some(stream);
                Ok(())
            }
            Err(code) => {
                warn!("Error connecting to audio server: {code}");
                self.last_error = Some(code);
                Err(StreamError::ConnectionFailed(code))
            }
        }
    }

    /// Sends `data` to the server, blocking until it has been buffered.
    ///
    /// Returns the number of bytes accepted, always `data.len()`.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(StreamError::NotConnected)?;

        match stream.send(data) {
            Ok(accepted) => {
                trace!("Wrote {accepted} bytes");
                Ok(accepted)
            }
            Err(code) => {
                warn!("Error writing to audio server: {code}");
                self.last_error = Some(code);
                Err(StreamError::WriteError(code))
            }
        }
    }

    /// Blocks until everything written so far has been rendered.
    pub fn drain(&mut self) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(StreamError::NotConnected)?;

        stream.wait_until_rendered().map_err(|code| {
            warn!("Error draining stream: {code}");
            self.last_error = Some(code);
            StreamError::DrainError(code)
        })
    }

    /// Closes the stream if one is open. Calling it again is a no-op.
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            self.sample_spec = None;
            info!("Disconnected from audio server");
        }
    }
}

impl Drop for StreamConnection {
    fn drop(&mut self) {
        self.disconnect();
    }
}
