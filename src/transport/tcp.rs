use std::io::Write;
use std::net::{Shutdown, TcpStream};

use hound::{SampleFormat as WavSampleFormat, WavSpec};

use crate::code::ErrorCode;
use crate::constants::DEFAULT_TCP_SERVER;
use crate::format::{SampleFormat, SampleSpec};

use super::{OpenRequest, Transport, TransportStream};

/// Streams playback audio to a network sink as an endless WAV file.
///
/// The sink sees a WAV header followed by raw PCM, which lets ordinary
/// players consume the stream. There is no return channel, so a drain only
/// confirms that the socket accepted the data.
#[derive(Clone, Debug, Default)]
pub struct TcpTransport {
    default_server: Option<String>,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `server` whenever a stream doesn't name one.
    pub fn with_default_server(server: impl Into<String>) -> Self {
        Self {
            default_server: Some(server.into()),
        }
    }
}

/// WAV description of a spec, if WAV can carry it.
pub(crate) fn wav_spec(spec: &SampleSpec) -> Option<WavSpec> {
    // WAV is little endian and has no G.711 support in hound
    let companded = matches!(spec.format, SampleFormat::ALaw | SampleFormat::ULaw);
    if companded || spec.format.is_big_endian() {
        return None;
    }

    let sample_format = if spec.format.is_float() {
        WavSampleFormat::Float
    } else {
        WavSampleFormat::Int
    };
    let bits_per_sample = (spec.format.sample_size() * 8) as u16;

    Some(WavSpec {
        channels: spec.channels as u16,
        sample_rate: spec.rate,
        bits_per_sample,
        sample_format,
    })
}

impl Transport for TcpTransport {
    fn open(&self, request: &OpenRequest<'_>) -> Result<Box<dyn TransportStream>, ErrorCode> {
        if !request.direction.is_output() {
            return Err(ErrorCode::NOT_SUPPORTED);
        }

        let spec = wav_spec(&request.sample_spec).ok_or(ErrorCode::NOT_SUPPORTED)?;

        let server = request
            .server
            .or(self.default_server.as_deref())
            .unwrap_or(DEFAULT_TCP_SERVER);

        let mut stream = TcpStream::connect(server).map_err(|e| {
            warn!("Failed to connect to {server}: {e}");
            ErrorCode::from(&e)
        })?;
        stream.set_nodelay(true).map_err(ErrorCode::from)?;

        // Write the wav header to the stream using the hound crate
        // This will allow players to recognize the stream as a wav file
        let header = spec.into_header_for_infinite_file();
        stream.write_all(&header[..]).map_err(ErrorCode::from)?;

        debug!(
            "Opened {} stream {:?} from {} to {server}",
            request.direction, request.description, request.client_name
        );

        Ok(Box::new(TcpStreamHandle {
            stream,
            server: server.to_string(),
        }))
    }
}

struct TcpStreamHandle {
    stream: TcpStream,
    server: String,
}

impl TransportStream for TcpStreamHandle {
    fn send(&mut self, bytes: &[u8]) -> Result<usize, ErrorCode> {
        self.stream.write_all(bytes).map_err(|e| {
            warn!("Failed to write samples to {}: {e}", self.server);
            ErrorCode::from(&e)
        })?;

        Ok(bytes.len())
    }

    /// Returns once the kernel has taken every byte. The sink never reports
    /// playback progress, so this can't confirm that the audio was rendered.
    fn wait_until_rendered(&mut self) -> Result<(), ErrorCode> {
        self.stream.flush().map_err(ErrorCode::from)
    }
}

impl Drop for TcpStreamHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            debug!("Failed to shut down connection to {}: {e}", self.server);
        }

        debug!("Closed stream to {}", self.server);
    }
}
