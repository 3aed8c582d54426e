use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use byteorder::{ByteOrder, LittleEndian};
use hound::WavWriter;

use crate::code::ErrorCode;
use crate::constants::DEFAULT_WAV_PATH;
use crate::format::SampleFormat;

use super::tcp::wav_spec;
use super::{OpenRequest, Transport, TransportStream};

/// Renders playback streams into WAV files.
///
/// The stream's device names the output file.
#[derive(Clone, Debug, Default)]
pub struct WavFileTransport {
    default_path: Option<PathBuf>,
}

impl WavFileTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes to `path` whenever a stream doesn't name a device.
    pub fn with_default_path(path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: Some(path.into()),
        }
    }
}

fn hound_error(e: hound::Error) -> ErrorCode {
    match e {
        hound::Error::IoError(e) => ErrorCode::from(&e),
        hound::Error::Unsupported => ErrorCode::NOT_SUPPORTED,
        hound::Error::TooWide => ErrorCode::INVALID,
        _ => ErrorCode::INTERNAL,
    }
}

impl Transport for WavFileTransport {
    fn open(&self, request: &OpenRequest<'_>) -> Result<Box<dyn TransportStream>, ErrorCode> {
        if !request.direction.is_output() {
            return Err(ErrorCode::NOT_SUPPORTED);
        }

        let spec = wav_spec(&request.sample_spec).ok_or(ErrorCode::NOT_SUPPORTED)?;

        let path = match request.device {
            Some(device) => PathBuf::from(device),
            None => self
                .default_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WAV_PATH)),
        };

        let writer = WavWriter::create(&path, spec).map_err(|e| {
            warn!("Failed to create {}: {e}", path.display());
            hound_error(e)
        })?;

        debug!(
            "Rendering stream {:?} from {} into {}",
            request.description,
            request.client_name,
            path.display()
        );

        Ok(Box::new(WavFileStream {
            writer: Some(writer),
            format: request.sample_spec.format,
            pending: Vec::new(),
            path,
        }))
    }
}

struct WavFileStream {
    writer: Option<WavWriter<BufWriter<File>>>,
    format: SampleFormat,
    /// Trailing bytes of a sample split across sends
    pending: Vec<u8>,
    path: PathBuf,
}

/// Writes every complete sample at the front of `pending` and removes it, also
/// when a later write fails. Trailing bytes of a split sample stay behind.
fn write_complete_samples<E>(
    pending: &mut Vec<u8>,
    sample_size: usize,
    mut write: impl FnMut(&[u8]) -> Result<(), E>,
) -> Result<(), E> {
    let mut written = 0;
    let result = pending.chunks_exact(sample_size).try_for_each(|sample| {
        write(sample)?;
        written += sample.len();
        Ok(())
    });
    pending.drain(..written);

    result
}

impl WavFileStream {
    fn write_sample(
        writer: &mut WavWriter<BufWriter<File>>,
        format: SampleFormat,
        bytes: &[u8],
    ) -> hound::Result<()> {
        match format {
            SampleFormat::U8 => writer.write_sample((bytes[0] as i16 - 128) as i8),
            SampleFormat::S16Le => writer.write_sample(LittleEndian::read_i16(bytes)),
            SampleFormat::S32Le => writer.write_sample(LittleEndian::read_i32(bytes)),
            SampleFormat::F32Le => writer.write_sample(LittleEndian::read_f32(bytes)),
            _ => Err(hound::Error::Unsupported),
        }
    }
}

impl TransportStream for WavFileStream {
    fn send(&mut self, bytes: &[u8]) -> Result<usize, ErrorCode> {
        let writer = self.writer.as_mut().ok_or(ErrorCode::BAD_STATE)?;
        let format = self.format;

        self.pending.extend_from_slice(bytes);
        write_complete_samples(&mut self.pending, format.sample_size(), |sample| {
            Self::write_sample(writer, format, sample)
        })
        .map_err(hound_error)?;

        Ok(bytes.len())
    }

    fn wait_until_rendered(&mut self) -> Result<(), ErrorCode> {
        let writer = self.writer.as_mut().ok_or(ErrorCode::BAD_STATE)?;
        writer.flush().map_err(hound_error)
    }
}

impl Drop for WavFileStream {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            warn!(
                "Discarding {} bytes of incomplete sample for {}",
                self.pending.len(),
                self.path.display()
            );
        }

        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.finalize() {
                error!("Failed to finalize {}: {e}", self.path.display());
            }
        }

        debug!("Closed {}", self.path.display());
    }
}
