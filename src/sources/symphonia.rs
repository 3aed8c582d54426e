use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::DecodedAudio;

/// Decodes the default track of an audio file into interleaved 16-bit samples
/// at the file's own rate and channel count.
pub fn decode_file(file_path: impl AsRef<Path>) -> Result<DecodedAudio> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open {}", file_path.display()))?;

    // Create the media source stream using the boxed media source from above.
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Help the format registry with the file extension, if there is one
    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    // Use the default options when reading and decoding.
    let format_opts: FormatOptions = Default::default();
    let metadata_opts: MetadataOptions = Default::default();
    let decoder_opts: DecoderOptions = Default::default();

    // Probe the media source stream for a format.
    let probed =
        symphonia::default::get_probe().format(&hint, mss, &format_opts, &metadata_opts)?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .context("Could not find any tracks in file")?;

    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &decoder_opts)?;

    // Store the track identifier, we'll use it to filter packets.
    let track_id = track.id;

    let mut audio = DecodedAudio::default();
    let mut sample_buf: Option<SampleBuffer<i16>> = None;

    loop {
        let packet = format.next_packet();

        // Symphonia seems to return UnexpectedEof even if the EOF was expected,
        // handle this gracefully
        let packet = match &packet {
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            _ => packet?,
        };

        if packet.track_id() != track_id {
            continue;
        }

        let audio_buf = decoder.decode(&packet)?;

        // If this is the *first* decoded packet, create a sample buffer matching the
        // decoded audio buffer format.
        if sample_buf.is_none() {
            let spec = *audio_buf.spec();

            audio.rate = spec.rate;
            audio.channels = spec.channels.count() as u8;

            // Capacity, not length
            let duration = audio_buf.capacity() as u64;
            sample_buf = Some(SampleBuffer::<i16>::new(duration, spec));
        }

        if let Some(buf) = &mut sample_buf {
            buf.copy_interleaved_ref(audio_buf);
            audio.samples.extend_from_slice(buf.samples());
        }
    }

    debug!(
        "Decoded {:.2} seconds from {}",
        audio.duration_secs(),
        file_path.display()
    );

    Ok(audio)
}
