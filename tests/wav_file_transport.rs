//! Integration tests for rendering streams into WAV files.

mod common;

use common::*;
use pulse_simple_rs::pcm;
use pulse_simple_rs::transport::WavFileTransport;
use tempfile::TempDir;

fn wav_connection(dir: &TempDir, file: &str, format: &str, channels: u8) -> StreamConnection {
    let config = StreamConfig {
        device: Some(dir.path().join(file).to_string_lossy().into_owned()),
        sample_format: Some(format.to_string()),
        rate: Some(22050),
        channels: Some(channels),
        ..test_config()
    };

    StreamConnection::with_config(WavFileTransport::new(), config)
}

fn read_i16(path: &std::path::Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

/// Test that drained samples are readable from the file.
#[test]
fn test_drain_makes_file_readable() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "out.wav", "s16le", 2);
    connection.connect().unwrap();

    let samples = ramp_samples(2000);
    let data = pcm::encode_i16(&samples, SampleFormat::S16Le);
    assert_eq!(connection.write(&data), Ok(data.len()));
    connection.drain().unwrap();

    let (spec, read) = read_i16(&dir.path().join("out.wav"));
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(read, samples);
}

/// Test that disconnect finalizes the file.
#[test]
fn test_disconnect_finalizes_file() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "final.wav", "s16le", 1);
    connection.connect().unwrap();

    let samples = ramp_samples(500);
    connection
        .write(&pcm::encode_i16(&samples, SampleFormat::S16Le))
        .unwrap();
    connection.disconnect();

    let (_, read) = read_i16(&dir.path().join("final.wav"));
    assert_eq!(read, samples);
}

/// Test that a sample split across writes is reassembled.
#[test]
fn test_split_sample_across_writes() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "split.wav", "s16le", 1);
    connection.connect().unwrap();

    let data = pcm::encode_i16(&[1000, -1000], SampleFormat::S16Le);
    assert_eq!(connection.write(&data[..3]), Ok(3));
    assert_eq!(connection.write(&data[3..]), Ok(1));
    connection.disconnect();

    let (_, read) = read_i16(&dir.path().join("split.wav"));
    assert_eq!(read, vec![1000, -1000]);
}

/// Test 8-bit unsigned output.
#[test]
fn test_u8_output() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "u8.wav", "u8", 1);
    connection.connect().unwrap();
    connection.write(&[0, 128, 255]).unwrap();
    connection.disconnect();

    let mut reader = hound::WavReader::open(dir.path().join("u8.wav")).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 8);
    let read: Vec<i8> = reader.samples::<i8>().map(|s| s.unwrap()).collect();
    assert_eq!(read, vec![-128, 0, 127]);
}

/// Test float output.
#[test]
fn test_float_output() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "float.wav", "float32le", 1);
    connection.connect().unwrap();
    connection
        .write(&pcm::encode_i16(&[16384, -16384], SampleFormat::F32Le))
        .unwrap();
    connection.disconnect();

    let mut reader = hound::WavReader::open(dir.path().join("float.wav")).unwrap();
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
    let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(read, vec![0.5, -0.5]);
}

/// Test that record streams are refused.
#[test]
fn test_record_not_supported() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "rec.wav", "s16le", 1);
    connection.set_direction(Direction::Record).unwrap();

    assert_eq!(
        connection.connect(),
        Err(StreamError::ConnectionFailed(ErrorCode::NOT_SUPPORTED))
    );
    assert!(!dir.path().join("rec.wav").exists());
}

/// Test that formats WAV can't hold are refused.
#[test]
fn test_companded_format_not_supported() {
    let dir = TempDir::new().unwrap();

    for format in ["alaw", "ulaw", "s16be"] {
        let mut connection = wav_connection(&dir, "x.wav", format, 1);
        assert_eq!(
            connection.connect(),
            Err(StreamError::ConnectionFailed(ErrorCode::NOT_SUPPORTED))
        );
    }
}

/// Test that an unwritable path is a connection failure.
#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let mut connection = wav_connection(&dir, "no/such/dir/out.wav", "s16le", 1);

    assert_eq!(
        connection.connect(),
        Err(StreamError::ConnectionFailed(ErrorCode::NOENTITY))
    );
    assert_eq!(connection.last_error(), Some(ErrorCode::NOENTITY));
}

/// Test the default output path of the transport.
#[test]
fn test_default_path_used_without_device() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("default.wav");
    let config = StreamConfig {
        sample_format: Some("s16le".to_string()),
        ..test_config()
    };
    let mut connection =
        StreamConnection::with_config(WavFileTransport::with_default_path(&path), config);

    connection.connect().unwrap();
    connection.write(&[0; 4]).unwrap();
    connection.disconnect();

    let (spec, read) = read_i16(&path);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(read, vec![0, 0]);
}
