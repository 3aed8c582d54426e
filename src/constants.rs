// Defaults used when a stream leaves its sample spec unspecified
pub const DEFAULT_SAMPLE_FORMAT: &str = "s16ne"; // 16-bit signed, native endian
pub const DEFAULT_SAMPLE_RATE: u32 = 44100; // 44.1 kHz sample rate
pub const DEFAULT_CHANNELS: u8 = 1; // Mono

// Upper bounds accepted by the audio server
pub const CHANNELS_MAX: u8 = 32;
pub const RATE_MAX: u32 = 48000 * 8;

/// Address used by `TcpTransport` when no server is configured.
pub const DEFAULT_TCP_SERVER: &str = "127.0.0.1:7878";

/// Output path used by `WavFileTransport` when no device is configured.
pub const DEFAULT_WAV_PATH: &str = "pulse-simple.wav";
