#[macro_use]
extern crate log;

use std::env;

use anyhow::{bail, Context, Result};
use bytes::Bytes;

use pulse_simple_rs::config::{self, Direction, StreamConfig};
use pulse_simple_rs::sources::{sine, symphonia};
use pulse_simple_rs::transport::{MemoryTransport, TcpTransport, WavFileTransport};
use pulse_simple_rs::{pcm, AsyncStreamConnection, StreamConnection};

const DEFAULT_CONFIG_PATH: &str = "Config.toml";
const CHUNK_FRAMES: usize = 1024;
const TONE_FREQUENCY: f64 = 440.0;
const TONE_SECS: f64 = 2.0;

fn fill_defaults(config: &mut StreamConfig) {
    config.name.get_or_insert_with(|| "pulse-simple".to_string());
    config
        .direction
        .get_or_insert_with(|| Direction::Playback.into());
    config
        .description
        .get_or_insert_with(|| "pulse-simple stream".to_string());
}

fn open_connection(transport: &str, config: StreamConfig) -> Result<StreamConnection> {
    let connection = match transport {
        "tcp" => StreamConnection::with_config(TcpTransport::new(), config),
        "wav" => StreamConnection::with_config(WavFileTransport::new(), config),
        "memory" => StreamConnection::with_config(MemoryTransport::new(), config),
        other => bail!("Unknown transport {other:?}, expected tcp, wav or memory"),
    };

    Ok(connection)
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let config_path =
        env::var("PULSE_SIMPLE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut stream_config = config::load_or_default(&config_path).await?;
    fill_defaults(&mut stream_config);

    let audio = match env::args().nth(1) {
        Some(path) => {
            let audio = tokio::task::spawn_blocking(move || symphonia::decode_file(path))
                .await
                .context("Decoder task failed")??;

            // Play the file as is, the server won't resample for us
            stream_config.rate = Some(audio.rate);
            stream_config.channels = Some(audio.channels);
            stream_config.channel_map = None;
            Some(audio)
        }
        None => None,
    };

    let transport = env::var("PULSE_SIMPLE_TRANSPORT").unwrap_or_else(|_| "tcp".to_string());
    let connection = AsyncStreamConnection::new(open_connection(&transport, stream_config)?);

    connection.connect().await?;

    let spec = connection
        .lock()
        .await
        .sample_spec()
        .context("Connection closed before streaming")?;

    let samples = match audio {
        Some(audio) => audio.samples,
        None => sine::generate(TONE_FREQUENCY, TONE_SECS, &spec),
    };
    let data = Bytes::from(pcm::encode_i16(&samples, spec.format));

    let chunk_size = CHUNK_FRAMES * spec.frame_size();
    let mut offset = 0;
    while offset < data.len() {
        let end = (offset + chunk_size).min(data.len());
        offset += connection.write(data.slice(offset..end)).await?;
    }

    info!("Wrote {} bytes, waiting for playback to finish", data.len());
    connection.drain().await?;
    connection.disconnect().await?;

    Ok(())
}
