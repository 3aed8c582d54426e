//! Producers of PCM for the command line player.

pub mod sine;
pub mod symphonia;

/// Interleaved 16-bit audio together with its layout.
#[derive(Clone, Debug, Default)]
pub struct DecodedAudio {
    pub rate: u32,
    pub channels: u8,
    pub samples: Vec<i16>,
}

impl DecodedAudio {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.rate as f64
        }
    }
}
