//! Sample format, channel layout and buffering parameters of a stream.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CHANNELS_MAX, DEFAULT_CHANNELS, DEFAULT_SAMPLE_FORMAT, DEFAULT_SAMPLE_RATE, RATE_MAX,
};
use crate::error::StreamError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    U8,
    ALaw,
    ULaw,
    S16Le,
    S16Be,
    F32Le,
    F32Be,
    S32Le,
    S32Be,
}

impl SampleFormat {
    /// 16-bit signed in the host's byte order.
    pub const S16NE: SampleFormat = if cfg!(target_endian = "little") {
        SampleFormat::S16Le
    } else {
        SampleFormat::S16Be
    };

    /// Size of a single sample in bytes.
    pub fn sample_size(self) -> usize {
        match self {
            SampleFormat::U8 | SampleFormat::ALaw | SampleFormat::ULaw => 1,
            SampleFormat::S16Le | SampleFormat::S16Be => 2,
            SampleFormat::F32Le
            | SampleFormat::F32Be
            | SampleFormat::S32Le
            | SampleFormat::S32Be => 4,
        }
    }

    pub fn is_big_endian(self) -> bool {
        matches!(
            self,
            SampleFormat::S16Be | SampleFormat::F32Be | SampleFormat::S32Be
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, SampleFormat::F32Le | SampleFormat::F32Be)
    }

    pub fn name(self) -> &'static str {
        match self {
            SampleFormat::U8 => "u8",
            SampleFormat::ALaw => "alaw",
            SampleFormat::ULaw => "ulaw",
            SampleFormat::S16Le => "s16le",
            SampleFormat::S16Be => "s16be",
            SampleFormat::F32Le => "float32le",
            SampleFormat::F32Be => "float32be",
            SampleFormat::S32Le => "s32le",
            SampleFormat::S32Be => "s32be",
        }
    }
}

impl FromStr for SampleFormat {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let little = cfg!(target_endian = "little");

        let format = match s {
            "u8" => SampleFormat::U8,
            "alaw" => SampleFormat::ALaw,
            "ulaw" => SampleFormat::ULaw,
            "s16le" => SampleFormat::S16Le,
            "s16be" => SampleFormat::S16Be,
            "s16ne" | "s16" | "16" => SampleFormat::S16NE,
            "float32le" => SampleFormat::F32Le,
            "float32be" => SampleFormat::F32Be,
            "float32ne" | "float32" => {
                if little {
                    SampleFormat::F32Le
                } else {
                    SampleFormat::F32Be
                }
            }
            "s32le" => SampleFormat::S32Le,
            "s32be" => SampleFormat::S32Be,
            "s32ne" | "s32" => {
                if little {
                    SampleFormat::S32Le
                } else {
                    SampleFormat::S32Be
                }
            }
            _ => return Err(StreamError::InvalidSampleFormat(s.to_string())),
        };

        Ok(format)
    }
}

impl Display for SampleFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Format, rate and channel count of the interleaved PCM carried by a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSpec {
    pub format: SampleFormat,
    pub rate: u32,
    pub channels: u8,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            format: SampleFormat::S16NE,
            rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }
}

impl SampleSpec {
    /// Builds a spec from optional configuration values, filling in defaults.
    ///
    /// Checks format, then rate, then channels.
    pub fn resolve(
        format: Option<&str>,
        rate: Option<u32>,
        channels: Option<u8>,
    ) -> Result<Self, StreamError> {
        let format: SampleFormat = format.unwrap_or(DEFAULT_SAMPLE_FORMAT).parse()?;

        let rate = rate.unwrap_or(DEFAULT_SAMPLE_RATE);
        if rate == 0 || rate > RATE_MAX {
            return Err(StreamError::InvalidRate(rate));
        }

        let channels = channels.unwrap_or(DEFAULT_CHANNELS);
        if channels == 0 || channels > CHANNELS_MAX {
            return Err(StreamError::InvalidChannels(channels));
        }

        Ok(Self {
            format,
            rate,
            channels,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.format.sample_size() * self.channels as usize
    }

    pub fn bytes_per_second(&self) -> usize {
        self.frame_size() * self.rate as usize
    }
}

impl Display for SampleSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}ch {}Hz", self.format, self.channels, self.rate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelPosition {
    Mono,
    FrontLeft,
    FrontRight,
    FrontCenter,
    RearCenter,
    RearLeft,
    RearRight,
    Lfe,
    FrontLeftOfCenter,
    FrontRightOfCenter,
    SideLeft,
    SideRight,
    TopCenter,
    Aux(u8),
}

impl FromStr for ChannelPosition {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = match s {
            "mono" => ChannelPosition::Mono,
            "front-left" | "left" => ChannelPosition::FrontLeft,
            "front-right" | "right" => ChannelPosition::FrontRight,
            "front-center" | "center" => ChannelPosition::FrontCenter,
            "rear-center" => ChannelPosition::RearCenter,
            "rear-left" => ChannelPosition::RearLeft,
            "rear-right" => ChannelPosition::RearRight,
            "lfe" | "subwoofer" => ChannelPosition::Lfe,
            "front-left-of-center" => ChannelPosition::FrontLeftOfCenter,
            "front-right-of-center" => ChannelPosition::FrontRightOfCenter,
            "side-left" => ChannelPosition::SideLeft,
            "side-right" => ChannelPosition::SideRight,
            "top-center" => ChannelPosition::TopCenter,
            other => match other.strip_prefix("aux").and_then(|n| n.parse::<u8>().ok()) {
                Some(n) if n < CHANNELS_MAX => ChannelPosition::Aux(n),
                _ => {
                    return Err(StreamError::InvalidChannelMap(format!(
                        "unknown channel position {other:?}"
                    )))
                }
            },
        };

        Ok(position)
    }
}

/// Explicit channel layout; when absent the server picks one for the channel count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelMap(pub Vec<ChannelPosition>);

impl ChannelMap {
    pub fn parse<S: AsRef<str>>(names: &[S], channels: u8) -> Result<Self, StreamError> {
        let positions = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<ChannelPosition>, _>>()?;

        if positions.len() != channels as usize {
            return Err(StreamError::InvalidChannelMap(format!(
                "{} positions for {} channels",
                positions.len(),
                channels
            )));
        }

        Ok(Self(positions))
    }

    pub fn positions(&self) -> &[ChannelPosition] {
        &self.0
    }
}

/// Server-side buffering metrics in bytes. `None` leaves the server default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BufferAttr {
    /// Maximum length of the buffer
    pub maxlength: Option<u32>,
    /// Target fill level for playback
    pub tlength: Option<u32>,
    /// Amount buffered before playback starts
    pub prebuf: Option<u32>,
    /// Minimum request size
    pub minreq: Option<u32>,
    /// Fragment size for recording
    pub fragsize: Option<u32>,
}

impl BufferAttr {
    pub fn validate(&self) -> Result<(), StreamError> {
        if let Some(maxlength) = self.maxlength {
            if let Some(tlength) = self.tlength.filter(|t| *t > maxlength) {
                return Err(StreamError::InvalidBufferAttr(format!(
                    "tlength {tlength} exceeds maxlength {maxlength}"
                )));
            }
            if let Some(prebuf) = self.prebuf.filter(|p| *p > maxlength) {
                return Err(StreamError::InvalidBufferAttr(format!(
                    "prebuf {prebuf} exceeds maxlength {maxlength}"
                )));
            }
        }

        if let (Some(minreq), Some(tlength)) = (self.minreq, self.tlength) {
            if minreq > tlength {
                return Err(StreamError::InvalidBufferAttr(format!(
                    "minreq {minreq} exceeds tlength {tlength}"
                )));
            }
        }

        Ok(())
    }
}
