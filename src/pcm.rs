//! Conversion of 16-bit samples into the raw byte layout of a sample format.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::format::SampleFormat;

/// Encodes interleaved 16-bit samples as bytes in `format`.
pub fn encode_i16(samples: &[i16], format: SampleFormat) -> Vec<u8> {
    let mut data: Vec<u8> = Vec::with_capacity(samples.len() * format.sample_size());

    for &sample in samples {
        // Writes into a Vec can't fail
        let _ = match format {
            SampleFormat::U8 => data.write_u8(((sample >> 8) + 128) as u8),
            SampleFormat::ALaw => data.write_u8(linear_to_alaw(sample)),
            SampleFormat::ULaw => data.write_u8(linear_to_ulaw(sample)),
            SampleFormat::S16Le => data.write_i16::<LittleEndian>(sample),
            SampleFormat::S16Be => data.write_i16::<BigEndian>(sample),
            SampleFormat::F32Le => data.write_f32::<LittleEndian>(sample as f32 / 32768.0),
            SampleFormat::F32Be => data.write_f32::<BigEndian>(sample as f32 / 32768.0),
            SampleFormat::S32Le => data.write_i32::<LittleEndian>((sample as i32) << 16),
            SampleFormat::S32Be => data.write_i32::<BigEndian>((sample as i32) << 16),
        };
    }

    data
}

/// G.711 mu-law companding.
pub fn linear_to_ulaw(sample: i16) -> u8 {
    const BIAS: i32 = 0x84;
    const CLIP: i32 = 32635;

    let mut value = sample as i32;
    let sign = if value < 0 {
        value = -value;
        0x80
    } else {
        0
    };

    value = value.min(CLIP) + BIAS;

    let mut exponent = 7;
    let mut mask = 0x4000;
    while value & mask == 0 && exponent > 0 {
        exponent -= 1;
        mask >>= 1;
    }

    let mantissa = (value >> (exponent + 3)) & 0x0F;
    !((sign | (exponent << 4) | mantissa) as u8)
}

/// G.711 A-law companding.
pub fn linear_to_alaw(sample: i16) -> u8 {
    const SEGMENT_END: [i32; 8] = [0x1F, 0x3F, 0x7F, 0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF];

    let mut value = (sample as i32) >> 3;
    let mask = if value >= 0 {
        0xD5
    } else {
        value = -value - 1;
        0x55
    };

    let segment = SEGMENT_END
        .iter()
        .position(|end| value <= *end)
        .unwrap_or(SEGMENT_END.len());

    if segment >= SEGMENT_END.len() {
        return 0x7F ^ mask;
    }

    let shift = if segment < 2 { 1 } else { segment };
    let alaw = ((segment as i32) << 4) | ((value >> shift) & 0x0F);
    (alaw as u8) ^ mask
}
