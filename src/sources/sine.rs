use crate::format::SampleSpec;

const AMPLITUDE: f64 = 0.5; // 50% amplitude

/// Interleaved 16-bit sine tone at `f` Hz lasting `secs` seconds, with the
/// same sample on every channel.
pub fn generate(f: f64, secs: f64, spec: &SampleSpec) -> Vec<i16> {
    let frames = (secs * spec.rate as f64) as usize;
    let mut samples = Vec::with_capacity(frames * spec.channels as usize);

    // Initialize a phase variable to keep track of the sine wave phase
    let mut phase = 0.0;

    for _ in 0..frames {
        let sample: i16 = sine_wave(phase);
        samples.extend(std::iter::repeat(sample).take(spec.channels as usize));

        // Increment the phase by the frequency divided by the sample rate
        phase += f / spec.rate as f64;

        // Wrap the phase around 1.0 to avoid overflow
        phase %= 1.0;
    }

    samples
}

// Define a helper function to generate a sine wave sample given a phase
fn sine_wave(phase: f64) -> i16 {
    // Convert the phase to radians and take the sine
    let sample = (phase * std::f64::consts::PI * 2.0).sin();
    // Scale the sample by the amplitude and the maximum value of i16
    let amplitude = i16::MAX as f64 * AMPLITUDE;
    (sample * amplitude) as i16
}
