use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Audio Oscillator
================

The oscillator is the siren's only sound source. It generates a repeating
waveform at a specific frequency, producing the raw tone that the envelope
and the pitch modulator then shape into the classic dub siren wobble.

Waveform Types and Their Character:
-----------------------------------

Sine: The purest tone - a single frequency with no harmonics.
  - Sound: Smooth, hollow, flute-like
  - Use: Mellow sirens, test tones

Square: Hollow but powerful - only odd harmonics.
  - Sound: Hollow, woody, cuts through a mix
  - Use: The classic dub siren carrier (the default)

Sawtooth: The richest waveform - contains all harmonics.
  - Sound: Bright, buzzy, aggressive
  - Use: Harsher siren variants

Triangle: Mellow and soft - weak odd harmonics.
  - Sound: Soft, between sine and square
  - Use: The pitch modulator (LFO), gentle sirens
*/

/// Carrier waveform shape.
///
/// A closed enumeration: textual configuration is parsed through [`FromStr`],
/// which rejects anything outside this set at resolution time rather than
/// letting an unrecognized name reach the signal path.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unrecognized waveform name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWaveformError(String);

impl fmt::Display for ParseWaveformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized waveform `{}`", self.0)
    }
}

impl std::error::Error for ParseWaveformError {}

impl FromStr for Waveform {
    type Err = ParseWaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "sawtooth" => Ok(Waveform::Sawtooth),
            "triangle" => Ok(Waveform::Triangle),
            other => Err(ParseWaveformError(other.to_string())),
        }
    }
}

/// Phase-accumulator oscillator.
///
/// Tracks phase in `[0, 1)` and advances it by `frequency / sample_rate` per
/// sample, so the frequency can change between blocks (pitch modulation)
/// without phase discontinuities.
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Fill `out` with one sample per slot at the given frequency.
    ///
    /// The sample is produced from the current phase, then the phase advances.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        let increment = frequency / sample_rate.max(1.0);

        for sample in out.iter_mut() {
            *sample = waveform_sample(self.waveform, self.phase);

            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= self.phase.floor();
            }
        }
    }
}

#[inline]
fn waveform_sample(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (TAU * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => 2.0 * phase - 1.0,
        Waveform::Triangle => {
            // Shifted so the wave starts at 0 and rises, like sine
            let x = phase - 0.25;
            let frac = x - x.floor();
            2.0 * (2.0 * frac - 1.0).abs() - 1.0
        }
    }
}
