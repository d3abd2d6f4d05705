//! Random siren parameter source.
//!
//! Every trigger gets a fresh personality: pitch, wobble depth and rate,
//! length, and occasionally a harsher sawtooth carrier. The engine itself
//! does not care where overrides come from; this module is just the stock
//! dice-roller a trigger surface can reach for.

use rand::Rng;

use crate::dsp::oscillator::Waveform;
use crate::voices::siren::SirenParams;

/// Roll a random override set using the thread-local RNG.
pub fn random_siren() -> SirenParams {
    random_siren_with(&mut rand::thread_rng())
}

/// Roll a random override set from the given RNG (seedable for tests).
///
/// Ranges: frequency 400-1200 Hz, depth 100-300 Hz, speed 5-25 Hz,
/// duration 0.4-0.9 s; sawtooth carrier with probability 0.3, square
/// otherwise.
pub fn random_siren_with<R: Rng>(rng: &mut R) -> SirenParams {
    let waveform = if rng.gen_bool(0.3) {
        Waveform::Sawtooth
    } else {
        Waveform::Square
    };

    SirenParams::default()
        .frequency(rng.gen_range(400.0..1200.0))
        .depth(rng.gen_range(100.0..300.0))
        .speed(rng.gen_range(5.0..25.0))
        .duration(rng.gen_range(0.4..0.9))
        .waveform(waveform)
}
