//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so graph combinators can layer on orchestration and
//! modulation.

/// One-shot attack/release envelope generator.
pub mod envelope;
/// Parameter modulation helpers.
pub mod modulate;
/// Oscillator waveforms and the phase-accumulator oscillator.
pub mod oscillator;

pub use envelope::EnvelopeStage;
pub use oscillator::Waveform;
