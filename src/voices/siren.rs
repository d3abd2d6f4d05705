//! Dub siren voice.
//!
//! The classic sound-system air-horn wobble: a square (or sawtooth) carrier
//! whose pitch is swept up and down by a triangle LFO, under a fast-attack
//! one-shot amplitude envelope.
//!
//! # How It Works
//!
//! 1. Carrier oscillator at the base frequency provides the tone
//! 2. Triangle LFO at `speed` Hz, scaled by `depth`, drives the carrier's
//!    frequency: the pitch swings ± depth around the base
//! 3. One-shot envelope ramps the level to 0.3 in 50 ms (no click) and back
//!    to zero at `duration`
//!
//! # Variations
//!
//! - Bigger `depth` = wider, more dramatic sweep
//! - Slower `speed` = lazy ambulance; faster = frantic alarm
//! - Sawtooth carrier = harsher, more aggressive tone

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::Waveform;
use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    lfo::LfoNode,
    node::GraphNode,
    oscillator::{OscNode, OscParam},
};

/// Peak envelope level. Kept well under unity so several overlapping shots
/// can mix without clipping.
pub const PEAK_LEVEL: f32 = 0.3;

/// Attack span in seconds. Fast enough to feel immediate, slow enough to
/// avoid a click.
pub const ATTACK_TIME: f32 = 0.05;

/// Extra run time past the envelope's zero-crossing before a voice is
/// stopped, so the ramp fully completes before the oscillators halt.
pub const STOP_TAIL: f32 = 0.1;

/// Durations at or below this are treated as a deliberate no-op: callers
/// can suppress the sound by passing a tiny duration instead of branching.
pub const MIN_AUDIBLE_DURATION: f32 = 0.1;

/// Fully-resolved parameters for one siren shot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirenOptions {
    /// Carrier base frequency in Hz.
    pub frequency: f32,
    /// Peak frequency deviation in Hz the modulator imposes on the carrier.
    pub depth: f32,
    /// Modulator rate in Hz - how fast the pitch wobbles.
    pub speed: f32,
    /// Total envelope duration in seconds.
    pub duration: f32,
    /// Carrier waveform shape.
    pub waveform: Waveform,
}

impl Default for SirenOptions {
    fn default() -> Self {
        Self {
            frequency: 750.0,
            depth: 200.0,
            speed: 12.0,
            duration: 0.6,
            waveform: Waveform::Square,
        }
    }
}

impl SirenOptions {
    /// False when the duration is inside the deliberate no-op threshold.
    pub fn is_audible(&self) -> bool {
        self.duration > MIN_AUDIBLE_DURATION
    }
}

/// Partial override of [`SirenOptions`].
///
/// Unset fields resolve to the defaults; the merge is total and
/// field-by-field, so a graph is never built from a half-resolved set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SirenParams {
    pub frequency: Option<f32>,
    pub depth: Option<f32>,
    pub speed: Option<f32>,
    pub duration: Option<f32>,
    pub waveform: Option<Waveform>,
}

impl SirenParams {
    pub fn frequency(mut self, hz: f32) -> Self {
        self.frequency = Some(hz);
        self
    }

    pub fn depth(mut self, hz: f32) -> Self {
        self.depth = Some(hz);
        self
    }

    pub fn speed(mut self, hz: f32) -> Self {
        self.speed = Some(hz);
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = Some(waveform);
        self
    }

    /// Merge this override field-by-field over `defaults`.
    pub fn resolve(&self, defaults: &SirenOptions) -> SirenOptions {
        SirenOptions {
            frequency: self.frequency.unwrap_or(defaults.frequency),
            depth: self.depth.unwrap_or(defaults.depth),
            speed: self.speed.unwrap_or(defaults.speed),
            duration: self.duration.unwrap_or(defaults.duration),
            waveform: self.waveform.unwrap_or(defaults.waveform),
        }
    }
}

/// Build the siren graph for one shot.
///
/// Carrier → frequency modulation (triangle LFO × depth) → envelope gain.
/// The returned node runs its envelope from the first rendered block and
/// reports inactive once the envelope has completed.
pub fn siren(options: &SirenOptions) -> impl GraphNode {
    OscNode::new(options.waveform, options.frequency)
        .modulate(
            LfoNode::triangle(options.speed),
            OscParam::Frequency,
            options.depth,
        )
        .amplify(EnvNode::one_shot(ATTACK_TIME, options.duration, PEAK_LEVEL))
}
