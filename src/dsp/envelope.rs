use crate::MIN_TIME;

/*
One-Shot Envelope
=================

The siren's amplitude curve is a single fire-and-forget attack/release
shape - no sustain, no gate. Each triggered voice gets a fresh envelope:

  Level
  peak ┐   ╱╲
       │  ╱   ╲
       │ ╱      ╲
   0.0 └╱─────────╲──────→ Time
        Attack  Release
       |--------------|
        total duration

The attack is deliberately fast (the engine uses 50 ms) so a trigger is
felt immediately without producing a click, and the release stretches to
the requested total duration so short and long sirens share one shape.

Linear ramps throughout: predictable, and punchy enough for an effect
that lives for well under a second.

The Math: Time to Level
-----------------------

Levels are computed from elapsed sample count rather than accumulated
per-sample increments:

    t = elapsed_samples / sample_rate
    t < attack:    level = peak * t / attack
    t < total:     level = peak * (1 - (t - attack) / (total - attack))
    otherwise:     level = 0

Interpolating from elapsed time (instead of adding an increment each
sample) guarantees the ramp lands exactly on peak and exactly on zero,
with no drift over the envelope's lifetime.
*/

/// Stage of the one-shot envelope. Transitions are one-way:
/// Attack → Release → Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Release,
    Done,
}

pub struct OneShotEnvelope {
    attack_time: f32, // seconds to ramp 0 → peak
    total_time: f32,  // seconds until the envelope returns to 0
    peak: f32,        // level reached at the end of the attack

    stage: EnvelopeStage,
    level: f32,
    elapsed_samples: u64,
}

impl OneShotEnvelope {
    /// Create an envelope that ramps `0 → peak` in `attack` seconds and back
    /// to zero at `total` seconds after the start.
    pub fn new(attack: f32, total: f32, peak: f32) -> Self {
        let attack_time = attack.max(MIN_TIME);
        // Total must leave room for a non-degenerate release
        let total_time = total.max(attack_time + MIN_TIME);

        Self {
            attack_time,
            total_time,
            peak: peak.clamp(0.0, 1.0),
            stage: EnvelopeStage::Attack,
            level: 0.0,
            elapsed_samples: 0,
        }
    }

    /// Advance the envelope by one sample and return the new level.
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let t = self.elapsed_samples as f32 / sample_rate.max(1.0);
        self.elapsed_samples = self.elapsed_samples.saturating_add(1);

        self.level = if t < self.attack_time {
            self.stage = EnvelopeStage::Attack;
            self.peak * (t / self.attack_time)
        } else if t < self.total_time {
            self.stage = EnvelopeStage::Release;
            let progress = (t - self.attack_time) / (self.total_time - self.attack_time);
            self.peak * (1.0 - progress)
        } else {
            self.stage = EnvelopeStage::Done;
            0.0
        };

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(sample_rate);
        }
    }

    /// Returns true until the release has run its full course.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Done
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}
