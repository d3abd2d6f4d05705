//! Parameter modulation primitives.

/*
Parameter Modulation
====================

Modulation is using one signal to continuously vary a parameter of another.
The siren is a textbook case: a slow triangle LFO swings the carrier's
pitch up and down, producing the wobble.

Vocabulary
----------

  modulator     The signal doing the controlling (here, the triangle LFO).
                Outputs values in [-1.0, +1.0].

  target        The parameter being modulated (the carrier's frequency).

  depth         How much the parameter changes. Scales the modulator:
                  final_value = base_value + (modulator × depth)

  base value    The parameter's "center" value when modulator = 0.

The Math
--------

    modulated_value = base_value + (modulator_output × depth)

Example: carrier at 750 Hz, depth 200 Hz, triangle LFO at 12 Hz:

    LFO = -1.0  →  frequency = 750 - 200 = 550 Hz
    LFO =  0.0  →  frequency = 750
    LFO = +1.0  →  frequency = 750 + 200 = 950 Hz

The pitch sweeps 550-950 Hz twelve times a second. That is the siren.

Block-Rate Modulation
---------------------

The parameter is updated once per render block, using the average of the
modulator's samples over that block rather than a single point sample.
Averaging represents the middle of the block and avoids aliasing the LFO
against the block boundary. The render loop keeps blocks small (64
frames) so even a 25 Hz wobble gets ~30 updates per cycle.

Clamping is the target's job: the carrier clamps its modulated frequency
to the audible range so an aggressive depth can never push it negative.
*/

/// Calculate the modulated parameter value: `base + (modulator × depth)`.
#[inline]
pub fn apply_modulation(base_value: f32, modulator: f32, depth: f32) -> f32 {
    base_value + (modulator * depth)
}

/// Average of a modulator signal over a block.
///
/// Used for block-rate modulation: one value represents the entire block's
/// worth of modulator samples.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}
