use crate::{
    dsp::oscillator::{OscillatorBlock, Waveform},
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

An LFO is an oscillator that runs at sub-audio frequencies to modulate
parameters over time. The siren's modulator sweeps the carrier's pitch at
5-25 Hz; unlike audio oscillators its output is never heard directly.

The siren always modulates with a triangle: its linear up/down motion gives
the pitch sweep a constant rate in both directions, which is exactly the
"rise and fall" a siren should have. A sine would ease in and out at the
turnarounds; a square would jump between two pitches (more of an alarm
than a siren).
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32, // Fixed rate in Hz, independent of the carrier's pitch
}

impl LfoNode {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            frequency,
        }
    }

    /// The siren's modulator shape.
    pub fn triangle(frequency: f32) -> Self {
        Self::new(Waveform::Triangle, frequency)
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        // The LFO oscillates at its own fixed rate regardless of what the
        // node it modulates is doing
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}
