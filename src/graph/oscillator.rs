use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/// Carrier oscillator node.
///
/// Runs at a fixed base frequency (the siren's pitch center) rather than
/// tracking any external pitch source. The frequency is the modulation
/// target that produces the wobble:
///
/// ```ignore
/// // 750 Hz square carrier swinging ±200 Hz twelve times a second
/// OscNode::new(Waveform::Square, 750.0)
///     .modulate(LfoNode::triangle(12.0), OscParam::Frequency, 200.0)
/// ```
pub struct OscNode {
    osc: OscillatorBlock,
    /// Pitch center in Hz. Modulation swings around this value.
    base_frequency: f32,
    /// Frequency actually rendered this block, after modulation.
    current_frequency: f32,
}

/// Parameters that can be modulated on an oscillator
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Oscillator frequency in Hz
    Frequency,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            base_frequency: frequency,
            current_frequency: frequency,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.osc.waveform()
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc
            .render(out, self.current_frequency, ctx.sample_rate);
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.base_frequency,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                // Clamp to audible range (20 Hz - 20 kHz)
                self.current_frequency = (base + modulation).clamp(20.0, 20_000.0);
            }
        }
    }
}
