use crate::{
    dsp::modulate::{apply_modulation, block_average},
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Connects an LFO (or any signal) to a parameter on another node.
///
/// This is the siren's frequency-modulation edge: the triangle LFO, scaled
/// by `depth`, drives the carrier's frequency so its pitch swings ± depth
/// around the base at the LFO's rate.
///
/// Modulation is applied at block rate using the average of the LFO's
/// samples over the block; see `dsp::modulate` for the tradeoffs and why
/// the render loop keeps blocks small.
pub struct Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    source: S,            // The node being modulated (the carrier)
    lfo: L,               // The modulation source
    param: S::Param,      // Which parameter to modulate
    depth: f32,           // Modulation amount (scales LFO output)
    lfo_buffer: Vec<f32>, // Temp buffer for LFO output
}

impl<S, L> Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    pub fn new(source: S, lfo: L, param: S::Param, depth: f32) -> Self {
        Self {
            source,
            lfo,
            param,
            depth,
            lfo_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S, L> GraphNode for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len();

        // Render LFO to temp buffer (values in [-1.0, +1.0])
        self.lfo.render_block(&mut self.lfo_buffer[..len], ctx);

        // Average LFO samples for block-rate modulation
        let lfo_avg = block_average(&self.lfo_buffer[..len]);

        // Calculate and apply modulation
        let base_value = self.source.get_param(self.param);
        let modulation = apply_modulation(0.0, lfo_avg, self.depth);
        self.source
            .apply_modulation(self.param, base_value, modulation);

        // Render the source with modulated parameter
        self.source.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
