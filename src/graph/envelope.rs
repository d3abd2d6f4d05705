use crate::{
    dsp::envelope::OneShotEnvelope,
    graph::node::{GraphNode, RenderCtx},
};

/// One-shot envelope node.
///
/// Acts as the voice's gain stage when combined with [`Amplify`]: it outputs
/// the envelope's level directly, and multiplying the carrier by that level
/// gives the siren its click-free attack and its timed fade to silence.
///
/// [`Amplify`]: crate::graph::amplify::Amplify
pub struct EnvNode {
    env: OneShotEnvelope,
}

impl EnvNode {
    /// Envelope ramping `0 → peak` over `attack` seconds and back to zero at
    /// `total` seconds. Starts running on the first rendered block.
    pub fn one_shot(attack: f32, total: f32, peak: f32) -> Self {
        Self {
            env: OneShotEnvelope::new(attack, total, peak),
        }
    }

    pub fn level(&self) -> f32 {
        self.env.level()
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx.sample_rate);
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn reports_inactive_after_total_time() {
        let mut env = EnvNode::one_shot(0.05, 0.2, 0.3);
        let ctx = RenderCtx::new(SAMPLE_RATE);
        let mut buffer = vec![0.0; 256];

        assert!(env.is_active());

        let blocks = (0.25 * SAMPLE_RATE) as usize / buffer.len() + 1;
        for _ in 0..blocks {
            env.render_block(&mut buffer, &ctx);
        }

        assert!(!env.is_active());
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn peak_is_reached_at_end_of_attack() {
        let mut env = EnvNode::one_shot(0.05, 0.5, 0.3);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        // Render exactly the attack span
        let attack_samples = (0.05 * SAMPLE_RATE) as usize + 1;
        let mut buffer = vec![0.0; attack_samples];
        env.render_block(&mut buffer, &ctx);

        assert!((env.level() - 0.3).abs() < 1e-3);
    }
}
