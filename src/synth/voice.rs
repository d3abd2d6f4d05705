use crate::graph::node::{GraphNode, RenderCtx};
use crate::voices::siren::{self, SirenOptions, STOP_TAIL};

/// Lifecycle of one triggered voice.
///
/// Construction covers the build phase, so a live voice starts out
/// `Running`. Transitions are one-way: Running → Stopped when the scheduled
/// stop sample is reached, Stopped → Disposed when the bank reaps it (or a
/// Silence message short-circuits straight to Disposed). A voice is never
/// reused and never cancelled mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Running,
    Stopped,
    Disposed,
}

/// A single triggered siren: the node graph plus its scheduled stop.
pub struct SirenVoice {
    graph: Box<dyn GraphNode>,
    state: VoiceState,
    /// Samples left until the scheduled stop (duration + tail margin).
    remaining_samples: u64,
    /// Admission order, used by the bank to steal the oldest voice.
    age: u64,
    /// One-shot completion hook, fired exactly once on disposal.
    on_ended: Option<Box<dyn FnOnce() + Send>>,
}

impl SirenVoice {
    /// Build the graph for one shot and schedule its stop at
    /// `duration + STOP_TAIL` so the envelope's final ramp fully completes
    /// before the voice halts.
    pub fn new(options: &SirenOptions, sample_rate: f32) -> Self {
        let total = options.duration + STOP_TAIL;
        let remaining = (total * sample_rate.max(1.0)).round() as u64;

        Self {
            graph: Box::new(siren::siren(options)),
            state: VoiceState::Running,
            remaining_samples: remaining.max(1),
            age: 0,
            on_ended: None,
        }
    }

    /// Register a completion hook. Fired exactly once, on disposal.
    pub fn on_ended(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_ended = Some(Box::new(callback));
        self
    }

    /// Render one block. Past the scheduled stop the voice is `Stopped` and
    /// outputs silence until the bank reaps it.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.state != VoiceState::Running {
            out.fill(0.0);
            return;
        }

        self.graph.render_block(out, ctx);

        self.remaining_samples = self.remaining_samples.saturating_sub(out.len() as u64);
        if self.remaining_samples == 0 {
            self.state = VoiceState::Stopped;
        }
    }

    /// Release the voice's graph. Idempotent: the completion hook fires on
    /// the first call only, later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.state == VoiceState::Disposed {
            return;
        }
        self.state = VoiceState::Disposed;

        if let Some(callback) = self.on_ended.take() {
            callback();
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == VoiceState::Running
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub(crate) fn set_age(&mut self, age: u64) {
        self.age = age;
    }
}
