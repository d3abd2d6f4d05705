//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics needed
//! for voice design: block-based rendering, parameter modulation, and
//! activity tracking so the voice pool knows when a graph has finished. The
//! `extensions` module adds fluent helpers so a voice can be authored as a
//! clear, chainable expression.

/// Multiply a signal by a control signal (amplitude enveloping).
pub mod amplify;
/// One-shot envelope node driving a voice's amplitude.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.modulate()`).
pub mod extensions;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band carrier oscillator.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
