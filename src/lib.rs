pub mod dsp;
pub mod engine; // Shared audio context lifecycle and trigger surface
pub mod graph; // Composable audio graph nodes
pub mod params;
pub mod synth; // Realtime voice pool and trigger queue
pub mod voices;

pub use engine::SirenEngine;
pub use voices::siren::{SirenOptions, SirenParams};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
