//! Realtime voice pool and trigger queue.
//!
//! The control thread resolves options and wires up a voice; the audio
//! callback owns a [`SirenBank`] that admits voices from a lock-free queue,
//! mixes everything that is running, and disposes voices whose scheduled
//! stop has passed.
//!
//! [`SirenBank`]: bank::SirenBank

pub mod bank;
pub mod message;
pub mod voice;

pub use bank::SirenBank;
pub use message::TriggerMessage;
pub use voice::{SirenVoice, VoiceState};
