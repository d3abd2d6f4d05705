use rtrb::Consumer;

use crate::{
    graph::node::RenderCtx,
    synth::{
        message::TriggerMessage,
        voice::{SirenVoice, VoiceState},
    },
};

/// Render granularity in frames. Small enough that block-rate frequency
/// modulation tracks a 25 Hz wobble smoothly (~30 updates per cycle at
/// 48 kHz), large enough to keep per-block overhead negligible.
pub const CONTROL_BLOCK: usize = 64;

/// Maximum simultaneously live voices. When the pool is full the oldest
/// voice is stolen.
pub const MAX_VOICES: usize = 16;

/// Nodes per siren graph: carrier, modulator, modulator-gain, carrier-gain.
pub const NODES_PER_VOICE: usize = 4;

/// The audio callback's voice pool.
///
/// Admits voices from the trigger queue, mixes every running voice
/// additively into the output (overlapping shots layer, they never replace
/// each other), and disposes voices whose scheduled stop has passed.
pub struct SirenBank {
    voices: Vec<SirenVoice>,
    rx: Consumer<TriggerMessage>,
    temp_buffer: Vec<f32>,
    sample_rate: f32,
    spawn_counter: u64,
}

impl SirenBank {
    pub fn new(sample_rate: f32, rx: Consumer<TriggerMessage>) -> Self {
        Self {
            voices: Vec::with_capacity(MAX_VOICES),
            rx,
            temp_buffer: vec![0.0; CONTROL_BLOCK],
            sample_rate,
            spawn_counter: 0,
        }
    }

    /// Render one interleaved output buffer.
    ///
    /// Voices are mixed in `CONTROL_BLOCK`-sized chunks; the mono mix is
    /// duplicated across all output channels.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        out.fill(0.0);
        self.drain_messages();

        let channels = channels.max(1);
        let frames = out.len() / channels;
        let ctx = RenderCtx::new(self.sample_rate);

        let mut done = 0;
        while done < frames {
            let chunk = (frames - done).min(CONTROL_BLOCK);

            // Split borrows: voices and scratch are separate fields
            let Self {
                voices,
                temp_buffer,
                ..
            } = self;
            let scratch = &mut temp_buffer[..chunk];

            for voice in voices.iter_mut().filter(|v| v.is_running()) {
                voice.render(scratch, &ctx);

                for (frame, &sample) in scratch.iter().enumerate() {
                    let base = (done + frame) * channels;
                    for slot in &mut out[base..base + channels] {
                        *slot += sample;
                    }
                }
            }

            done += chunk;
        }

        self.reap();
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.pop() {
            match msg {
                TriggerMessage::Spawn(voice) => self.admit(voice),
                TriggerMessage::Silence => {
                    for voice in &mut self.voices {
                        voice.dispose();
                    }
                }
            }
        }
    }

    fn admit(&mut self, mut voice: SirenVoice) {
        voice.set_age(self.spawn_counter);
        self.spawn_counter += 1;

        if self.voices.len() == MAX_VOICES {
            // Steal the oldest voice
            if let Some(oldest) = self
                .voices
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| v.age())
                .map(|(idx, _)| idx)
            {
                let mut stolen = self.voices.swap_remove(oldest);
                stolen.dispose();
            }
        }

        self.voices.push(voice);
    }

    /// Dispose and drop voices whose scheduled stop has passed.
    fn reap(&mut self) {
        for voice in &mut self.voices {
            if voice.state() == VoiceState::Stopped {
                voice.dispose();
            }
        }
        self.voices.retain(|v| v.state() != VoiceState::Disposed);
    }

    /// Number of voices currently running.
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_running()).count()
    }

    /// Graph nodes currently held by the bank, across all live voices.
    pub fn node_count(&self) -> usize {
        self.voices.len() * NODES_PER_VOICE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::siren::SirenOptions;
    use rtrb::RingBuffer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn bank_with_queue(capacity: usize) -> (rtrb::Producer<TriggerMessage>, SirenBank) {
        let (tx, rx) = RingBuffer::<TriggerMessage>::new(capacity);
        (tx, SirenBank::new(SAMPLE_RATE, rx))
    }

    fn render_seconds(bank: &mut SirenBank, seconds: f32) {
        let mut out = vec![0.0f32; 256];
        let blocks = (seconds * SAMPLE_RATE) as usize / 128 + 1;
        for _ in 0..blocks {
            bank.render(&mut out, 2);
        }
    }

    fn spawn(tx: &mut rtrb::Producer<TriggerMessage>, duration: f32) {
        let options = SirenOptions {
            duration,
            ..SirenOptions::default()
        };
        let voice = SirenVoice::new(&options, SAMPLE_RATE);
        assert!(tx.push(TriggerMessage::Spawn(voice)).is_ok());
    }

    #[test]
    fn overlapping_voices_layer_additively() {
        let (mut tx, mut bank) = bank_with_queue(8);

        spawn(&mut tx, 0.2); // window [0, 0.3]
        spawn(&mut tx, 0.5); // window [0, 0.6]

        render_seconds(&mut bank, 0.15);
        assert_eq!(bank.active_voices(), 2);
        assert_eq!(bank.node_count(), 2 * NODES_PER_VOICE);

        // Past the first window, inside the second
        render_seconds(&mut bank, 0.25);
        assert_eq!(bank.active_voices(), 1);
        assert_eq!(bank.node_count(), NODES_PER_VOICE);

        // Past both windows
        render_seconds(&mut bank, 0.3);
        assert_eq!(bank.active_voices(), 0);
        assert_eq!(bank.node_count(), 0);
    }

    #[test]
    fn reaped_voice_fires_completion_hook_once() {
        let (mut tx, mut bank) = bank_with_queue(8);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let options = SirenOptions {
            duration: 0.2,
            ..SirenOptions::default()
        };
        let voice = SirenVoice::new(&options, SAMPLE_RATE).on_ended(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tx.push(TriggerMessage::Spawn(voice)).unwrap();

        // Run well past the scheduled stop, then keep rendering: the hook
        // must not fire again once the voice is gone
        render_seconds(&mut bank, 0.5);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        render_seconds(&mut bank, 0.2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn silence_disposes_all_voices() {
        let (mut tx, mut bank) = bank_with_queue(8);
        spawn(&mut tx, 0.6);
        spawn(&mut tx, 0.6);

        render_seconds(&mut bank, 0.05);
        assert_eq!(bank.active_voices(), 2);

        tx.push(TriggerMessage::Silence).unwrap();
        let mut out = vec![0.0f32; 256];
        bank.render(&mut out, 2);

        assert_eq!(bank.active_voices(), 0);
        assert_eq!(bank.node_count(), 0);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn full_pool_steals_the_oldest_voice() {
        let (mut tx, mut bank) = bank_with_queue(MAX_VOICES + 2);

        for _ in 0..MAX_VOICES {
            spawn(&mut tx, 0.6);
        }
        render_seconds(&mut bank, 0.01);
        assert_eq!(bank.active_voices(), MAX_VOICES);

        spawn(&mut tx, 0.6);
        render_seconds(&mut bank, 0.01);

        // Still at capacity: one admitted, one stolen
        assert_eq!(bank.active_voices(), MAX_VOICES);
    }

    #[test]
    fn mix_is_duplicated_across_channels() {
        let (mut tx, mut bank) = bank_with_queue(4);
        spawn(&mut tx, 0.6);

        let mut out = vec![0.0f32; 512];
        bank.render(&mut out, 2);
        // Skip the leading silence of the attack ramp
        bank.render(&mut out, 2);

        for frame in out.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(out.iter().any(|&s| s != 0.0));
    }
}
