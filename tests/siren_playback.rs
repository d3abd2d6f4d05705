//! End-to-end playback behavior, rendered offline through the voice bank.
//!
//! These tests drive the same code the cpal callback runs, minus the device:
//! resolved options go in through the trigger queue, audio comes out of
//! `SirenBank::render`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rtrb::RingBuffer;

use dub_siren::graph::node::{GraphNode, RenderCtx};
use dub_siren::synth::{SirenBank, SirenVoice, TriggerMessage};
use dub_siren::voices;
use dub_siren::{SirenOptions, SirenParams};

const SAMPLE_RATE: f32 = 48_000.0;

fn new_bank(queue: usize) -> (rtrb::Producer<TriggerMessage>, SirenBank) {
    let (tx, rx) = RingBuffer::<TriggerMessage>::new(queue);
    (tx, SirenBank::new(SAMPLE_RATE, rx))
}

/// Render `seconds` of stereo audio, returning the mono (left) samples.
fn render_seconds(bank: &mut SirenBank, seconds: f32) -> Vec<f32> {
    let frames = (seconds * SAMPLE_RATE) as usize;
    let mut mono = Vec::with_capacity(frames);
    let mut out = vec![0.0f32; 256];

    let mut rendered = 0;
    while rendered < frames {
        bank.render(&mut out, 2);
        for frame in out.chunks(2) {
            mono.push(frame[0]);
        }
        rendered += out.len() / 2;
    }
    mono
}

#[test]
fn short_duration_trigger_builds_no_graph() {
    // The engine-level gate: resolved durations at or below 0.1s are a
    // deliberate no-op, so no voice is ever constructed for them.
    let resolved = SirenParams::default()
        .duration(0.1)
        .resolve(&SirenOptions::default());
    assert!(!resolved.is_audible());

    // The same gate expressed through the bank: nothing enqueued, nothing
    // rendered.
    let (_tx, mut bank) = new_bank(4);
    let samples = render_seconds(&mut bank, 0.1);

    assert_eq!(bank.active_voices(), 0);
    assert_eq!(bank.node_count(), 0);
    assert!(samples.iter().all(|&s| s == 0.0));
}

#[test]
fn consecutive_triggers_layer_instead_of_replacing() {
    let (mut tx, mut bank) = new_bank(8);

    let d1 = SirenOptions {
        duration: 0.2,
        ..SirenOptions::default()
    };
    let d2 = SirenOptions {
        duration: 0.5,
        ..SirenOptions::default()
    };
    tx.push(TriggerMessage::Spawn(SirenVoice::new(&d1, SAMPLE_RATE)))
        .unwrap();
    tx.push(TriggerMessage::Spawn(SirenVoice::new(&d2, SAMPLE_RATE)))
        .unwrap();

    // Inside both stop windows ([0, 0.3] and [0, 0.6]): eight nodes live
    render_seconds(&mut bank, 0.15);
    assert_eq!(bank.node_count(), 8);

    // Past the first window only the second graph remains
    render_seconds(&mut bank, 0.25);
    assert_eq!(bank.node_count(), 4);

    // Past both windows everything has been released
    render_seconds(&mut bank, 0.3);
    assert_eq!(bank.node_count(), 0);
}

#[test]
fn graphs_are_disposed_exactly_once_after_their_stop_time() {
    let (mut tx, mut bank) = new_bank(8);
    let disposals = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let counter = Arc::clone(&disposals);
        let options = SirenOptions {
            duration: 0.2,
            ..SirenOptions::default()
        };
        let voice = SirenVoice::new(&options, SAMPLE_RATE).on_ended(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tx.push(TriggerMessage::Spawn(voice)).unwrap();
    }

    // All three share the same [0, 0.3] window; run well past it
    render_seconds(&mut bank, 0.5);
    assert_eq!(disposals.load(Ordering::SeqCst), 3);

    // Keep rendering: no double disposal
    render_seconds(&mut bank, 0.3);
    assert_eq!(disposals.load(Ordering::SeqCst), 3);
}

#[test]
fn depth_zero_scenario_holds_a_constant_carrier() {
    // trigger({frequency: 1000, depth: 0, duration: 0.5, speed: 10, sine}):
    // the modulator contributes nothing, so the carrier sits at 1000 Hz for
    // the whole envelope.
    let options = SirenParams::default()
        .frequency(1_000.0)
        .depth(0.0)
        .duration(0.5)
        .speed(10.0)
        .waveform(dub_siren::dsp::oscillator::Waveform::Sine)
        .resolve(&SirenOptions::default());

    let mut voice = voices::siren(&options);
    let ctx = RenderCtx::new(SAMPLE_RATE);

    let total = (0.5 * SAMPLE_RATE) as usize;
    let mut rendered = vec![0.0f32; total];
    for chunk in rendered.chunks_mut(64) {
        voice.render_block(chunk, &ctx);
    }

    // A constant 1 kHz tone crosses zero ~1000 times in 0.5s of audio
    // (ignoring the enveloped-silent first and last samples)
    let crossings = rendered
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    assert!(
        (995..=1005).contains(&crossings),
        "expected ~1000 crossings, got {crossings}"
    );

    // Amplitude: ramps to 0.3 by 0.05s, back to 0 by 0.5s
    let attack_window = &rendered[((0.05 * SAMPLE_RATE) as usize)..((0.1 * SAMPLE_RATE) as usize)];
    let peak = attack_window.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!((peak - 0.3).abs() < 0.01, "peak after attack was {peak}");

    let last = rendered[total - 1];
    assert!(last.abs() < 1e-2, "envelope did not return to zero: {last}");

    // And the voice's scheduled stop lands at 0.6s
    let mut tail = vec![0.0f32; 64];
    let mut remaining_blocks = ((0.1 * SAMPLE_RATE) as usize) / 64 + 1;
    while remaining_blocks > 0 {
        voice.render_block(&mut tail, &ctx);
        remaining_blocks -= 1;
    }
    assert!(!voice.is_active());
    assert!(tail.iter().all(|&s| s.abs() < 1e-6));
}

#[test]
fn overlapping_shots_mix_additively_at_the_sink() {
    // Two identical shots triggered together produce exactly twice the
    // signal of one: layering is a sum, not a replacement.
    let options = SirenOptions {
        waveform: dub_siren::dsp::oscillator::Waveform::Sine,
        depth: 0.0,
        ..SirenOptions::default()
    };

    let (mut tx_single, mut single) = new_bank(4);
    tx_single
        .push(TriggerMessage::Spawn(SirenVoice::new(&options, SAMPLE_RATE)))
        .unwrap();

    let (mut tx_double, mut double) = new_bank(4);
    for _ in 0..2 {
        tx_double
            .push(TriggerMessage::Spawn(SirenVoice::new(&options, SAMPLE_RATE)))
            .unwrap();
    }

    let one = render_seconds(&mut single, 0.2);
    let two = render_seconds(&mut double, 0.2);

    for (i, (a, b)) in one.iter().zip(&two).enumerate() {
        assert!(
            (b - 2.0 * a).abs() < 1e-5,
            "sample {i}: expected {}, got {b}",
            2.0 * a
        );
    }
}

#[test]
fn silence_message_halts_everything_in_flight() {
    // The teardown path: closing the context silences in-flight graphs.
    let (mut tx, mut bank) = new_bank(8);
    for _ in 0..4 {
        tx.push(TriggerMessage::Spawn(SirenVoice::new(
            &SirenOptions::default(),
            SAMPLE_RATE,
        )))
        .unwrap();
    }
    render_seconds(&mut bank, 0.1);
    assert_eq!(bank.active_voices(), 4);

    tx.push(TriggerMessage::Silence).unwrap();
    let samples = render_seconds(&mut bank, 0.05);

    assert_eq!(bank.active_voices(), 0);
    assert!(samples.iter().all(|&s| s == 0.0));
}
