use std::fmt;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

use crate::synth::{bank::SirenBank, message::TriggerMessage};

/// Capacity of the control-to-audio trigger queue. Generous for a surface
/// driven by human clicks; a full queue drops the trigger, never blocks.
pub const TRIGGER_QUEUE_SIZE: usize = 64;

/// Playback state of the shared output context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Running,
    Suspended,
    Closed,
}

/// Failures at the platform audio boundary.
///
/// None of these escape the engine's public operations; they are logged and
/// the engine degrades to producing no sound.
#[derive(Debug)]
pub enum ContextError {
    /// The host exposes no output device at all.
    NoOutputDevice,
    /// The device refused to report a default stream configuration.
    DefaultConfig(cpal::DefaultStreamConfigError),
    /// The device's native sample format is not f32.
    SampleFormat(cpal::SampleFormat),
    /// Building the output stream failed.
    BuildStream(cpal::BuildStreamError),
    /// Starting or resuming playback failed.
    Resume(cpal::PlayStreamError),
    /// Suspending playback failed.
    Suspend(cpal::PauseStreamError),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::NoOutputDevice => write!(f, "no audio output device available"),
            ContextError::DefaultConfig(err) => write!(f, "no default output config: {err}"),
            ContextError::SampleFormat(format) => {
                write!(f, "unsupported output sample format {format:?}")
            }
            ContextError::BuildStream(err) => write!(f, "could not build output stream: {err}"),
            ContextError::Resume(err) => write!(f, "could not resume playback: {err}"),
            ContextError::Suspend(err) => write!(f, "could not suspend playback: {err}"),
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContextError::NoOutputDevice => None,
            ContextError::DefaultConfig(err) => Some(err),
            ContextError::SampleFormat(_) => None,
            ContextError::BuildStream(err) => Some(err),
            ContextError::Resume(err) => Some(err),
            ContextError::Suspend(err) => Some(err),
        }
    }
}

/// The shared realtime output context: one cpal stream whose callback owns
/// the voice bank, plus the producer side of the trigger queue.
///
/// One instance is shared by every trigger for the lifetime of the engine;
/// voices share its output sink and nothing else.
pub struct OutputContext {
    // Held for its Drop: dropping the stream closes the device handle
    _stream: cpal::Stream,
    tx: Producer<TriggerMessage>,
    sample_rate: f32,
    state: ContextState,
}

impl OutputContext {
    /// Open the default output device and start an f32 stream driving a
    /// fresh [`SirenBank`]. The context comes up in the `Running` state.
    pub fn open() -> Result<Self, ContextError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(ContextError::NoOutputDevice)?;
        let supported = device
            .default_output_config()
            .map_err(ContextError::DefaultConfig)?;

        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(ContextError::SampleFormat(supported.sample_format()));
        }

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels();
        let config = cpal::StreamConfig {
            channels,
            sample_rate: supported.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let (tx, rx) = RingBuffer::<TriggerMessage>::new(TRIGGER_QUEUE_SIZE);
        let mut bank = SirenBank::new(sample_rate, rx);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    bank.render(data, channels as usize);
                },
                |err| log::error!("output stream error: {err}"),
                None,
            )
            .map_err(ContextError::BuildStream)?;
        stream.play().map_err(ContextError::Resume)?;

        Ok(Self {
            _stream: stream,
            tx,
            sample_rate,
            state: ContextState::Running,
        })
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Hand a message to the audio callback. Returns false when the queue
    /// is full (the message is dropped).
    pub fn enqueue(&mut self, message: TriggerMessage) -> bool {
        self.tx.push(message).is_ok()
    }

    /// Resume a suspended context.
    pub fn resume(&mut self) -> Result<(), ContextError> {
        self._stream.play().map_err(ContextError::Resume)?;
        self.state = ContextState::Running;
        Ok(())
    }

    /// Suspend playback without releasing the device.
    pub fn suspend(&mut self) -> Result<(), ContextError> {
        self._stream.pause().map_err(ContextError::Suspend)?;
        self.state = ContextState::Suspended;
        Ok(())
    }

    /// Close the context, silencing all in-flight voices.
    ///
    /// Consumes self: a closed context cannot be observed afterwards, which
    /// is what lets the engine treat "present" as "live".
    pub fn close(mut self) -> Result<(), ContextError> {
        // Best-effort: dispose pending voices before the stream goes away
        let _ = self.tx.push(TriggerMessage::Silence);
        self.state = ContextState::Closed;
        self._stream.pause().map_err(ContextError::Suspend)
    }
}
