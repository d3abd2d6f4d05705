use crate::synth::voice::SirenVoice;

/// Control → audio thread messages.
///
/// Voices are fully constructed on the control side so the audio callback
/// never allocates; the queue just hands ownership across.
pub enum TriggerMessage {
    /// Admit a freshly built voice into the bank.
    Spawn(SirenVoice),
    /// Dispose every live voice immediately (context teardown path).
    Silence,
}
