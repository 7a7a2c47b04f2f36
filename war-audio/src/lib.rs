//! Offline synthesis and playback plumbing for WAR
//!
//! Notes from [`war_core`] are rendered by a small additive synth: one
//! [`synth::Voice`] per note, summed into interleaved stereo by the
//! [`mixer::Mixer`]. The [`engine::AudioEngine`] runs the mixer on its own
//! thread behind a command channel; audio leaves through the [`engine::Sink`]
//! seam, where a device binding would attach. This crate ships a buffer sink
//! and a WAV-file sink.

pub mod engine;
pub mod mixer;
pub mod synth;
pub mod transport;
pub mod wav;

pub use engine::{AudioCmd, AudioEngine, BufferSink, Sink, WavSink};
pub use mixer::{render, Mixer};
pub use synth::{Envelope, Voice, Waveform};
pub use transport::{Transport, TransportState};
pub use wav::{read_wav, write_wav, SampleFormat, WavSpec};

pub const DEFAULT_PERIOD_FRAMES: usize = 512;
pub const CHANNEL_COUNT: usize = 2;
